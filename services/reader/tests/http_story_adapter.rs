use httpmock::MockServer;
use reader_lib::{
    adapters::HttpStoryAdapter,
    reader::{ReaderEvent, ReaderSettings, ReaderView, StoryReader, SubmitOutcome},
};
use std::sync::Arc;
use std::time::Duration;
use story_reader_core::{
    domain::{FeedbackKind, Page, StoryId},
    parse_content,
    ports::{CollectionKind, PortError, StoryService},
};

const STORY_BODY: &str = r#"{
    "id": 7,
    "title": "Ormandaki Fener",
    "description": "Bir macera",
    "category": "Macera",
    "age_group": "5-8",
    "image": "/uploads/cover.png",
    "tags": [{"id": 1, "name": "orman"}],
    "content": "[{\"text\":\"Bir varmış\",\"image\":\"/uploads/p1.png\"},{\"text\":\"Son\",\"image\":null}]",
    "likes": 3,
    "read_time": 5,
    "read_count": 10,
    "is_interactive": true,
    "published_date": "2024-05-01T10:00:00",
    "author": {"id": 2, "username": "ayse", "email": "ayse@example.com"}
}"#;

fn adapter(server: &MockServer, token: Option<&str>) -> HttpStoryAdapter {
    HttpStoryAdapter::new(
        &server.base_url(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("adapter")
}

#[tokio::test]
async fn get_story_decodes_detail_and_sends_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/stories/7")
                .header("authorization", "Bearer secret");
            then.status(200)
                .header("content-type", "application/json")
                .body(STORY_BODY);
        })
        .await;

    let story = adapter(&server, Some("secret"))
        .get_story(&StoryId::Numeric(7))
        .await
        .expect("story");
    mock.assert_async().await;

    assert_eq!(story.title, "Ormandaki Fener");
    assert_eq!(story.tags[0].name, "orman");
    assert_eq!(
        parse_content(story.content.as_deref()),
        vec![
            Page::rich(Some("Bir varmış"), Some("/uploads/p1.png")),
            Page::rich(Some("Son"), None),
        ]
    );
}

#[tokio::test]
async fn feedback_posts_to_kind_endpoint() {
    let server = MockServer::start_async().await;
    let like = server
        .mock_async(|when, then| {
            when.method("POST").path("/api/stories/7/like");
            then.status(200).body("{}");
        })
        .await;
    let dislike = server
        .mock_async(|when, then| {
            when.method("POST").path("/api/stories/abc/dislike");
            then.status(200).body("{}");
        })
        .await;

    let stories = adapter(&server, None);
    stories
        .submit_feedback(&StoryId::Numeric(7), FeedbackKind::Like)
        .await
        .expect("like");
    stories
        .submit_feedback(&StoryId::from("abc"), FeedbackKind::Dislike)
        .await
        .expect("dislike");

    like.assert_async().await;
    dislike.assert_async().await;
}

#[tokio::test]
async fn http_failures_map_to_port_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/stories/404");
            then.status(404).body(r#"{"detail":"Story not found"}"#);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/stories/401");
            then.status(401);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/stories/500");
            then.status(500).body("boom");
        })
        .await;

    let stories = adapter(&server, None);
    assert!(matches!(
        stories.get_story(&StoryId::Numeric(404)).await,
        Err(PortError::NotFound(_))
    ));
    assert!(matches!(
        stories.get_story(&StoryId::Numeric(401)).await,
        Err(PortError::Unauthorized)
    ));
    match stories.get_story(&StoryId::Numeric(500)).await {
        Err(PortError::Unexpected(message)) => assert!(message.contains("boom")),
        other => panic!("expected unexpected error, got {:?}", other.map(|s| s.title)),
    }
}

#[tokio::test]
async fn collections_pass_the_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/stories/popular")
                .query_param("limit", "5");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"total":1,"stories":[{"id":7,"title":"Ormandaki Fener","description":"d","category":"Macera","likes":3}]}"#);
        })
        .await;

    let listing = adapter(&server, None)
        .list_collection(CollectionKind::Popular, 5)
        .await
        .expect("listing");
    mock.assert_async().await;

    assert_eq!(listing.total, 1);
    assert_eq!(listing.stories[0].id, StoryId::Numeric(7));
}

#[tokio::test]
async fn reader_runs_against_the_http_adapter() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/stories/7");
            then.status(200)
                .header("content-type", "application/json")
                .body(STORY_BODY);
        })
        .await;
    let dislike = server
        .mock_async(|when, then| {
            when.method("POST").path("/api/stories/7/dislike");
            then.status(500);
        })
        .await;

    let settings = ReaderSettings {
        image_base_url: server.base_url(),
        listing_route: "/stories".to_string(),
        feedback_delay: Duration::from_millis(10),
    };
    let (reader, mut events) = StoryReader::new(Arc::new(adapter(&server, None)), settings);

    assert!(reader.open(StoryId::Numeric(7)).await);
    match reader.view() {
        ReaderView::Ready(view) => {
            assert_eq!(view.progress.total, 3);
            assert_eq!(
                view.cover.map(|c| c.src().to_string()),
                Some(format!("{}/uploads/cover.png", server.base_url()))
            );
        }
        other => panic!("expected ready view, got {:?}", other),
    }

    reader.go_to(10);
    assert_eq!(reader.submit_dislike().await, SubmitOutcome::Failed);
    dislike.assert_async().await;

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    assert_eq!(
        last,
        Some(ReaderEvent::Navigate {
            route: "/stories".into()
        })
    );
}
