//! services/reader/src/bin/reader.rs

use clap::Parser;
use reader_lib::{
    adapters::HttpStoryAdapter,
    cli::{Cli, Command, ReaderCommand},
    config::Config,
    error::ReaderError,
    reader::{NoticeLevel, ReaderEvent, ReaderSettings, StoryReader},
    terminal::{render_collection, render_view, HELP},
};
use std::sync::Arc;
use story_reader_core::{domain::StoryId, ports::StoryService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ReaderError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Story API at {}", config.api_base_url);

    // --- 2. Initialize the Story API Adapter ---
    let stories: Arc<dyn StoryService> = Arc::new(HttpStoryAdapter::new(
        &config.api_base_url,
        config.api_token.clone(),
        config.request_timeout,
    )?);

    // --- 3. Dispatch ---
    match cli.command {
        Command::List { collection, limit } => {
            let kind = collection.into();
            let listing = stories.list_collection(kind, limit).await?;
            print!("{}", render_collection(kind, &listing));
            Ok(())
        }
        Command::Read { story_id } => {
            let story_id: StoryId = story_id
                .parse()
                .map_err(|_| ReaderError::Internal("invalid story id".to_string()))?;
            run_reader(stories, ReaderSettings::from(&config), story_id).await
        }
    }
}

/// Runs the interactive reader until the user quits or the reader asks to leave.
async fn run_reader(
    stories: Arc<dyn StoryService>,
    settings: ReaderSettings,
    story_id: StoryId,
) -> Result<(), ReaderError> {
    let (reader, mut events) = StoryReader::new(stories, settings);
    reader.open(story_id).await;
    print!("{}", render_view(&reader.view()));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = ReaderCommand::parse(&line) else {
                    println!("{}", HELP);
                    continue;
                };
                match command {
                    ReaderCommand::Next => { reader.go_next(); }
                    ReaderCommand::Prev => { reader.go_prev(); }
                    ReaderCommand::GoTo(stop) => { reader.go_to(stop.saturating_sub(1)); }
                    ReaderCommand::Like => {
                        let reader = reader.clone();
                        tokio::spawn(async move { reader.submit_like().await });
                    }
                    ReaderCommand::Dislike => {
                        let reader = reader.clone();
                        tokio::spawn(async move { reader.submit_dislike().await });
                    }
                    ReaderCommand::Back => reader.go_back(),
                    ReaderCommand::Retry => { reader.retry().await; }
                    ReaderCommand::Quit => break,
                    ReaderCommand::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                }
                print!("{}", render_view(&reader.view()));
            }
            Some(event) = events.recv() => match event {
                ReaderEvent::Notice { level, message } => {
                    let marker = if level == NoticeLevel::Success { "✓" } else { "✗" };
                    println!("{} {}", marker, message);
                }
                ReaderEvent::Navigate { route } => {
                    info!("Leaving the reader for {}", route);
                    println!("→ {}", route);
                    break;
                }
                ReaderEvent::NavigateBack => {
                    println!("←");
                    break;
                }
                ReaderEvent::StoryLoaded { .. } | ReaderEvent::LoadFailed { .. } => {}
            },
        }
    }

    reader.close();
    Ok(())
}
