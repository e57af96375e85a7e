pub mod http_story;

pub use http_story::HttpStoryAdapter;
