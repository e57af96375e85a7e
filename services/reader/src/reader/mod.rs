//! services/reader/src/reader/mod.rs
//!
//! The story reader: session state, the controller that drives it, the outbound
//! event protocol and the render snapshot handed to presenters.

pub mod controller;
pub mod protocol;
pub mod state;
pub mod view;

pub use controller::{StoryReader, SubmitOutcome};
pub use protocol::{NoticeLevel, ReaderEvent};
pub use state::{FeedbackState, ImageTarget, ReaderSession, ReaderSettings, ReaderState};
pub use view::{ReaderView, SlideBody, SlideView};
