//! services/reader/src/reader/controller.rs
//!
//! The reader's control surface. It fetches a story, builds the session, moves the
//! slide deck and relays like/dislike submissions to the story service.
//!
//! Every asynchronous step is bound to a per-session `CancellationToken`. Opening
//! another story or closing the reader cancels it, so a late fetch result or a
//! pending post-feedback redirect is dropped instead of being applied.

use super::{
    protocol::{
        NoticeLevel, ReaderEvent, FEEDBACK_FAILED_MESSAGE, FEEDBACK_SAVED_MESSAGE,
        LOAD_FAILED_MESSAGE,
    },
    state::{FeedbackState, ImageTarget, ReaderSession, ReaderSettings, ReaderState},
    view::ReaderView,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use story_reader_core::{
    domain::{FeedbackKind, StoryId},
    ports::StoryService,
    slides::{Progress, Slide, SlideDeck},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// The result of a like/dislike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service recorded the feedback.
    Sent,
    /// The service call failed; the user was notified and still redirected.
    Failed,
    /// Not on the feedback stop, nothing loaded, or a submission was already in flight.
    Ignored,
}

struct Mounted {
    state: ReaderState,
    session_token: CancellationToken,
}

/// A cheaply cloneable handle to one mounted reader.
#[derive(Clone)]
pub struct StoryReader {
    stories: Arc<dyn StoryService>,
    settings: Arc<ReaderSettings>,
    mounted: Arc<Mutex<Mounted>>,
    events: mpsc::UnboundedSender<ReaderEvent>,
}

impl StoryReader {
    /// Creates an idle reader and the receiving end of its event stream.
    pub fn new(
        stories: Arc<dyn StoryService>,
        settings: ReaderSettings,
    ) -> (Self, mpsc::UnboundedReceiver<ReaderEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let reader = Self {
            stories,
            settings: Arc::new(settings),
            mounted: Arc::new(Mutex::new(Mounted {
                state: ReaderState::Idle,
                session_token: CancellationToken::new(),
            })),
            events,
        };
        (reader, receiver)
    }

    // Navigation calls are synchronous and the lock is never held across an await.
    fn lock(&self) -> MutexGuard<'_, Mounted> {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: ReaderEvent) {
        if self.events.send(event).is_err() {
            debug!("Reader event dropped: no listener.");
        }
    }

    //=====================================================================================
    // Lifecycle
    //=====================================================================================

    /// Loads a story and positions the deck on its first stop.
    ///
    /// Any previous session is cancelled first. Returns `false` when the result was
    /// discarded because the reader was closed or another story opened meanwhile.
    pub async fn open(&self, story_id: StoryId) -> bool {
        let token = {
            let mut mounted = self.lock();
            mounted.session_token.cancel();
            mounted.session_token = CancellationToken::new();
            mounted.state = ReaderState::Loading {
                story_id: story_id.clone(),
            };
            mounted.session_token.clone()
        };

        info!("Fetching story {}.", story_id);
        let result = tokio::select! {
            result = self.stories.get_story(&story_id) => result,
            _ = token.cancelled() => {
                debug!("Fetch for story {} abandoned.", story_id);
                return false;
            }
        };

        let event = {
            let mut mounted = self.lock();
            if token.is_cancelled() {
                debug!("Discarding late result for story {}.", story_id);
                return false;
            }

            match result {
                Ok(story) => {
                    let session = ReaderSession::new(story, &self.settings.image_base_url);
                    info!(
                        "Story {} loaded with {} page(s).",
                        story_id,
                        session.pages.len()
                    );
                    let event = ReaderEvent::StoryLoaded {
                        story_id,
                        title: session.story.title.clone(),
                        total_slides: session.deck.total_stops(),
                    };
                    mounted.state = ReaderState::Ready(Box::new(session));
                    event
                }
                Err(e) => {
                    error!("Failed to fetch story {}: {:?}", story_id, e);
                    mounted.state = ReaderState::Failed {
                        story_id: story_id.clone(),
                        message: LOAD_FAILED_MESSAGE.to_string(),
                    };
                    ReaderEvent::LoadFailed {
                        story_id,
                        message: LOAD_FAILED_MESSAGE.to_string(),
                    }
                }
            }
        };

        self.emit(event);
        true
    }

    /// Reloads the current story from scratch. Returns `false` if nothing was opened.
    pub async fn retry(&self) -> bool {
        let story_id = self.lock().state.story_id().cloned();
        match story_id {
            Some(story_id) => self.open(story_id).await,
            None => false,
        }
    }

    /// Unmounts the reader. Outstanding fetches and redirects are cancelled.
    pub fn close(&self) {
        let mut mounted = self.lock();
        mounted.session_token.cancel();
        mounted.state = ReaderState::Idle;
    }

    //=====================================================================================
    // Navigation
    //=====================================================================================

    fn with_deck<T>(&self, f: impl FnOnce(&mut SlideDeck) -> T) -> Option<T> {
        match &mut self.lock().state {
            ReaderState::Ready(session) => Some(f(&mut session.deck)),
            _ => None,
        }
    }

    /// Moves one stop forward. Returns whether the position changed.
    pub fn go_next(&self) -> bool {
        self.with_deck(SlideDeck::next).unwrap_or(false)
    }

    /// Moves one stop back. Returns whether the position changed.
    pub fn go_prev(&self) -> bool {
        self.with_deck(SlideDeck::prev).unwrap_or(false)
    }

    /// Jumps to a stop, clamped into range. Returns whether the position changed.
    pub fn go_to(&self, index: usize) -> bool {
        self.with_deck(|deck| deck.jump_to(index)).unwrap_or(false)
    }

    /// Asks the host to go back one step in browsing history.
    pub fn go_back(&self) {
        self.emit(ReaderEvent::NavigateBack);
    }

    pub fn current_index(&self) -> Option<usize> {
        self.with_deck(|deck| deck.current_index())
    }

    pub fn current_slide(&self) -> Option<Slide> {
        self.with_deck(|deck| deck.current_slide())
    }

    pub fn progress(&self) -> Option<Progress> {
        self.with_deck(|deck| deck.progress())
    }

    /// A snapshot for rendering.
    pub fn view(&self) -> ReaderView {
        ReaderView::from(&self.lock().state)
    }

    /// Reports that an image failed to load so it falls back to the placeholder.
    pub fn image_failed(&self, target: ImageTarget) -> bool {
        match &mut self.lock().state {
            ReaderState::Ready(session) => session.mark_image_broken(target),
            _ => false,
        }
    }

    //=====================================================================================
    // Feedback
    //=====================================================================================

    /// Whether the like/dislike controls accept input.
    pub fn feedback_enabled(&self) -> bool {
        match &self.lock().state {
            ReaderState::Ready(session) => session.feedback == FeedbackState::Idle,
            _ => false,
        }
    }

    pub async fn submit_like(&self) -> SubmitOutcome {
        self.submit(FeedbackKind::Like).await
    }

    pub async fn submit_dislike(&self) -> SubmitOutcome {
        self.submit(FeedbackKind::Dislike).await
    }

    /// Sends feedback, shows a notice, waits out the redirect delay and then asks
    /// the host to leave for the listing route. The redirect happens whether or not
    /// the service call succeeded. Closing the reader cancels the redirect.
    async fn submit(&self, kind: FeedbackKind) -> SubmitOutcome {
        let (story_id, token) = {
            let mut mounted = self.lock();
            let token = mounted.session_token.clone();
            match &mut mounted.state {
                ReaderState::Ready(session)
                    if session.deck.is_feedback() && session.feedback == FeedbackState::Idle =>
                {
                    session.feedback = FeedbackState::Submitting(kind);
                    (session.story.id.clone(), token)
                }
                _ => {
                    debug!("Ignoring {:?} submission.", kind);
                    return SubmitOutcome::Ignored;
                }
            }
        };

        // --- 1. Submit and acknowledge ---
        let outcome = match self.stories.submit_feedback(&story_id, kind).await {
            Ok(()) => {
                info!("Recorded {:?} for story {}.", kind, story_id);
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!("Failed to record {:?} for story {}: {:?}", kind, story_id, e);
                SubmitOutcome::Failed
            }
        };

        if token.is_cancelled() {
            return outcome;
        }
        let (level, message) = match outcome {
            SubmitOutcome::Sent => (NoticeLevel::Success, FEEDBACK_SAVED_MESSAGE),
            _ => (NoticeLevel::Error, FEEDBACK_FAILED_MESSAGE),
        };
        self.emit(ReaderEvent::Notice {
            level,
            message: message.to_string(),
        });

        // --- 2. Wait, then leave ---
        tokio::select! {
            _ = tokio::time::sleep(self.settings.feedback_delay) => {}
            _ = token.cancelled() => {
                debug!("Reader closed before the feedback redirect.");
                return outcome;
            }
        }

        {
            let mut mounted = self.lock();
            if token.is_cancelled() {
                return outcome;
            }
            if let ReaderState::Ready(session) = &mut mounted.state {
                session.feedback = FeedbackState::Idle;
            }
        }
        self.emit(ReaderEvent::Navigate {
            route: self.settings.listing_route.clone(),
        });
        outcome
    }
}
