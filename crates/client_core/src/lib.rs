mod controller;
pub mod error;
mod session;
pub mod transport;

pub use controller::{TurnController, DEFAULT_SCROLL_DELAY};
pub use error::SubmissionFailure;
pub use session::{PendingAction, SessionEvent, SessionSnapshot, TurnOutcome};
pub use transport::{story_endpoint, HttpStoryBackend, StoryBackend};
