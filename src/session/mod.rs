mod error;
mod record;
mod state;

pub use error::SessionError;
pub use record::{ExperienceLevel, InterviewConfig, SessionReport};
pub use state::{SessionEvent, SessionState, Transition};
