pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_BASE_URL, InterviewBackend, InterviewClient};
pub use error::ApiError;
pub use types::Evaluation;
