use thiserror::Error;

/// Rejected session operations. None of these change the session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {operation} while the session is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: String,
    },

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("role must not be empty")]
    EmptyRole,

    #[error("an interview needs at least one question")]
    EmptyQuestionSet,

    #[error("an evaluation is still outstanding for question {}", .cursor + 1)]
    EvaluationPending { cursor: usize },
}
