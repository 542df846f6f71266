use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::SessionError;
use super::record::{AnswerRecord, InterviewConfig};
use crate::api::{ApiError, Evaluation};
use crate::scoring::{self, ScoreSummary};

/// Lifecycle of one interview attempt: SETUP → IN_PROGRESS → COMPLETE.
///
/// While an evaluation call is outstanding the in-progress phase carries the
/// [`PendingEvaluation`] ticket; no other answer is accepted until it settles.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Setup,
    InProgress {
        cursor: usize,
        pending: Option<PendingEvaluation>,
    },
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "SETUP"),
            Phase::InProgress {
                cursor,
                pending: None,
            } => write!(f, "IN_PROGRESS({cursor})"),
            Phase::InProgress {
                cursor,
                pending: Some(_),
            } => write!(f, "IN_PROGRESS({cursor}, awaiting evaluation)"),
            Phase::Complete => write!(f, "COMPLETE"),
        }
    }
}

/// Ticket for a submitted answer whose evaluation has not settled yet.
///
/// Tied to the session id and cursor it was issued for, so a result that
/// arrives after a restart can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvaluation {
    pub session_id: String,
    pub cursor: usize,
    pub question: String,
    pub answer: String,
}

/// Inputs to the session state machine.
#[derive(Debug)]
pub enum SessionEvent {
    Start {
        config: InterviewConfig,
        questions: Vec<String>,
    },
    AnswerSubmitted {
        answer: String,
    },
    EvaluationSettled {
        ticket: PendingEvaluation,
        outcome: Result<Evaluation, ApiError>,
    },
    Restart,
}

/// The effect an event had on the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A new interview began at question 0.
    Started { total: usize },
    /// The answer was accepted; the caller must evaluate it and settle the ticket.
    AwaitingEvaluation(PendingEvaluation),
    /// The evaluation was recorded and the cursor moved on.
    Advanced { cursor: usize },
    /// The last evaluation was recorded.
    Completed,
    /// The ticket no longer matches the session; nothing changed.
    Discarded,
    /// Everything was cleared back to setup.
    Reset,
}

/// State of one interview attempt, owned by whoever drives the session.
///
/// `answers` and `evaluations` are always the same length and never longer
/// than `questions`; they reach its length exactly when the phase is
/// [`Phase::Complete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    id: Option<String>,
    phase: Phase,
    config: Option<InterviewConfig>,
    questions: Vec<String>,
    answers: Vec<AnswerRecord>,
    evaluations: Vec<Evaluation>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and report the resulting transition.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        match event {
            SessionEvent::Start { config, questions } => self.start(config, questions),
            SessionEvent::AnswerSubmitted { answer } => self
                .submit_answer(answer)
                .map(Transition::AwaitingEvaluation),
            SessionEvent::EvaluationSettled { ticket, outcome } => {
                Ok(self.settle_evaluation(ticket, outcome))
            }
            SessionEvent::Restart => Ok(self.restart()),
        }
    }

    /// Begin a new interview from any phase, discarding whatever was there.
    pub fn start(
        &mut self,
        config: InterviewConfig,
        questions: Vec<String>,
    ) -> Result<Transition, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        let total = questions.len();
        let id = Uuid::new_v4().to_string();
        info!(
            session_id = %id,
            role = %config.role,
            experience = %config.experience,
            total,
            "interview started"
        );

        *self = Self {
            id: Some(id),
            phase: Phase::InProgress {
                cursor: 0,
                pending: None,
            },
            config: Some(config),
            questions,
            answers: Vec::new(),
            evaluations: Vec::new(),
            started_at: Some(Utc::now()),
            completed_at: None,
        };
        Ok(Transition::Started { total })
    }

    /// Accept an answer for the current question and issue its evaluation ticket.
    pub fn submit_answer(
        &mut self,
        answer: impl Into<String>,
    ) -> Result<PendingEvaluation, SessionError> {
        let answer = answer.into();
        let cursor = match &self.phase {
            Phase::InProgress {
                cursor,
                pending: None,
            } => *cursor,
            Phase::InProgress {
                cursor,
                pending: Some(_),
            } => return Err(SessionError::EvaluationPending { cursor: *cursor }),
            other => {
                return Err(SessionError::InvalidPhase {
                    operation: "submit an answer",
                    phase: other.to_string(),
                });
            }
        };

        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let (Some(session_id), Some(question)) = (&self.id, self.questions.get(cursor)) else {
            return Err(SessionError::InvalidPhase {
                operation: "submit an answer",
                phase: self.phase.to_string(),
            });
        };

        let ticket = PendingEvaluation {
            session_id: session_id.clone(),
            cursor,
            question: question.clone(),
            answer,
        };
        debug!(cursor, "answer submitted, awaiting evaluation");
        self.phase = Phase::InProgress {
            cursor,
            pending: Some(ticket.clone()),
        };
        Ok(ticket)
    }

    /// Record the outcome of an evaluation call and advance.
    ///
    /// A failed call is recorded as [`Evaluation::failed`]; the session moves on
    /// either way. A ticket that does not match the outstanding one is dropped.
    pub fn settle_evaluation(
        &mut self,
        ticket: PendingEvaluation,
        outcome: Result<Evaluation, ApiError>,
    ) -> Transition {
        let cursor = match &self.phase {
            Phase::InProgress {
                cursor,
                pending: Some(pending),
            } if *pending == ticket => *cursor,
            _ => {
                warn!(
                    session_id = %ticket.session_id,
                    cursor = ticket.cursor,
                    phase = %self.phase,
                    "discarding evaluation for a session that has moved on"
                );
                return Transition::Discarded;
            }
        };

        let evaluation = match outcome {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(cursor, error = %err, "evaluation failed, recording placeholder");
                Evaluation::failed()
            }
        };

        self.answers.push(AnswerRecord {
            question_index: cursor,
            question: ticket.question,
            answer: ticket.answer,
        });
        self.evaluations.push(evaluation);

        let next = cursor + 1;
        if next < self.questions.len() {
            self.phase = Phase::InProgress {
                cursor: next,
                pending: None,
            };
            debug!(cursor = next, "advanced to next question");
            Transition::Advanced { cursor: next }
        } else {
            self.phase = Phase::Complete;
            self.completed_at = Some(Utc::now());
            info!(answered = self.answers.len(), "interview complete");
            Transition::Completed
        }
    }

    /// Drop everything and return to setup.
    pub fn restart(&mut self) -> Transition {
        debug!(phase = %self.phase, "session reset");
        *self = Self::default();
        Transition::Reset
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> Option<&InterviewConfig> {
        self.config.as_ref()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Index of the question awaiting an answer. 0 in setup, the question
    /// count once complete.
    pub fn cursor(&self) -> usize {
        match &self.phase {
            Phase::Setup => 0,
            Phase::InProgress { cursor, .. } => *cursor,
            Phase::Complete => self.questions.len(),
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        match &self.phase {
            Phase::InProgress { cursor, .. } => self.questions.get(*cursor).map(String::as_str),
            _ => None,
        }
    }

    pub fn is_awaiting_evaluation(&self) -> bool {
        matches!(
            self.phase,
            Phase::InProgress {
                pending: Some(_),
                ..
            }
        )
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Aggregate scores over the evaluations recorded so far.
    pub fn summary(&self) -> ScoreSummary {
        scoring::summarize(&self.evaluations)
    }
}
