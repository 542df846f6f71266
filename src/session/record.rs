use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::SessionError;
use super::state::{Phase, SessionState};
use crate::api::Evaluation;
use crate::scoring::ScoreSummary;

/// Candidate experience bracket. Serialized with the backend's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "0-2 years")]
    Entry,
    #[serde(rename = "2-5 years")]
    Mid,
    #[serde(rename = "5-10 years")]
    Senior,
    #[serde(rename = "10+ years")]
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    /// The string sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "0-2 years",
            ExperienceLevel::Mid => "2-5 years",
            ExperienceLevel::Senior => "5-10 years",
            ExperienceLevel::Lead => "10+ years",
        }
    }

    /// Human label shown in the setup menu.
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "0-2 years (Entry Level)",
            ExperienceLevel::Mid => "2-5 years (Mid-Level)",
            ExperienceLevel::Senior => "5-10 years (Senior)",
            ExperienceLevel::Lead => "10+ years (Lead/Principal)",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input that names none of the four experience brackets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown experience level: {0} (expected 0-2, 2-5, 5-10 or 10+)")]
pub struct ParseExperienceError(pub String);

impl FromStr for ExperienceLevel {
    type Err = ParseExperienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let bracket = match normalized.as_str() {
            "entry" | "mid" | "senior" | "lead" => normalized.as_str(),
            other => other
                .strip_suffix("years")
                .or_else(|| other.strip_suffix('y'))
                .unwrap_or(other)
                .trim(),
        };
        match bracket {
            "0-2" | "entry" | "1" => Ok(ExperienceLevel::Entry),
            "2-5" | "mid" | "2" => Ok(ExperienceLevel::Mid),
            "5-10" | "senior" | "3" => Ok(ExperienceLevel::Senior),
            "10+" | "lead" | "4" => Ok(ExperienceLevel::Lead),
            _ => Err(ParseExperienceError(s.trim().to_string())),
        }
    }
}

/// Role and experience chosen during setup. Fixed for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub role: String,
    pub experience: ExperienceLevel,
}

impl InterviewConfig {
    pub fn new(role: impl Into<String>, experience: ExperienceLevel) -> Result<Self, SessionError> {
        let role = role.into().trim().to_string();
        if role.is_empty() {
            return Err(SessionError::EmptyRole);
        }
        Ok(Self { role, experience })
    }
}

/// One submitted answer, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub question: String,
    pub answer: String,
}

/// An answer paired with its evaluation, as written to the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub question_index: usize,
    pub question: String,
    pub answer: String,
    pub evaluation: Evaluation,
}

/// Structured record of a finished interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub role: String,
    pub experience: ExperienceLevel,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub items: Vec<ReportItem>,
    pub summary: ScoreSummary,
}

impl SessionReport {
    /// Build the report for a completed session.
    pub fn from_session(session: &SessionState) -> Result<Self, SessionError> {
        let incomplete = || SessionError::InvalidPhase {
            operation: "build a report",
            phase: session.phase().to_string(),
        };
        if !matches!(session.phase(), Phase::Complete) {
            return Err(incomplete());
        }
        let (Some(session_id), Some(config), Some(started_at), Some(completed_at)) = (
            session.id(),
            session.config(),
            session.started_at(),
            session.completed_at(),
        ) else {
            return Err(incomplete());
        };

        let items = session
            .answers()
            .iter()
            .zip(session.evaluations())
            .map(|(record, evaluation)| ReportItem {
                question_index: record.question_index,
                question: record.question.clone(),
                answer: record.answer.clone(),
                evaluation: evaluation.clone(),
            })
            .collect();

        Ok(Self {
            session_id: session_id.to_string(),
            role: config.role.clone(),
            experience: config.experience,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
            items,
            summary: session.summary(),
        })
    }
}
