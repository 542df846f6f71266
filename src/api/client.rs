use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::error::ApiError;
use super::types::{
    ErrorEnvelope, Evaluation, EvaluationRequest, QuestionsRequest, QuestionsResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const GENERATE_PATH: &str = "/v1/interview/generate-questions";
const EVALUATE_PATH: &str = "/v1/interview/evaluate";
const PING_PATH: &str = "/ping";

/// The two backend operations a session depends on.
///
/// Implemented by [`InterviewClient`] for real HTTP calls and by mocks in tests.
pub trait InterviewBackend {
    async fn generate_questions(
        &self,
        role: &str,
        experience: &str,
    ) -> Result<Vec<String>, ApiError>;

    async fn evaluate_answer(&self, question: &str, answer: &str)
    -> Result<Evaluation, ApiError>;
}

/// HTTP client for the interview backend. One request per call, no retries.
pub struct InterviewClient {
    client: Client,
    base_url: String,
}

impl InterviewClient {
    /// Create a client for the given base URL. A trailing `/` is ignored.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ask the backend for a question set. An empty list is an error even on 200.
    pub async fn generate_questions(
        &self,
        role: &str,
        experience: &str,
    ) -> Result<Vec<String>, ApiError> {
        if role.trim().is_empty() {
            return Err(ApiError::generation("Role must not be empty"));
        }
        if experience.trim().is_empty() {
            return Err(ApiError::generation("Experience level must not be empty"));
        }

        let req = QuestionsRequest {
            role: role.to_string(),
            experience: experience.to_string(),
        };
        debug!(role, experience, "requesting questions");
        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response, "Failed to generate questions").await;
            warn!(status = status.as_u16(), %message, "question generation failed");
            return Err(ApiError::generation(message));
        }

        let body = response
            .json::<QuestionsResponse>()
            .await
            .map_err(|e| ApiError::generation(format!("Invalid questions response: {e}")))?;

        if body.questions.is_empty() {
            warn!("backend returned an empty question list");
            return Err(ApiError::generation("No questions generated"));
        }

        debug!(count = body.questions.len(), "questions received");
        Ok(body.questions)
    }

    /// Submit one answer for evaluation. The returned score is always within 0..=10.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ApiError> {
        if question.trim().is_empty() {
            return Err(ApiError::evaluation("Question must not be empty"));
        }
        if answer.trim().is_empty() {
            return Err(ApiError::evaluation("Answer must not be empty"));
        }

        let req = EvaluationRequest {
            question: question.to_string(),
            answer: answer.to_string(),
        };
        debug!(answer_len = answer.len(), "requesting evaluation");
        let response = self
            .client
            .post(self.url(EVALUATE_PATH))
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response, "Failed to evaluate answer").await;
            warn!(status = status.as_u16(), %message, "evaluation failed");
            return Err(ApiError::evaluation(message));
        }

        let evaluation = response
            .json::<Evaluation>()
            .await
            .map_err(|e| ApiError::evaluation(format!("Invalid evaluation response: {e}")))?;

        if !(0.0..=10.0).contains(&evaluation.score) {
            return Err(ApiError::evaluation(format!(
                "Score {} is outside the 0-10 range",
                evaluation.score
            )));
        }

        Ok(evaluation)
    }

    /// Liveness probe. The payload shape is whatever the backend returns.
    pub async fn health_check(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .get(self.url(PING_PATH))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<serde_json::Value>().await?)
    }
}

impl InterviewBackend for InterviewClient {
    async fn generate_questions(
        &self,
        role: &str,
        experience: &str,
    ) -> Result<Vec<String>, ApiError> {
        InterviewClient::generate_questions(self, role, experience).await
    }

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ApiError> {
        InterviewClient::evaluate_answer(self, question, answer).await
    }
}

/// Message for a non-2xx response: the structured error field when present,
/// otherwise `"<prefix>: <reason phrase>"`.
async fn error_message(response: Response, prefix: &str) -> String {
    let status = response.status();
    let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
    envelope.message().unwrap_or_else(|| {
        let reason = status.canonical_reason().unwrap_or(status.as_str());
        format!("{prefix}: {reason}")
    })
}
