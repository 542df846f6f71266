//! Tipos de dados para requisições e respostas do backend de entrevistas.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato esperado pelos endpoints `/v1/interview/*`.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para `POST /v1/interview/generate-questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsRequest {
    /// Cargo alvo (ex.: "Backend Engineer").
    pub role: String,
    /// Nível de experiência no formato do backend (ex.: "2-5 years").
    pub experience: String,
}

/// Resposta de sucesso de `generate-questions`.
///
/// `questions` ausente é tratado como lista vazia; o cliente rejeita
/// a lista vazia de qualquer forma.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Corpo da requisição para `POST /v1/interview/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Texto da pergunta respondida.
    pub question: String,
    /// Resposta do candidato.
    pub answer: String,
}

/// Avaliação de uma resposta, como devolvida pelo backend.
///
/// O campo `improved_answer` mantém o nome do JSON. Listas ausentes
/// viram listas vazias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Nota de 0 a 10.
    pub score: f64,
    /// Pontos fortes, na ordem do backend.
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Pontos fracos, na ordem do backend.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Exemplo de resposta melhorada.
    #[serde(default)]
    pub improved_answer: String,
}

pub const FAILED_EVALUATION_WEAKNESS: &str = "Error evaluating answer. Please try again.";
pub const FAILED_EVALUATION_IMPROVED_ANSWER: &str = "Evaluation failed due to a technical error.";

impl Evaluation {
    /// Avaliação substituta usada quando a chamada de avaliação falha.
    pub fn failed() -> Self {
        Self {
            score: 0.0,
            strengths: Vec::new(),
            weaknesses: vec![FAILED_EVALUATION_WEAKNESS.to_string()],
            improved_answer: FAILED_EVALUATION_IMPROVED_ANSWER.to_string(),
        }
    }

    /// Indica se esta é a avaliação substituta de falha.
    pub fn is_failed(&self) -> bool {
        *self == Self::failed()
    }
}

/// Envelope de erro estruturado: `{"error": {"message": "..."}}`.
///
/// Backends FastAPI mais antigos respondem `{"detail": "..."}`; ambos são aceitos.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorBody>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Extrai a mensagem legível, se houver uma não vazia.
    pub fn message(self) -> Option<String> {
        let from_error = self
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty());
        if from_error.is_some() {
            return from_error;
        }
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_deserialize_from_api_format() {
        let json = r#"{
            "score": 7,
            "strengths": ["clear structure"],
            "weaknesses": ["no example", "too short"],
            "improved_answer": "Start with the trade-off."
        }"#;
        let eval: Evaluation = serde_json::from_str(json).unwrap();
        assert_eq!(eval.score, 7.0);
        assert_eq!(eval.strengths, vec!["clear structure"]);
        assert_eq!(eval.weaknesses.len(), 2);
        assert_eq!(eval.improved_answer, "Start with the trade-off.");
    }

    #[test]
    fn evaluation_missing_lists_default_to_empty() {
        let eval: Evaluation = serde_json::from_str(r#"{"score": 4.5}"#).unwrap();
        assert_eq!(eval.score, 4.5);
        assert!(eval.strengths.is_empty());
        assert!(eval.weaknesses.is_empty());
        assert!(eval.improved_answer.is_empty());
    }

    #[test]
    fn failed_evaluation_is_fixed() {
        let eval = Evaluation::failed();
        assert_eq!(eval.score, 0.0);
        assert!(eval.strengths.is_empty());
        assert_eq!(
            eval.weaknesses,
            vec!["Error evaluating answer. Please try again.".to_string()]
        );
        assert_eq!(
            eval.improved_answer,
            "Evaluation failed due to a technical error."
        );
        assert!(eval.is_failed());
    }

    #[test]
    fn questions_response_missing_field_is_empty() {
        let resp: QuestionsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.questions.is_empty());
    }

    #[test]
    fn questions_request_uses_experience_key() {
        let req = QuestionsRequest {
            role: "SRE".into(),
            experience: "5-10 years".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["role"], "SRE");
        assert_eq!(json["experience"], "5-10 years");
    }

    #[test]
    fn error_envelope_prefers_structured_message() {
        let env: ErrorEnvelope = serde_json::from_value(serde_json::json!({
            "error": {"code": "infrastructure_error", "message": "AI unavailable"},
            "detail": "x"
        }))
        .unwrap();
        assert_eq!(env.message().as_deref(), Some("AI unavailable"));
    }

    #[test]
    fn error_envelope_falls_back_to_detail_string() {
        let env: ErrorEnvelope = serde_json::from_str(r#"{"detail": "boom"}"#).unwrap();
        assert_eq!(env.message().as_deref(), Some("boom"));

        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "bad"}]}"#).unwrap();
        assert_eq!(env.message(), None);
    }
}
