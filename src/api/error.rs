//! Tipos de erro para o cliente do backend de entrevistas.
//!
//! Define [`ApiError`] com uma variante por operação que pode falhar de forma
//! tipada, além dos erros de rede. Usa `thiserror` para derivar `Display`
//! e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com o backend.
///
/// - [`Generation`](ApiError::Generation): falha ao gerar perguntas (status
///   não-2xx, corpo inválido ou lista vazia)
/// - [`Evaluation`](ApiError::Evaluation): falha ao avaliar uma resposta
/// - [`Network`](ApiError::Network): falha na camada de transporte
#[derive(Debug, Error)]
pub enum ApiError {
    /// A geração de perguntas falhou. Fatal para o fluxo de preparação.
    #[error("{message}")]
    Generation { message: String },

    /// A avaliação falhou. A sessão substitui a avaliação e continua.
    #[error("{message}")]
    Evaluation { message: String },

    /// Falha de rede (DNS, conexão recusada).
    /// Encapsula o `reqwest::Error` subjacente via `#[from]`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_display_is_message() {
        let err = ApiError::generation("No questions generated");
        assert_eq!(err.to_string(), "No questions generated");
    }

    #[test]
    fn evaluation_display_is_message() {
        let err = ApiError::evaluation("Failed to evaluate answer: Bad Gateway");
        assert_eq!(err.to_string(), "Failed to evaluate answer: Bad Gateway");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
