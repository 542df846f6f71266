//! Configuração do interview-coach carregada a partir de `interview-coach.toml`.
//!
//! A struct [`CoachConfig`] contém os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `INTERVIEW_COACH_API_URL` tem precedência sobre o arquivo,
//! e a flag `--api-url` tem precedência sobre ambos.

use serde::Deserialize;
use std::path::Path;

use crate::api::DEFAULT_BASE_URL;
use crate::error::CoachError;

pub const CONFIG_FILE: &str = "interview-coach.toml";
pub const API_URL_ENV: &str = "INTERVIEW_COACH_API_URL";

/// Configuração de nível superior carregada de `interview-coach.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoachConfig {
    /// URL base do backend de entrevistas.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Nível de log padrão quando `RUST_LOG` não está definido.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Valor padrão para a URL do backend: servidor local na porta 8000.
fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// Valor padrão para o nível de log: "warn".
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl CoachConfig {
    /// Carrega a configuração de `interview-coach.toml` no diretório atual
    /// e aplica a variável de ambiente. Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, CoachError> {
        let mut config = Self::load_from(Path::new(CONFIG_FILE))?;
        config.override_api_url(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Carrega a configuração de um arquivo explícito, sem consultar o ambiente.
    pub fn load_from(path: &Path) -> Result<Self, CoachError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str::<CoachConfig>(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Substitui a URL do backend quando um valor não vazio é fornecido.
    pub fn override_api_url(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url
            && !url.trim().is_empty()
        {
            self.api_url = url.trim().to_string();
        }
    }

    /// A URL precisa ser http(s).
    pub fn validate(&self) -> Result<(), CoachError> {
        let url = self.api_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(CoachError::Config(format!(
                "api_url must start with http:// or https://, got {url:?}"
            )))
        }
    }
}
