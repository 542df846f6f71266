//! Interface de linha de comando do interview-coach baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (practice, questions, ping)
//! e flags globais (--api-url, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::session::ExperienceLevel;

/// interview-coach: entrevistas de prática com avaliação por IA.
#[derive(Debug, Parser)]
#[command(name = "interview-coach", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL base do backend (sobrepõe arquivo de configuração e ambiente).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Nível de experiência aceito pela CLI, mapeado para [`ExperienceLevel`] internamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperienceArg {
    /// 0-2 anos (entry level).
    #[value(name = "0-2", alias = "entry")]
    Entry,
    /// 2-5 anos (mid-level).
    #[value(name = "2-5", alias = "mid")]
    Mid,
    /// 5-10 anos (senior).
    #[value(name = "5-10", alias = "senior")]
    Senior,
    /// 10+ anos (lead/principal).
    #[value(name = "10+", alias = "lead")]
    Lead,
}

impl From<ExperienceArg> for ExperienceLevel {
    fn from(arg: ExperienceArg) -> Self {
        match arg {
            ExperienceArg::Entry => ExperienceLevel::Entry,
            ExperienceArg::Mid => ExperienceLevel::Mid,
            ExperienceArg::Senior => ExperienceLevel::Senior,
            ExperienceArg::Lead => ExperienceLevel::Lead,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia uma entrevista interativa.
    Practice {
        /// Cargo alvo; perguntado interativamente se omitido.
        #[arg(long)]
        role: Option<String>,

        /// Nível de experiência; perguntado interativamente se omitido.
        #[arg(long, value_enum)]
        experience: Option<ExperienceArg>,

        /// Grava o relatório JSON da sessão concluída neste caminho.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Gera um conjunto de perguntas e imprime sem iniciar uma sessão.
    Questions {
        /// Cargo alvo.
        #[arg(long)]
        role: String,

        /// Nível de experiência.
        #[arg(long, value_enum)]
        experience: ExperienceArg,

        /// Imprime a lista em JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Verifica se o backend está respondendo.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_practice_subcommand() {
        let cli = Cli::parse_from([
            "interview-coach",
            "practice",
            "--role",
            "Frontend Developer",
            "--experience",
            "2-5",
        ]);
        match cli.command {
            Command::Practice {
                role,
                experience,
                report,
            } => {
                assert_eq!(role.as_deref(), Some("Frontend Developer"));
                assert_eq!(experience, Some(ExperienceArg::Mid));
                assert!(report.is_none());
            }
            _ => panic!("expected Practice command"),
        }
    }

    #[test]
    fn cli_practice_fields_are_optional() {
        let cli = Cli::parse_from(["interview-coach", "practice"]);
        assert!(matches!(
            cli.command,
            Command::Practice {
                role: None,
                experience: None,
                report: None
            }
        ));
    }

    #[test]
    fn cli_accepts_experience_aliases() {
        let cli = Cli::parse_from([
            "interview-coach",
            "questions",
            "--role",
            "SRE",
            "--experience",
            "lead",
            "--json",
        ]);
        match cli.command {
            Command::Questions {
                role,
                experience,
                json,
            } => {
                assert_eq!(role, "SRE");
                assert_eq!(ExperienceLevel::from(experience), ExperienceLevel::Lead);
                assert!(json);
            }
            _ => panic!("expected Questions command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "interview-coach",
            "--api-url",
            "http://backend:8000",
            "--verbose",
            "ping",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000"));
        assert!(matches!(cli.command, Command::Ping));
    }

    #[test]
    fn cli_rejects_unknown_experience() {
        let result = Cli::try_parse_from([
            "interview-coach",
            "questions",
            "--role",
            "SRE",
            "--experience",
            "20",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
