use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::api::InterviewBackend;
use crate::error::CoachError;
use crate::session::{
    ExperienceLevel, InterviewConfig, SessionError, SessionEvent, SessionReport, SessionState,
    Transition,
};
use crate::ui::Terminal;

/// Owns one session and the backend it talks to; every state change goes
/// through [`SessionState::apply`].
pub struct Coach<B: InterviewBackend> {
    backend: B,
    session: SessionState,
}

impl<B: InterviewBackend> Coach<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Fetch questions and start a new interview. On a generation failure the
    /// session is left untouched.
    pub async fn begin(
        &mut self,
        role: &str,
        experience: ExperienceLevel,
    ) -> Result<Transition, CoachError> {
        let config = InterviewConfig::new(role, experience)?;
        let questions = self
            .backend
            .generate_questions(&config.role, experience.as_str())
            .await?;
        Ok(self.session.apply(SessionEvent::Start { config, questions })?)
    }

    /// Submit an answer for the current question and wait for its evaluation.
    ///
    /// A failed evaluation never surfaces here: the session records the
    /// placeholder evaluation and advances.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<Transition, CoachError> {
        let ticket = match self.session.apply(SessionEvent::AnswerSubmitted {
            answer: answer.to_string(),
        })? {
            Transition::AwaitingEvaluation(ticket) => ticket,
            other => return Ok(other),
        };
        let outcome = self
            .backend
            .evaluate_answer(&ticket.question, &ticket.answer)
            .await;
        Ok(self
            .session
            .apply(SessionEvent::EvaluationSettled { ticket, outcome })?)
    }

    pub fn restart(&mut self) -> Result<Transition, CoachError> {
        Ok(self.session.apply(SessionEvent::Restart)?)
    }

    /// Write the report of the completed session as pretty JSON.
    pub fn write_report(&self, path: &Path) -> Result<SessionReport, CoachError> {
        let report = SessionReport::from_session(&self.session)?;
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "session report written");
        Ok(report)
    }

    /// Interactive loop: setup → questions → results, repeated until the user stops.
    ///
    /// `role` and `experience` pre-fill the first setup only.
    pub async fn run_interactive<R: BufRead, W: Write>(
        &mut self,
        ui: &mut Terminal<R, W>,
        mut role: Option<String>,
        mut experience: Option<ExperienceLevel>,
        report: Option<&Path>,
    ) -> Result<()> {
        loop {
            let chosen_role = match role.take() {
                Some(r) => r,
                None => ui.prompt_role()?,
            };
            let chosen_experience = match experience.take() {
                Some(e) => e,
                None => ui.prompt_experience()?,
            };

            let spinner = ui.spinner("Generating questions...");
            let started = self.begin(&chosen_role, chosen_experience).await;
            spinner.finish_and_clear();

            match started {
                Ok(Transition::Started { total }) => {
                    ui.info(&format!(
                        "{total} questions for {chosen_role} ({chosen_experience})"
                    ))?;
                }
                Ok(other) => debug!(?other, "unexpected transition on start"),
                Err(CoachError::Session(SessionError::EmptyRole)) => {
                    ui.warn("Role must not be empty.")?;
                    experience = Some(chosen_experience);
                    continue;
                }
                Err(err) if err.is_generation_failure() => {
                    let message = match &err {
                        CoachError::Api(api) => api.to_string(),
                        other => other.to_string(),
                    };
                    ui.error(&message)?;
                    ui.warn("Check that the backend is running and try again.")?;
                    if ui.confirm("Try again?")? {
                        continue;
                    }
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }

            if !self.answer_questions(ui).await? {
                return Ok(());
            }

            ui.render_results(self.session())?;
            if let Some(path) = report {
                self.write_report(path)?;
                ui.info(&format!("Report written to {}", path.display()))?;
            }

            if !ui.confirm("Start a new interview?")? {
                return Ok(());
            }
            self.restart()?;
        }
    }

    /// Returns `false` when input ends before the interview is complete.
    async fn answer_questions<R: BufRead, W: Write>(
        &mut self,
        ui: &mut Terminal<R, W>,
    ) -> Result<bool> {
        let total = self.session.questions().len();
        while let Some(question) = self.session.current_question().map(str::to_string) {
            let number = self.session.cursor() + 1;
            ui.render_question(number, total, &question)?;

            let answer = match ui.read_answer(number == total) {
                Ok(answer) => answer,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    ui.warn("Input closed; interview abandoned.")?;
                    return Ok(false);
                }
                Err(err) => return Err(err.into()),
            };

            let spinner = ui.spinner("AI is analyzing your answer...");
            let result = self.submit_answer(&answer).await;
            spinner.finish_and_clear();
            debug_assert!(!self.session.is_awaiting_evaluation());

            match result {
                Ok(_) => {
                    if let Some(eval) = self.session.evaluations().last()
                        && eval.is_failed()
                    {
                        ui.warn("Evaluation failed; moving on to the next question.")?;
                    }
                }
                Err(CoachError::Session(err)) => ui.warn(&err.to_string())?,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(self.session.is_complete())
    }
}
