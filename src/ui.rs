//! Interface de terminal do interview-coach: spinners, telas e leitura de respostas.
//!
//! Usa as crates `indicatif` para spinners de progresso e `console` para
//! estilização com cores. Cada tela corresponde a uma fase da sessão:
//! preparação, pergunta em andamento e resultados.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use console::{Style, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::Evaluation;
use crate::scoring::{PerformanceTier, ScoreBand, ScoreSummary};
use crate::session::{ExperienceLevel, SessionState};

/// Terminal interativo: lê de `R` e escreve telas coloridas em `W`.
///
/// O padrão usa stdin/stdout; testes passam um cursor e um `Vec<u8>`.
pub struct Terminal<R = io::StdinLock<'static>, W = io::Stdout> {
    input: R,
    output: W,
    // Spinners só aparecem no terminal real.
    spinners: bool,
    // Estilo verde para notas altas e sucesso.
    green: Style,
    // Estilo amarelo para notas médias e avisos.
    yellow: Style,
    // Estilo vermelho para notas baixas e erros.
    red: Style,
    // Estilo azul para títulos e perguntas.
    blue: Style,
    // Estilo esmaecido para textos auxiliares.
    dim: Style,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            spinners: true,
            ..Self::with_io(io::stdin().lock(), io::stdout())
        }
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            input,
            output,
            spinners: false,
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
            red: Style::new().red().bold(),
            blue: Style::new().blue().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Consome o terminal e devolve a saída escrita.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Inicia um spinner com a mensagem dada. O chamador finaliza com `finish_and_clear`.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.spinners {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Lê uma linha da entrada. EOF vira `UnexpectedEof`.
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Tela de preparação: pergunta o cargo até receber um valor não vazio.
    pub fn prompt_role(&mut self) -> io::Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.blue.apply_to("AI Interview Coach"))?;
        writeln!(
            self.output,
            "{}",
            self.dim
                .apply_to("We'll generate realistic questions for your role and experience level.")
        )?;
        loop {
            let role = self.read_line("Target role (e.g. Frontend Developer, Data Scientist): ")?;
            if !role.trim().is_empty() {
                return Ok(role.trim().to_string());
            }
            self.warn("Role must not be empty.")?;
        }
    }

    /// Menu de nível de experiência.
    pub fn prompt_experience(&mut self) -> io::Result<ExperienceLevel> {
        for (i, level) in ExperienceLevel::ALL.iter().enumerate() {
            writeln!(
                self.output,
                "  {} {}",
                style(format!("{}.", i + 1)).cyan(),
                level.label()
            )?;
        }
        loop {
            let input = self.read_line("Experience level [1-4]: ")?;
            match input.parse::<ExperienceLevel>() {
                Ok(level) => return Ok(level),
                Err(err) => self.warn(&err.to_string())?,
            }
        }
    }

    /// Mostra a pergunta atual com a barra de progresso textual.
    pub fn render_question(
        &mut self,
        number: usize,
        total: usize,
        question: &str,
    ) -> io::Result<()> {
        let filled = (number * 20 / total.max(1)).min(20);
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} [{}{}] {number} of {total}",
            self.dim.apply_to("Progress"),
            "█".repeat(filled),
            "░".repeat(20 - filled)
        )?;
        writeln!(
            self.output,
            "{}",
            self.blue.apply_to(format!("Question {number} / {total}"))
        )?;
        writeln!(self.output, "{question}")?;
        writeln!(self.output)
    }

    /// Lê uma resposta de várias linhas; uma linha vazia encerra.
    ///
    /// Linhas em branco antes do primeiro texto são ignoradas. EOF depois de
    /// algum texto conta como fim da resposta.
    pub fn read_answer(&mut self, is_last: bool) -> io::Result<String> {
        let action = if is_last {
            "complete the interview"
        } else {
            "submit & continue"
        };
        writeln!(
            self.output,
            "{}",
            self.dim
                .apply_to(format!("Type your answer; finish with an empty line to {action}."))
        )?;
        let mut lines: Vec<String> = Vec::new();
        loop {
            match self.read_line("> ") {
                Ok(line) if line.trim().is_empty() && !lines.is_empty() => break,
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => lines.push(line),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof && !lines.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(lines.join("\n"))
    }

    /// Pergunta sim/não; padrão é "não".
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N]: "))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "  {} {message}", self.green.apply_to("✓"))
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "  {} {message}", self.yellow.apply_to("!"))
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "  {} {message}", self.red.apply_to("✗"))
    }

    fn band_style(&self, band: ScoreBand) -> Style {
        match band {
            ScoreBand::Strong => self.green.clone(),
            ScoreBand::Average => self.yellow.clone(),
            ScoreBand::Weak => self.red.clone(),
        }
    }

    fn tier_style(&self, tier: PerformanceTier) -> Style {
        match tier {
            PerformanceTier::Excellent => self.green.clone(),
            PerformanceTier::Good => self.blue.clone(),
            PerformanceTier::Fair => self.yellow.clone(),
            PerformanceTier::NeedsWork => self.red.clone(),
        }
    }

    /// Imprime o resumo agregado de desempenho.
    pub fn render_summary(&mut self, summary: &ScoreSummary) -> io::Result<()> {
        let tier_style = self.tier_style(summary.tier);
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.blue.apply_to("─── Performance Summary ───"))?;
        writeln!(
            self.output,
            "  Average score    {} ({})",
            tier_style.apply_to(format!("{:.1}", summary.average_score)),
            tier_style.apply_to(summary.tier)
        )?;
        writeln!(self.output, "  Total questions  {}", summary.total)?;
        writeln!(
            self.output,
            "  Strong answers   {} {}",
            self.green.apply_to(summary.strong),
            self.dim.apply_to("(score ≥ 7)")
        )?;
        writeln!(
            self.output,
            "  Average answers  {} {}",
            self.yellow.apply_to(summary.average),
            self.dim.apply_to("(score 5-6)")
        )?;
        writeln!(
            self.output,
            "  Weak answers     {} {}",
            self.red.apply_to(summary.weak),
            self.dim.apply_to("(score < 5)")
        )?;
        if summary.weak > 0 {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "  {} Review the improved answers below for the questions that scored under 5.",
                self.yellow.apply_to("Focus areas:")
            )?;
        }
        Ok(())
    }

    fn render_evaluation(
        &mut self,
        number: usize,
        question: &str,
        answer: &str,
        eval: &Evaluation,
    ) -> io::Result<()> {
        let badge = self
            .band_style(ScoreBand::of(eval.score))
            .apply_to(format!("{}/10", format_score(eval.score)));
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{badge}  {}",
            self.blue.apply_to(format!("Question {number}"))
        )?;
        writeln!(self.output, "  {question}")?;
        writeln!(self.output, "  {}", self.dim.apply_to("Your answer:"))?;
        for line in answer.lines() {
            writeln!(self.output, "    {line}")?;
        }
        if !eval.strengths.is_empty() {
            writeln!(self.output, "  {}", self.green.apply_to("Strengths"))?;
            for item in &eval.strengths {
                writeln!(self.output, "    + {item}")?;
            }
        }
        if !eval.weaknesses.is_empty() {
            writeln!(self.output, "  {}", self.yellow.apply_to("Areas for improvement"))?;
            for item in &eval.weaknesses {
                writeln!(self.output, "    - {item}")?;
            }
        }
        if !eval.improved_answer.is_empty() {
            writeln!(self.output, "  {}", self.blue.apply_to("Improved answer example"))?;
            writeln!(self.output, "    {}", eval.improved_answer)?;
        }
        Ok(())
    }

    /// Tela de resultados: resumo e feedback detalhado por pergunta.
    pub fn render_results(&mut self, session: &SessionState) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.green.apply_to("Interview Complete"))?;
        self.render_summary(&session.summary())?;

        writeln!(self.output)?;
        writeln!(self.output, "{}", self.blue.apply_to("─── Detailed Feedback ───"))?;
        for (record, eval) in session.answers().iter().zip(session.evaluations()) {
            self.render_evaluation(
                record.question_index + 1,
                &record.question,
                &record.answer,
                eval,
            )?;
        }
        Ok(())
    }

    /// Lista numerada de perguntas para o subcomando `questions`.
    pub fn render_question_list(&mut self, questions: &[String]) -> io::Result<()> {
        for (i, question) in questions.iter().enumerate() {
            writeln!(
                self.output,
                "{} {question}",
                self.blue.apply_to(format!("{:>2}.", i + 1))
            )?;
        }
        Ok(())
    }
}

/// Notas inteiras aparecem sem casa decimal ("7"), as demais com uma ("6.5").
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}
