//! Interactive terminal front-end.
//!
//! Renders the session after every action and maps lines of user input to
//! controller calls. The controller decides whether an action is allowed;
//! this module only reads, writes and forwards.

use crate::render;
use anyhow::{Context, Result};
use coach_core::{Action, Difficulty, Phase, Role, SessionController};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
enum ConfigCommand {
    Start,
    SetRole(Role),
    SetDifficulty(Difficulty),
    Quit,
    Invalid(String),
}

impl ConfigCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        match head.to_lowercase().as_str() {
            "" | "start" => ConfigCommand::Start,
            "quit" | "exit" | "q" => ConfigCommand::Quit,
            "role" => match rest.parse() {
                Ok(role) => ConfigCommand::SetRole(role),
                Err(e) => ConfigCommand::Invalid(format!("{}", e)),
            },
            "difficulty" => match rest.parse() {
                Ok(difficulty) => ConfigCommand::SetDifficulty(difficulty),
                Err(e) => ConfigCommand::Invalid(format!("{}", e)),
            },
            other => ConfigCommand::Invalid(format!("Unknown command '{}'", other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum FeedbackCommand {
    Next,
    Settings,
    Quit,
    Invalid(String),
}

impl FeedbackCommand {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" | "next" | "n" => FeedbackCommand::Next,
            "settings" | "reset" | "s" => FeedbackCommand::Settings,
            "quit" | "exit" | "q" => FeedbackCommand::Quit,
            other => FeedbackCommand::Invalid(format!("Unknown command '{}'", other)),
        }
    }
}

/// Runs the interview loop until the user quits or input ends.
pub struct TerminalApp<'a, R, W> {
    controller: &'a SessionController,
    lines: Lines<R>,
    out: W,
}

impl<'a, R, W> TerminalApp<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(controller: &'a SessionController, input: R, out: W) -> Self {
        Self {
            controller,
            lines: input.lines(),
            out,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            let state = self.controller.snapshot().await;
            write!(self.out, "\n{}", render::screen(&state))?;

            let keep_going = match state.phase {
                Phase::Config => self.config_turn().await?,
                Phase::Question => self.question_turn(&state.answer).await?,
                Phase::Feedback => self.feedback_turn().await?,
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()?;
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        self.lines
            .next_line()
            .await
            .context("Failed to read user input")
    }

    async fn config_turn(&mut self) -> Result<bool> {
        let Some(line) = self.read_line("> ").await? else {
            return Ok(false);
        };
        match ConfigCommand::parse(&line) {
            ConfigCommand::Start => {
                writeln!(self.out, "{}", render::busy(Action::GenerateQuestion))?;
                let transition = self.controller.start_interview().await;
                debug!(?transition, "start_interview finished");
            }
            ConfigCommand::SetRole(role) => {
                self.controller.set_role(role).await;
            }
            ConfigCommand::SetDifficulty(difficulty) => {
                self.controller.set_difficulty(difficulty).await;
            }
            ConfigCommand::Quit => return Ok(false),
            ConfigCommand::Invalid(message) => writeln!(self.out, "{}", message)?,
        }
        Ok(true)
    }

    /// Collects a multi-line answer terminated by an empty line.
    async fn question_turn(&mut self, previous_answer: &str) -> Result<bool> {
        let mut answer_lines = Vec::new();
        loop {
            let prompt = if answer_lines.is_empty() { "> " } else { "| " };
            let Some(line) = self.read_line(prompt).await? else {
                return Ok(false);
            };
            if line.trim() == ":quit" {
                return Ok(false);
            }
            if line.trim().is_empty() {
                break;
            }
            answer_lines.push(line);
        }

        let answer = if answer_lines.is_empty() {
            previous_answer.to_string()
        } else {
            answer_lines.join("\n")
        };
        self.controller.set_answer_draft(answer.clone()).await;
        if !self.controller.snapshot().await.can_submit() {
            writeln!(self.out, "Answer cannot be empty.")?;
            return Ok(true);
        }

        writeln!(self.out, "{}", render::busy(Action::EvaluateAnswer))?;
        let transition = self.controller.submit_answer(&answer).await;
        debug!(?transition, "submit_answer finished");
        Ok(true)
    }

    async fn feedback_turn(&mut self) -> Result<bool> {
        let Some(line) = self.read_line("> ").await? else {
            return Ok(false);
        };
        match FeedbackCommand::parse(&line) {
            FeedbackCommand::Next => {
                writeln!(self.out, "{}", render::busy(Action::GenerateQuestion))?;
                let transition = self.controller.next_question().await;
                debug!(?transition, "next_question finished");
            }
            FeedbackCommand::Settings => {
                self.controller.full_reset().await;
            }
            FeedbackCommand::Quit => return Ok(false),
            FeedbackCommand::Invalid(message) => writeln!(self.out, "{}", message)?,
        }
        Ok(true)
    }
}
