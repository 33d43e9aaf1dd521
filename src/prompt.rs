//! Yes/no confirmation boundary.
use crate::error::{Result, ScaffoldError};
use inquire::{Confirm, InquireError};

/// Answers the executor's yes/no questions.
pub trait Confirmer {
    /// Ask `question`; `default` is the answer on empty input.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Interactive prompts on the terminal.
///
/// When stdin is not a terminal every question takes its default, so
/// scripted runs never block. Redirected stdout still prompts.
#[derive(Debug, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        match Confirm::new(question).with_default(default).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::NotTTY) => {
                tracing::info!(question, default, "stdin is not a terminal; using default answer");
                Ok(default)
            }
            Err(err) => Err(ScaffoldError::Prompt(err.to_string())),
        }
    }
}

/// Answers every question the same way (`--yes`, or tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmer(pub bool);

impl Confirmer for FixedConfirmer {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        tracing::debug!(question, answer = self.0, "answered without prompting");
        Ok(self.0)
    }
}

/// Replays scripted answers in order and records the questions asked.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    /// Once the script runs out, questions take their default.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(default))
    }
}
