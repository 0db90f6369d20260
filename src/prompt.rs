//! Prompt collaborators
//!
//! The resolver hands every question of one node to a [`Prompter`] in a single
//! call and blocks until all of them are answered.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::bindings::Bindings;
use crate::error::PromptError;
use crate::question::{Choice, Question, QuestionKind};

pub trait Prompter {
    /// Answer every question, keyed by question id.
    fn ask(&mut self, questions: &[Question]) -> Result<Bindings, PromptError>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, questions: &[Question]) -> Result<Bindings, PromptError> {
        (**self).ask(questions)
    }
}

/// Line-based prompts over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// One line without its terminator; `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask_text(&mut self, question: &Question) -> Result<String, PromptError> {
        let hint = question
            .default
            .as_deref()
            .map(|d| format!(" [{}]", d))
            .unwrap_or_default();
        write!(
            self.output,
            "{} {}{}: ",
            "?".green(),
            question.prompt.bold(),
            hint.dimmed()
        )?;
        self.output.flush()?;

        let line = self.read_line()?.ok_or_else(|| PromptError::Closed {
            variable: question.id.clone(),
        })?;

        if line.is_empty() {
            return Ok(question.default.clone().unwrap_or_default());
        }
        Ok(line)
    }

    fn ask_select(&mut self, question: &Question, choices: &[Choice]) -> Result<String, PromptError> {
        if choices.is_empty() {
            return self.ask_text(question);
        }

        let default_index = match question.default.as_deref() {
            Some(default) => choices
                .iter()
                .position(|c| c.value == default)
                .ok_or_else(|| PromptError::InvalidDefault {
                    variable: question.id.clone(),
                    default: default.to_string(),
                })?,
            None => 0,
        };

        writeln!(self.output, "{} {}", "?".green(), question.prompt.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if i == default_index { ">" } else { " " };
            writeln!(self.output, "  {} {}) {}", marker.cyan(), i + 1, choice.label)?;
        }

        loop {
            write!(
                self.output,
                "  Select 1-{} {}: ",
                choices.len(),
                format!("[{}]", default_index + 1).dimmed()
            )?;
            self.output.flush()?;

            let line = self.read_line()?.ok_or_else(|| PromptError::Closed {
                variable: question.id.clone(),
            })?;
            let input = line.trim();

            if input.is_empty() {
                return Ok(choices[default_index].value.clone());
            }
            if let Some(choice) = pick_choice(choices, input) {
                return Ok(choice.value.clone());
            }
            writeln!(self.output, "  {} '{}'", "Invalid choice".red(), input)?;
        }
    }
}

/// Accepts a 1-based index or a choice value.
fn pick_choice<'a>(choices: &'a [Choice], input: &str) -> Option<&'a Choice> {
    if let Ok(n) = input.parse::<usize>() {
        if (1..=choices.len()).contains(&n) {
            return Some(&choices[n - 1]);
        }
    }
    choices.iter().find(|c| c.value == input)
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, questions: &[Question]) -> Result<Bindings, PromptError> {
        let mut answers = Bindings::new();
        for question in questions {
            let answer = match &question.kind {
                QuestionKind::Text => self.ask_text(question)?,
                QuestionKind::Select { choices } => self.ask_select(question, choices)?,
            };
            answers.insert(question.id.clone(), answer);
        }
        Ok(answers)
    }
}

/// Answers from a fixed table, falling back to each question's default, then
/// to the first choice, then to the empty string. Answers are not checked
/// against the declared choices.
#[derive(Debug, Default)]
pub struct StaticPrompter {
    answers: Bindings,
    /// Question ids of every `ask` call, in order
    pub asked: Vec<Vec<String>>,
}

impl StaticPrompter {
    pub fn new(answers: Bindings) -> Self {
        Self {
            answers,
            asked: Vec::new(),
        }
    }
}

impl Prompter for StaticPrompter {
    fn ask(&mut self, questions: &[Question]) -> Result<Bindings, PromptError> {
        self.asked
            .push(questions.iter().map(|q| q.id.clone()).collect());

        Ok(questions
            .iter()
            .map(|q| {
                let answer = self
                    .answers
                    .get(&q.id)
                    .map(str::to_string)
                    .or_else(|| q.default.clone())
                    .or_else(|| q.choices().first().map(|c| c.value.clone()))
                    .unwrap_or_default();
                (q.id.clone(), answer)
            })
            .collect())
    }
}
