//! Interactive prompts.
//!
//! Workflows talk to a [`Prompt`] so they can be driven from the terminal or
//! from a scripted queue of answers.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

pub trait Prompt {
    /// Reads a line of free text, trimmed. Empty input yields an empty string.
    fn input(&self, label: &str) -> io::Result<String>;

    /// Like [`Prompt::input`] but without echoing what is typed.
    fn secret(&self, label: &str) -> io::Result<String>;

    /// Asks a yes/no question until a recognized answer is given.
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// Maps an answer to a yes/no decision; `None` when unrecognized.
pub fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Returns `answer`, or `current` when the answer is empty.
pub fn keep_if_empty(answer: String, current: &str) -> String {
    if answer.is_empty() {
        current.to_string()
    } else {
        answer
    }
}

fn dialoguer_error(e: dialoguer::Error) -> io::Error {
    io::Error::other(e)
}

/// Prompts on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompt for TerminalPrompt {
    fn input(&self, label: &str) -> io::Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(dialoguer_error)?;
        Ok(answer.trim().to_string())
    }

    fn secret(&self, label: &str) -> io::Result<String> {
        let answer = Password::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map_err(dialoguer_error)?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, question: &str) -> io::Result<bool> {
        let label = format!("{question} (y/n)");
        loop {
            let answer = self.input(&label)?;
            match parse_confirmation(&answer) {
                Some(decision) => return Ok(decision),
                None => eprintln!("{}", "Please enter y or n.".red()),
            }
        }
    }
}

/// Answers prompts from a fixed queue.
///
/// `input` and `secret` consume text answers; `confirm` consumes the next
/// answer and skips unrecognized ones the way the terminal loop re-asks.
/// Running out of answers is reported as an `UnexpectedEof` error.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Labels and questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, label: &str) -> io::Result<String> {
        self.asked.borrow_mut().push(label.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .map(|a| a.trim().to_string())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no scripted answer for {label:?}"),
                )
            })
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&self, label: &str) -> io::Result<String> {
        self.next(label)
    }

    fn secret(&self, label: &str) -> io::Result<String> {
        self.next(label)
    }

    fn confirm(&self, question: &str) -> io::Result<bool> {
        loop {
            if let Some(decision) = parse_confirmation(&self.next(question)?) {
                return Ok(decision);
            }
        }
    }
}
