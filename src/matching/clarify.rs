//! Sources of follow-up answers during refinement.
//!
//! The engine never reads from a terminal itself. When the candidate set is
//! ambiguous it asks a [`Clarifier`], which either declines or supplies more
//! symptoms.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::core::types::CandidateSet;
use crate::utils::validation::{is_affirmative, parse_symptom_list};

/// Answer to "do you want to enter more symptoms?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clarification {
    /// Stop refining and fall back to scorer reconciliation
    Decline,
    /// Symptoms to append to the session's symptom list
    MoreSymptoms(Vec<String>),
}

/// Provides follow-up answers for an ambiguous candidate set
pub trait Clarifier {
    /// Present `candidates` and ask for more symptoms.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the answer cannot be obtained. End of input
    /// is reported as `io::ErrorKind::UnexpectedEof`.
    fn clarify(&mut self, candidates: &CandidateSet) -> io::Result<Clarification>;
}

impl<C: Clarifier + ?Sized> Clarifier for &mut C {
    fn clarify(&mut self, candidates: &CandidateSet) -> io::Result<Clarification> {
        (**self).clarify(candidates)
    }
}

/// Line-oriented prompts over any reader and writer
pub struct ConsoleClarifier<R, W> {
    input: R,
    output: W,
}

impl ConsoleClarifier<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleClarifier<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` followed by " (yes/no): " and read the answer
    ///
    /// # Errors
    ///
    /// Returns an I/O error on write failure or end of input.
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} (yes/no): "))?;
        Ok(is_affirmative(&answer))
    }

    /// Print `prompt` and read a comma-separated symptom list
    ///
    /// # Errors
    ///
    /// Returns an I/O error on write failure or end of input.
    pub fn read_symptoms(&mut self, prompt: &str) -> io::Result<Vec<String>> {
        let line = self.prompt(prompt)?;
        Ok(parse_symptom_list(&line))
    }

    /// Write free-form text to the output
    ///
    /// # Errors
    ///
    /// Returns an I/O error on write failure.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Clarifier for ConsoleClarifier<R, W> {
    fn clarify(&mut self, candidates: &CandidateSet) -> io::Result<Clarification> {
        writeln!(self.output, "\nMore than one disease matches your symptoms:")?;
        for disease in candidates {
            writeln!(self.output, "- {disease}")?;
        }
        writeln!(self.output)?;

        if !self.ask_yes_no("Do you want to enter more symptoms?")? {
            return Ok(Clarification::Decline);
        }

        let symptoms = self.read_symptoms("Enter additional symptoms (comma-separated): ")?;
        Ok(Clarification::MoreSymptoms(symptoms))
    }
}

/// Replays a fixed sequence of answers and records every prompt
#[derive(Debug, Default)]
pub struct ScriptedClarifier {
    answers: VecDeque<Clarification>,
    prompts: Vec<CandidateSet>,
}

impl ScriptedClarifier {
    pub fn new(answers: impl IntoIterator<Item = Clarification>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Candidate sets presented so far, in order
    #[must_use]
    pub fn prompts(&self) -> &[CandidateSet] {
        &self.prompts
    }

    /// Answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Clarifier for ScriptedClarifier {
    fn clarify(&mut self, candidates: &CandidateSet) -> io::Result<Clarification> {
        self.prompts.push(candidates.clone());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answers left")
        })
    }
}
