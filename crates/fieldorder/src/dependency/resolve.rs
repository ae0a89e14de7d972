//! Strategies for turning equivalent field pairs into strict orderings.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use super::cardinality::FieldPair;
use crate::error::{FieldOrderError, Result};

/// Chooses which field of an equivalence pair is primary.
///
/// The returned pair must contain the same two fields, primary first.
pub trait EquivalenceResolver {
    fn resolve(&mut self, pair: &FieldPair) -> Result<FieldPair>;
}

impl<F> EquivalenceResolver for F
where
    F: FnMut(&FieldPair) -> Result<FieldPair>,
{
    fn resolve(&mut self, pair: &FieldPair) -> Result<FieldPair> {
        self(pair)
    }
}

/// Resolve every pair, returning nothing unless all of them succeed.
pub fn resolve_equivalences<R>(pairs: &[FieldPair], resolver: &mut R) -> Result<Vec<FieldPair>>
where
    R: EquivalenceResolver + ?Sized,
{
    pairs
        .iter()
        .map(|pair| {
            let resolved = resolver.resolve(pair)?;
            if resolved == *pair || resolved == pair.flipped() {
                Ok(resolved)
            } else {
                Err(FieldOrderError::InvalidChoice {
                    choice: resolved.to_string(),
                    first: pair.first().to_string(),
                    second: pair.second().to_string(),
                })
            }
        })
        .collect()
}

/// Apply an index choice: 0 keeps the pair, 1 flips it.
pub fn choose(pair: &FieldPair, index: usize) -> Result<FieldPair> {
    match index {
        0 => Ok(pair.clone()),
        1 => Ok(pair.flipped()),
        other => Err(invalid_choice(pair, other.to_string())),
    }
}

fn invalid_choice(pair: &FieldPair, choice: String) -> FieldOrderError {
    FieldOrderError::InvalidChoice {
        choice,
        first: pair.first().to_string(),
        second: pair.second().to_string(),
    }
}

/// Keeps the canonical (alphabetical) order of every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl EquivalenceResolver for KeepOrder {
    fn resolve(&mut self, pair: &FieldPair) -> Result<FieldPair> {
        Ok(pair.clone())
    }
}

/// Prefers fields by their position in a priority list.
///
/// The member listed earliest becomes primary; pairs with no listed member
/// keep their canonical order.
#[derive(Debug, Clone, Default)]
pub struct FieldPriority {
    priority: Vec<String>,
}

impl FieldPriority {
    pub fn new<S: Into<String>>(priority: impl IntoIterator<Item = S>) -> Self {
        Self {
            priority: priority.into_iter().map(Into::into).collect(),
        }
    }

    fn rank(&self, field: &str) -> Option<usize> {
        self.priority.iter().position(|p| p == field)
    }
}

impl EquivalenceResolver for FieldPriority {
    fn resolve(&mut self, pair: &FieldPair) -> Result<FieldPair> {
        let index = match (self.rank(pair.first()), self.rank(pair.second())) {
            (Some(a), Some(b)) if b < a => 1,
            (None, Some(_)) => 1,
            _ => 0,
        };
        choose(pair, index)
    }
}

/// Asks an operator to pick the primary field of each pair.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line to the prompt stream.
    pub fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).map_err(FieldOrderError::Prompt)
    }
}

impl PromptResolver<StdinLock<'static>, Stderr> {
    /// Read choices from stdin and write prompts to stderr, leaving stdout
    /// free for reports.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> EquivalenceResolver for PromptResolver<R, W> {
    fn resolve(&mut self, pair: &FieldPair) -> Result<FieldPair> {
        writeln!(self.output, "{}", pair).map_err(FieldOrderError::Prompt)?;
        write!(
            self.output,
            "Choose index for primary field, 0 ({}) or 1 ({}): ",
            pair.first(),
            pair.second()
        )
        .map_err(FieldOrderError::Prompt)?;
        self.output.flush().map_err(FieldOrderError::Prompt)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(FieldOrderError::Prompt)?;

        let answer = line.trim();
        match answer.parse::<usize>() {
            Ok(index) => choose(pair, index),
            Err(_) => Err(invalid_choice(pair, answer.to_string())),
        }
    }
}
