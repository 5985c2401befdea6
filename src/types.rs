//! This module defines the core value types shared by the parser, the simulators and the
//! report layer: states, symbols, the machine classification and the error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Rule;

/// The lowest printable ASCII code a transition symbol may use.
pub const MIN_SYMBOL_CODE: u32 = 32;
/// The highest printable ASCII code a transition symbol may use.
pub const MAX_SYMBOL_CODE: u32 = 126;
/// File extension of machine description files.
pub const DESCRIPTION_EXTENSION: &str = "fa";

/// A canonical state identifier in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub u8);

impl State {
    /// Every run starts here.
    pub const START: State = State(0);
    /// The implicit non-accepting sink reached by any undeclared transition.
    pub const DEAD: State = State(255);
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for State {
    type Err = std::num::ParseIntError;

    /// Parses a state field, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map(State)
    }
}

/// A transition label: a printable character, or epsilon for a move that consumes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Parses a symbol field. The field must be exactly one character in the printable
    /// ASCII range; anything else is `None`.
    pub fn parse(field: &str) -> Option<Symbol> {
        let mut chars = field.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_printable(c) => Some(Symbol::Char(c)),
            _ => None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Checks whether a character lies in the printable ASCII range accepted as a symbol.
pub fn is_printable(c: char) -> bool {
    (MIN_SYMBOL_CODE..=MAX_SYMBOL_CODE).contains(&(c as u32))
}

/// The kind of machine a description encodes.
///
/// Variants are ordered by dominance: `Invalid > Nondeterministic > Deterministic`.
/// A classification only ever moves up this order, see [`Classification::merge`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Classification {
    #[default]
    Deterministic,
    Nondeterministic,
    Invalid,
}

impl Classification {
    /// Combines two classifications, keeping the dominant one.
    pub fn merge(self, other: Classification) -> Classification {
        self.max(other)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Classification::Invalid)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Deterministic => "DFA",
            Classification::Nondeterministic => "NFA",
            Classification::Invalid => "INVALID",
        };
        write!(f, "{name}")
    }
}

/// Represents the failures the crate reports to its callers.
///
/// Malformed lines, out-of-domain values and missing transitions are not errors: they are
/// absorbed into the classification or the dead-state default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// The description or string source could not be read.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    /// The description text could not be matched by the grammar at all.
    #[error("Description parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A simulation was requested against a machine classified as invalid.
    #[error("Invalid machine: {0}")]
    InvalidMachine(String),
    /// The nondeterministic search explored more configurations than allowed.
    #[error("Search exceeded the limit of {0} steps")]
    StepLimitExceeded(usize),
    /// Results could not be written.
    #[error("File error: {0}")]
    FileError(String),
}
