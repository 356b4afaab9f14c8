//! Move vocabulary and cyclic dominance

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A move in Rock/Paper/Scissors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves in declared order. Every move-level tie-break uses this order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Position in `Move::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// The unique move that beats `self`
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn beats(self, other: Move) -> bool {
        other.counter() == self
    }

    /// Single-letter wire token
    pub fn token(self) -> &'static str {
        match self {
            Move::Rock => "R",
            Move::Paper => "P",
            Move::Scissors => "S",
        }
    }

    /// Parse a caller token where the empty string means "no previous move".
    ///
    /// Anything other than `""`, `R`, `P` or `S` is rejected rather than
    /// mapped onto a default move.
    pub fn parse_token(token: &str) -> Result<Option<Move>, ParseMoveError> {
        if token.is_empty() {
            return Ok(None);
        }
        token.parse().map(Some)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Move::Rock),
            "P" => Ok(Move::Paper),
            "S" => Ok(Move::Scissors),
            other => Err(ParseMoveError {
                token: other.to_string(),
            }),
        }
    }
}

/// A caller handed over something that is not a move token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMoveError {
    pub token: String,
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move token {:?} (expected R, P or S)", self.token)
    }
}

impl std::error::Error for ParseMoveError {}
