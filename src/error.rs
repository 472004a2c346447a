//! Errors produced while turning a phonetic transcription into a phoneme buffer.

use thiserror::Error;

/// The input could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty phonetic input")]
    EmptyInput,
    #[error("unrecognized character {character:?} at position {position}")]
    UnrecognizedCharacter { position: usize, character: char },
    #[error("stress marker {character:?} at position {position} has no preceding phoneme")]
    StressWithoutPhoneme { position: usize, character: char },
}

/// A rule tried to leave the buffer in a state it can never legitimately be in.
///
/// These point at a defect in the rule code (or a caller driving the buffer
/// by hand), never at bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("stress {stress:#04x} at position {position} carries the reserved 0x80 flag")]
    InvalidStressFlag { position: usize, stress: u8 },
    #[error("position {position} is outside the {len} logical entries of the buffer")]
    OutOfBounds { position: usize, len: usize },
    #[error("the END sentinel cannot be written at position {position}")]
    EndSentinel { position: usize },
}

/// A custom descriptor table was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("descriptor table has no entries")]
    Empty,
    #[error("descriptor table has {count} entries, at most 81 are addressable")]
    TooManyDescriptors { count: usize },
    #[error("mnemonic {0:?} must be one or two ASCII characters")]
    InvalidMnemonic(alloc::string::String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("phoneme buffer overflow: all {capacity} slots are in use")]
    BufferOverflow { capacity: usize },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl Error {
    /// Returns `true` if the error comes from a logic defect rather than from the input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Invariant(_))
    }
}
