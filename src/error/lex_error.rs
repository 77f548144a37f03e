use thiserror::Error;

/// Represents all errors that can occur while tokenizing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Found a character that does not begin any token.
    #[error("Error at position {position}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        position:  usize,
    },
}

impl LexError {
    /// Byte offset of the offending input.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. } => *position,
        }
    }
}
