use thiserror::Error;

/// Represents all errors that can occur while parsing a statement.
///
/// Every variant carries the byte offset of the token that triggered it so
/// drivers can point at the offending spot in the input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error at position {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input where an operand was required.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at position {position}: Expected closing parenthesis ')' but found {found}.")]
    ExpectedClosingParen {
        /// The token found instead.
        found:    String,
        /// Byte offset of that token.
        position: usize,
    },
    /// Found extra tokens after a complete statement.
    #[error("Error at position {position}: Extra tokens after statement, starting at {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of that token.
        position: usize,
    },
    /// Parentheses, signs or operator chains nested deeper than the parser
    /// allows.
    #[error("Error at position {position}: Expression is nested too deeply (limit {limit}).")]
    NestingTooDeep {
        /// The nesting limit that was exceeded.
        limit:    usize,
        /// Byte offset of the token that went past the limit.
        position: usize,
    },
    /// The input contained no tokens at all.
    #[error("Error at position {position}: Empty statement.")]
    EmptyStatement {
        /// Byte offset of the end of input.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset of the token that caused the error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::EmptyStatement { position } => *position,
        }
    }
}
