/// Lexical errors.
///
/// Raised by the tokenizer when it meets a character that does not start any
/// token of the language.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building a statement tree
/// from tokens: unexpected tokens, a missing closing parenthesis, premature
/// end of input, and tokens left over after a complete statement.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while the virtual machine runs
/// a bytecode sequence. Besides user-facing failures such as division by zero
/// this includes stack discipline violations, which point at a code
/// generation defect rather than bad input.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any failure of the statement pipeline.
///
/// Each stage fails fast with its own error type; this enum is what callers
/// of [`crate::run_statement`] and [`crate::compile`] see.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token sequence.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The virtual machine failed while executing.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Coarse classification of an [`Error`], suitable for matching in drivers
/// and tests without caring about the details of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An unrecognized character.
    Lex,
    /// A malformed statement.
    Parse,
    /// A variable was read before it was assigned.
    UndefinedVariable,
    /// Division with a zero divisor.
    DivisionByZero,
    /// An instruction popped from an empty stack.
    StackUnderflow,
    /// More than one value was left on the stack.
    UnbalancedStack,
    /// A statement finished without producing the value it promised.
    MissingValue,
}

impl Error {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Runtime(error) => match error {
                RuntimeError::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
                RuntimeError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
                RuntimeError::StackUnderflow { .. } => ErrorKind::StackUnderflow,
                RuntimeError::UnbalancedStack { .. } => ErrorKind::UnbalancedStack,
                RuntimeError::MissingValue => ErrorKind::MissingValue,
            },
        }
    }

    /// Returns the byte offset in the input line the error points at, if the
    /// failing stage knows one. Runtime errors refer to instructions, not to
    /// source text, and therefore carry no position.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Lex(error) => Some(error.position()),
            Self::Parse(error) => Some(error.position()),
            Self::Runtime(_) => None,
        }
    }

    /// Returns `true` for failures that indicate a defect in the pipeline
    /// itself rather than in the user's input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind(),
                 ErrorKind::StackUnderflow | ErrorKind::UnbalancedStack | ErrorKind::MissingValue)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lex => "LexError",
            Self::Parse => "ParseError",
            Self::UndefinedVariable => "UndefinedVariable",
            Self::DivisionByZero => "DivisionByZero",
            Self::StackUnderflow => "StackUnderflow",
            Self::UnbalancedStack => "UnbalancedStack",
            Self::MissingValue => "MissingValue",
        };
        f.write_str(name)
    }
}
