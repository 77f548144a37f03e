use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::binary::parse_additive,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts.
///
/// Counts parentheses, stacked signs and chained exponents together with the
/// height of left-associative operator chains. Every recursive walk of a
/// parsed tree is bounded by it, which keeps the native stack safe.
pub const MAX_NESTING: usize = 256;

/// Parser state that travels alongside the token iterator.
///
/// A `Context` is `Copy`; descending into a nested construct produces a new
/// value through [`Context::deeper`] and leaves the caller's untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    depth: usize,
    end:   usize,
}

impl Context {
    /// Creates the top-level context for `tokens`.
    ///
    /// The end of input is the offset of the trailing [`Token::Eof`], or the
    /// offset just past the last token when the slice carries none.
    #[must_use]
    pub fn for_tokens(tokens: &[Spanned]) -> Self {
        let end = tokens.last()
                        .map_or(0, |(token, position)| position + token.width());
        Self { depth: 0, end }
    }

    /// Enters one nesting level at the token found at `position`.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] once [`MAX_NESTING`] levels are open.
    pub fn deeper(self, position: usize) -> ParseResult<Self> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    position });
        }
        Ok(Self { depth: self.depth + 1,
                  ..self })
    }

    /// Checks that an operator chain of `height` fits below the current
    /// nesting level.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] pointing at the operator at `position`.
    pub fn fits(self, height: usize, position: usize) -> ParseResult<()> {
        if self.depth + height > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    position });
        }
        Ok(())
    }

    /// Byte offset of the end of input.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// The error for input that stops where more tokens were required.
    #[must_use]
    pub const fn end_of_input(self) -> ParseError {
        ParseError::UnexpectedEndOfInput { position: self.end }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_additive(tokens, cx)
}

/// Builds the error for a token that cannot appear where it was found.
///
/// Reaching [`Token::Eof`] is reported as an unexpected end of input; any
/// other token as an unexpected token.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, position: usize) -> ParseError {
    match token {
        Token::Eof => ParseError::UnexpectedEndOfInput { position },
        _ => ParseError::UnexpectedToken { token: token.to_string(),
                                           position },
    }
}
