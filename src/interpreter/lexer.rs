use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the input line.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Tokens are paired with the byte offset they start at, see [`Spanned`].
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literals such as `42`, `3.14` or `7.`. At most one decimal
    /// point is consumed, so `1.2.3` lexes as `1.2` followed by a stray `.`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    Number(f64),
    /// `print`
    #[token("print")]
    Print,
    /// Identifier tokens; variable names such as `x` or `total_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Assign,
    /// End of input. Never matched by the scanner; [`Tokenizer`] appends it.
    Eof,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// A token together with the byte offset of its first character.
pub type Spanned = (Token, usize);

/// Result type produced by the tokenizer.
pub type LexResult<T> = Result<T, LexError>;

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {value}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Print => f.write_str("'print'"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Caret => f.write_str("'^'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Assign => f.write_str("'='"),
            Self::Eof | Self::Ignored => f.write_str("end of input"),
        }
    }
}

impl Token {
    /// Number of bytes the token occupies in its canonical spelling.
    ///
    /// Exact for everything but numbers, which are measured as `f64` renders
    /// them (`7.` counts as one byte). [`Token::Eof`] is zero-width.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Number(value) => value.to_string().len(),
            Self::Identifier(name) => name.len(),
            Self::Print => "print".len(),
            Self::Eof | Self::Ignored => 0,
            _ => 1,
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Lazy token stream over one input line.
///
/// Yields `Ok((token, position))` pairs in input order, then exactly one
/// [`Token::Eof`] positioned at the input length, then `None`. The first
/// unrecognized character is reported as [`LexError::UnexpectedCharacter`]
/// and ends the stream.
///
/// The tokenizer is `Clone`; a clone resumes scanning from the point it was
/// taken, which makes the sequence restartable.
///
/// # Example
/// ```
/// use stackcalc::interpreter::lexer::{Token, Tokenizer};
///
/// let kinds: Vec<Token> = Tokenizer::new("x = 2")
///     .map(|item| item.map(|(token, _)| token))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("x".into()), Token::Assign, Token::Number(2.0), Token::Eof]);
/// ```
#[derive(Clone)]
pub struct Tokenizer<'src> {
    lexer:    logos::Lexer<'src, Token>,
    finished: bool,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer:    Token::lexer(source),
               finished: false, }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = LexResult<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lexer.next() {
            Some(Ok(token)) => Some(Ok((token, self.lexer.span().start))),
            Some(Err(())) => {
                self.finished = true;
                let position = self.lexer.span().start;
                let character = self.lexer.slice().chars().next().unwrap_or('\0');
                Some(Err(LexError::UnexpectedCharacter { character, position }))
            },
            None => {
                self.finished = true;
                Some(Ok((Token::Eof, self.lexer.source().len())))
            },
        }
    }
}

/// Tokenizes a whole line eagerly.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
pub fn tokenize(source: &str) -> LexResult<Vec<Spanned>> {
    Tokenizer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn operators_and_punctuation() {
        assert_eq!(kinds("+-*/^()="),
                   vec![Token::Plus,
                        Token::Minus,
                        Token::Star,
                        Token::Slash,
                        Token::Caret,
                        Token::LParen,
                        Token::RParen,
                        Token::Assign,
                        Token::Eof]);
    }

    #[test]
    fn numbers_take_at_most_one_decimal_point() {
        assert_eq!(kinds("12 3.5 7."),
                   vec![Token::Number(12.0), Token::Number(3.5), Token::Number(7.0), Token::Eof]);

        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(err,
                   LexError::UnexpectedCharacter { character: '.',
                                                   position:  3, });
    }

    #[test]
    fn print_is_reserved_but_longer_identifiers_are_not() {
        assert_eq!(kinds("print printer _tmp x1"),
                   vec![Token::Print,
                        Token::Identifier("printer".into()),
                        Token::Identifier("_tmp".into()),
                        Token::Identifier("x1".into()),
                        Token::Eof]);
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("  x =\t10").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|(_, pos)| *pos).collect();
        assert_eq!(positions, vec![2, 4, 6, 8]);
    }

    #[test]
    fn widths_match_the_source_text() {
        let source = "print total + 12";
        let tokens = tokenize(source).unwrap();
        for (token, position) in &tokens {
            let text = &source[*position..*position + token.width()];
            assert_eq!(text.trim(), text, "{token} spans {text:?}");
        }
        assert_eq!(Token::Print.width(), 5);
        assert_eq!(Token::Identifier("total".into()).width(), 5);
        assert_eq!(Token::Number(12.0).width(), 2);
        assert_eq!(Token::Eof.width(), 0);
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(tokenize("   ").unwrap(), vec![(Token::Eof, 3)]);
    }

    #[test]
    fn unknown_character_is_reported_with_position() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(err,
                   LexError::UnexpectedCharacter { character: '$',
                                                   position:  2, });
    }

    #[test]
    fn stream_ends_after_eof() {
        let mut tokenizer = Tokenizer::new("1");
        assert!(matches!(tokenizer.next(), Some(Ok((Token::Number(_), 0)))));
        assert!(matches!(tokenizer.next(), Some(Ok((Token::Eof, 1)))));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn stream_ends_after_error() {
        let mut tokenizer = Tokenizer::new("# 1");
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn clone_restarts_from_the_same_point() {
        let mut tokenizer = Tokenizer::new("a + b");
        tokenizer.next();
        let rest: Vec<_> = tokenizer.clone().collect();
        let again: Vec<_> = tokenizer.collect();
        assert_eq!(rest, again);
        assert_eq!(rest.len(), 3);
    }
}
