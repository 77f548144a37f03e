use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::core::{Context, ParseResult, parse_expression},
    },
};

/// Parses one complete statement from a token sequence.
///
/// The sequence normally ends with [`Token::Eof`], as produced by
/// [`crate::interpreter::lexer::tokenize`]; without one, input is taken to end
/// just after the last token. After the statement itself only `Eof` may
/// remain; anything else is reported as
/// [`ParseError::UnexpectedTrailingTokens`].
///
/// # Errors
/// - [`ParseError::EmptyStatement`] if the sequence holds nothing but `Eof`.
/// - [`ParseError::NestingTooDeep`] past
///   [`MAX_NESTING`](crate::interpreter::parser::core::MAX_NESTING) levels.
/// - Any error from [`parse_statement`].
/// - [`ParseError::UnexpectedTrailingTokens`] for leftover tokens.
///
/// # Example
/// ```
/// use stackcalc::interpreter::{lexer::tokenize, parser::statement::parse};
///
/// let tokens = tokenize("x = 2 + 3 * 4").unwrap();
/// let statement = parse(&tokens).unwrap();
/// assert_eq!(statement.to_string(), "x = (2 + (3 * 4))");
/// ```
pub fn parse(tokens: &[Spanned]) -> ParseResult<Statement> {
    let cx = Context::for_tokens(tokens);
    let mut iter = tokens.iter().peekable();

    if matches!(iter.peek(), Some((Token::Eof, _)) | None) {
        return Err(ParseError::EmptyStatement { position: cx.end() });
    }

    let statement = parse_statement(&mut iter, cx)?;

    match iter.next() {
        Some((Token::Eof, _)) | None => Ok(statement),
        Some((token, position)) => {
            Err(ParseError::UnexpectedTrailingTokens { token:    token.to_string(),
                                                       position: *position, })
        },
    }
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `print` statement: `print <expression>`.
/// - an assignment: `<identifier> = <expression>`.
/// - an expression used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. If none match, the input is parsed as an expression statement.
/// Trailing tokens are left in the stream for the caller to inspect.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, position)` pairs.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if let Some(statement) = parse_print(tokens, cx)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens, cx)? {
        return Ok(statement);
    }

    let expr = parse_expression(tokens, cx)?;
    Ok(Statement::Expression { expr })
}

/// Parses a `print` statement.
///
/// `print(x + 1)` needs no special handling: the parenthesized expression is
/// an ordinary primary.
///
/// # Returns
/// - `Ok(Some(statement))` if the stream starts with `print`,
/// - `Ok(None)` otherwise, with nothing consumed.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if let Some((Token::Print, position)) = tokens.peek() {
        tokens.next();
        let expr = parse_expression(tokens, cx)?;
        return Ok(Some(Statement::Print { expr,
                                          position: *position }));
    }
    Ok(None)
}

/// Parses an assignment of the form `<identifier> = <expression>`.
///
/// An assignment is recognised only when the identifier is immediately
/// followed by `=`; the lookahead runs on a clone of the iterator so nothing
/// is consumed when the statement turns out to be an expression.
///
/// # Returns
/// - `Ok(Some(statement))` if an assignment was parsed,
/// - `Ok(None)` if the stream does not start with `<identifier> =`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                           cx: Context)
                           -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if let Some((Token::Identifier(name), position)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();
        if let Some((Token::Assign, _)) = lookahead.peek() {
            tokens.next();
            tokens.next();

            let value = parse_expression(tokens, cx)?;
            return Ok(Some(Statement::Assign { name: name.clone(),
                                               value,
                                               position: *position }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Expr, interpreter::lexer::tokenize};

    fn parse_str(source: &str) -> ParseResult<Statement> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn assignment() {
        let statement = parse_str("total = 2 + 3*4").unwrap();
        match statement {
            Statement::Assign { name, value, position } => {
                assert_eq!(name, "total");
                assert_eq!(position, 0);
                assert_eq!(value.to_string(), "(2 + (3 * 4))");
            },
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn print_with_and_without_parentheses() {
        assert_eq!(parse_str("print x + 1").unwrap().to_string(), "print (x + 1)");
        assert_eq!(parse_str("print( (1+2)^3 - 4/5 )").unwrap().to_string(),
                   "print (((1 + 2) ^ 3) - (4 / 5))");
    }

    #[test]
    fn identifier_without_assign_is_an_expression() {
        assert_eq!(parse_str("x").unwrap(),
                   Statement::Expression { expr: Expr::Variable { name:     "x".into(),
                                                                  position: 0, }, });
        assert_eq!(parse_str("x + 1").unwrap().to_string(), "(x + 1)");
    }

    #[test]
    fn assignment_only_at_statement_start() {
        let err = parse_str("1 + x = 2").unwrap_err();
        assert_eq!(err,
                   ParseError::UnexpectedTrailingTokens { token:    "'='".into(),
                                                          position: 6, });

        let err = parse_str("print x = 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedTrailingTokens { position: 8, .. }));
    }

    #[test]
    fn print_cannot_be_assigned() {
        let err = parse_str("print = 1").unwrap_err();
        assert_eq!(err,
                   ParseError::UnexpectedToken { token:    "'='".into(),
                                                 position: 6, });
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(parse_str("2 3").unwrap_err(),
                         ParseError::UnexpectedTrailingTokens { position: 2, .. }));
        assert!(matches!(parse_str("(1 + 2))").unwrap_err(),
                         ParseError::UnexpectedTrailingTokens { position: 7, .. }));
    }

    #[test]
    fn incomplete_statements() {
        assert_eq!(parse_str("2 +").unwrap_err(),
                   ParseError::UnexpectedEndOfInput { position: 3 });
        assert_eq!(parse_str("x =").unwrap_err(),
                   ParseError::UnexpectedEndOfInput { position: 3 });
        assert_eq!(parse_str("print").unwrap_err(),
                   ParseError::UnexpectedEndOfInput { position: 5 });
        assert!(matches!(parse_str("(1+2").unwrap_err(),
                         ParseError::ExpectedClosingParen { .. }));
    }

    #[test]
    fn empty_statement() {
        assert_eq!(parse_str("  ").unwrap_err(),
                   ParseError::EmptyStatement { position: 2 });
    }

    #[test]
    fn slice_without_eof() {
        assert_eq!(parse(&[]).unwrap_err(), ParseError::EmptyStatement { position: 0 });

        let tokens = [(Token::Identifier("x".into()), 0), (Token::Assign, 2)];
        assert_eq!(parse(&tokens).unwrap_err(),
                   ParseError::UnexpectedEndOfInput { position: 3 });

        let tokens = [(Token::Number(4.0), 0)];
        assert_eq!(parse(&tokens).unwrap().to_string(), "4");
    }

    #[test]
    fn nesting_limit_applies_to_every_statement_kind() {
        let deep = "(".repeat(100_000);
        for source in [deep.clone(), format!("x = {deep}"), format!("print {deep}")] {
            assert!(matches!(parse_str(&source).unwrap_err(), ParseError::NestingTooDeep { .. }));
        }
    }
}
