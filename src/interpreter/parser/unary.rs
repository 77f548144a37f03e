use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            binary::parse_power,
            core::{Context, ParseResult, parse_expression, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators:
/// - `-` (numeric negation)
/// - `+` (identity; no node is produced)
///
/// Unary operators are right-associative and may be stacked, so `--x` is
/// parsed as `-(-x)`. If no prefix operator is present, the function
/// delegates to [`parse_power`], which keeps `^` tighter than a sign. Every
/// stacked sign opens one nesting level.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// An [`Expr::UnaryMinus`] or the power-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.peek() {
        Some((Token::Minus, position)) => {
            tokens.next();
            let operand = parse_unary(tokens, cx.deeper(*position)?)?;
            Ok(Expr::negate(operand, *position))
        },
        Some((Token::Plus, position)) => {
            tokens.next();
            parse_unary(tokens, cx.deeper(*position)?)
        },
        _ => parse_power(tokens, cx),
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric literals
/// - variable references
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | IDENTIFIER
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (token, position) = tokens.next().ok_or_else(|| cx.end_of_input())?;

    match token {
        Token::Number(value) => Ok(Expr::Number { value:    *value,
                                                  position: *position, }),
        Token::Identifier(name) => Ok(Expr::Variable { name:     name.clone(),
                                                       position: *position, }),
        Token::LParen => parse_grouping(tokens, cx.deeper(*position)?),
        tok => Err(unexpected(tok, *position)),
    }
}

/// Parses the remainder of a parenthesized expression.
///
/// The opening `(` has already been consumed. The inner expression is parsed
/// with [`parse_expression`] and must be followed by `)`.
///
/// # Errors
/// Returns [`ParseError::ExpectedClosingParen`] when anything other than `)`
/// follows the inner expression, including the end of input.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let expr = parse_expression(tokens, cx)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((tok, position)) => Err(ParseError::ExpectedClosingParen { found:    tok.to_string(),
                                                                        position: *position, }),
        None => Err(cx.end_of_input()),
    }
}
