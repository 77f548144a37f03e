use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{Context, ParseResult},
            unary::{parse_primary, parse_unary},
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// Each operator adds one level to the left-leaning tree, so the chain's
/// height is checked against the nesting limit as it grows.
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_multiplicative(tokens, cx)?;
    let mut height = left.height();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, cx)?;
            height = height.max(right.height()) + 1;
            cx.fits(height, *position)?;
            left = Expr::binary(left, op, right, *position);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`. Operands are unary
/// expressions, so `2 * -3` is accepted.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `cx`: Nesting depth and end-of-input offset.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_unary(tokens, cx)?;
    let mut height = left.height();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_unary(tokens, cx)?;
            height = height.max(right.height()) + 1;
            cx.fits(height, *position)?;
            left = Expr::binary(left, op, right, *position);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation.
///
/// The base is a primary expression and the exponent recurses through the
/// unary level, which gives `^` right-associativity (`2 ^ 3 ^ 2` parses as
/// `2 ^ (3 ^ 2)`) and lets it bind tighter than a leading minus (`-2 ^ 2`
/// parses as `-(2 ^ 2)`). A signed exponent such as `2 ^ -1` is accepted.
///
/// The rule is: `power := primary ("^" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `cx`: Nesting depth; the exponent is parsed one level deeper.
///
/// # Returns
/// An exponentiation expression tree, or the primary itself.
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, cx: Context) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let base = parse_primary(tokens, cx)?;
    if let Some((Token::Caret, position)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, cx.deeper(*position)?)?;
        return Ok(Expr::binary(base, BinaryOperator::Pow, exponent, *position));
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for every token that is not a binary operator.
///
/// # Example
/// ```
/// use stackcalc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Caret),
///            Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
