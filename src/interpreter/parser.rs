/// Core parsing definitions shared by all grammar levels.
///
/// Declares the parser's result type, the [`core::Context`] that bounds
/// nesting, and the entry point for parsing a full expression, which starts
/// at the lowest-precedence level.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative levels and the
/// right-associative power level, and maps tokens to [`crate::ast::BinaryOperator`].
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix signs, numeric literals, variable references and
/// parenthesized sub-expressions.
pub mod unary;

/// Statement parsing.
///
/// Recognises `print` statements and assignments, falls back to bare
/// expressions, and rejects tokens left over after a complete statement.
pub mod statement;
