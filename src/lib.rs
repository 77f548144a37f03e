//! # stackcalc
//!
//! stackcalc evaluates arithmetic expressions and variable assignments by
//! compiling each statement to a small bytecode and running it on a stack
//! machine. The pipeline is tokenizer → recursive-descent parser → code
//! generator → virtual machine, with variables kept in an environment that
//! persists across statements.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Statement,
    error::{Error, ErrorKind, RuntimeError},
    interpreter::{
        bytecode::Instruction, codegen, environment::Environment, lexer::tokenize, parser, vm,
    },
};

/// Defines the structure of parsed statements.
///
/// This module declares the `Statement` and `Expr` enums that represent one
/// input line as a tree. The tree is built by the parser and lowered to
/// bytecode by the code generator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to every node for error reporting.
/// - Renders trees in a fully parenthesized form for inspection.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing, or executing a statement, along with a coarse [`ErrorKind`]
/// classification for drivers.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, machine).
/// - Attaches positions or instruction indices for context.
/// - Integrates with the standard error traits through `thiserror`.
pub mod error;
/// Hosts the four pipeline stages.
///
/// # Responsibilities
/// - Tokenizing, parsing, code generation, and execution.
/// - The persistent variable environment.
pub mod interpreter;
/// Session lifecycle for drivers.
///
/// A session owns one environment for as long as a REPL or script runs.
pub mod session;

pub use session::Session;

/// The observable result of running one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// A bare expression evaluated to this value.
    Value(f64),
    /// A `print` statement emitted this value.
    Printed(f64),
    /// An assignment bound `value` to `name`.
    Assigned {
        /// The variable written.
        name:  String,
        /// The value it now holds.
        value: f64,
    },
    /// The statement failed; the environment holds no partial writes.
    Failure(Error),
}

impl StatementOutcome {
    /// Returns `true` if the statement failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the kind of failure, if the statement failed.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failure(error) => Some(error.kind()),
            _ => None,
        }
    }

    /// Returns the numeric value the statement produced, whatever its kind.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) | Self::Printed(value) | Self::Assigned { value, .. } => {
                Some(*value)
            },
            Self::Failure(_) => None,
        }
    }
}

/// Compiles one statement to bytecode without running it.
///
/// # Errors
/// Returns a lexical or parse error if `text` is not a valid statement.
///
/// # Examples
/// ```
/// use stackcalc::{compile, interpreter::bytecode::Instruction};
///
/// let code = compile("x = -y").unwrap();
/// assert_eq!(code,
///            vec![Instruction::LoadVar("y".into()),
///                 Instruction::Negate,
///                 Instruction::StoreVar("x".into())]);
/// ```
pub fn compile(text: &str) -> Result<Vec<Instruction>, Error> {
    let statement = parse_statement(text)?;
    Ok(codegen::generate(&statement))
}

/// Runs one statement through the whole pipeline against `env`.
///
/// Bindings made by an assignment persist in `env` for later statements. A
/// statement that fails at any stage leaves `env` untouched.
///
/// # Examples
/// ```
/// use stackcalc::{
///     StatementOutcome, error::ErrorKind, interpreter::environment::Environment,
///     run_statement,
/// };
///
/// let mut env = Environment::new();
/// assert_eq!(run_statement("2 ^ 3 ^ 2", &mut env), StatementOutcome::Value(512.0));
///
/// let outcome = run_statement("1/0", &mut env);
/// assert_eq!(outcome.error_kind(), Some(ErrorKind::DivisionByZero));
/// assert!(env.is_empty());
/// ```
#[tracing::instrument(level = "debug", skip(env))]
pub fn run_statement(text: &str, env: &mut Environment) -> StatementOutcome {
    match execute_statement(text, env) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "statement completed");
            outcome
        },
        Err(error) => {
            tracing::debug!(kind = %error.kind(), %error, "statement failed");
            StatementOutcome::Failure(error)
        },
    }
}

fn parse_statement(text: &str) -> Result<Statement, Error> {
    let tokens = tokenize(text)?;
    let statement = parser::statement::parse(&tokens)?;
    tracing::trace!(%statement, "parsed");
    Ok(statement)
}

fn execute_statement(text: &str, env: &mut Environment) -> Result<StatementOutcome, Error> {
    let statement = parse_statement(text)?;
    let code = codegen::generate(&statement);
    tracing::trace!(instructions = code.len(), "generated bytecode");

    let mut execution = vm::execute(&code, env)?;

    let outcome = match statement {
        Statement::Assign { name, .. } => {
            env.get(&name)
               .map(|value| StatementOutcome::Assigned { name, value })
        },
        Statement::Print { .. } => execution.printed.pop().map(StatementOutcome::Printed),
        Statement::Expression { .. } => execution.result.map(StatementOutcome::Value),
    };
    outcome.ok_or(Error::Runtime(RuntimeError::MissingValue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> StatementOutcome {
        run_statement(text, &mut Environment::new())
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("2 + 3 * 4"), StatementOutcome::Value(14.0));
        assert_eq!(eval("2 ^ 3 ^ 2"), StatementOutcome::Value(512.0));
        assert_eq!(eval("-2 ^ 2"), StatementOutcome::Value(-4.0));
        assert_eq!(eval("10 - 2 - 3"), StatementOutcome::Value(5.0));
    }

    #[test]
    fn print_with_parentheses() {
        assert_eq!(eval("print( (1+2)^3 - 4/5 )"), StatementOutcome::Printed(26.2));
    }

    #[test]
    fn error_kinds_per_stage() {
        assert_eq!(eval("2 $ 3").error_kind(), Some(ErrorKind::Lex));
        assert_eq!(eval("2 +").error_kind(), Some(ErrorKind::Parse));
        assert_eq!(eval("(1+2").error_kind(), Some(ErrorKind::Parse));
        assert_eq!(eval("print y").error_kind(), Some(ErrorKind::UndefinedVariable));
        assert_eq!(eval("1/0").error_kind(), Some(ErrorKind::DivisionByZero));
    }

    #[test]
    fn positions_only_for_front_end_errors() {
        let StatementOutcome::Failure(lex) = eval("2 $ 3") else {
            panic!("expected failure");
        };
        assert_eq!(lex.position(), Some(2));

        let StatementOutcome::Failure(runtime) = eval("1/0") else {
            panic!("expected failure");
        };
        assert_eq!(runtime.position(), None);
        assert!(!runtime.is_internal());
    }

    #[test]
    fn compile_does_not_touch_variables() {
        let code = compile("print x").unwrap();
        assert_eq!(code, vec![Instruction::LoadVar("x".into()), Instruction::PrintTop]);
        assert!(compile("x = ").is_err());
    }
}
