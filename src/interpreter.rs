/// The lexer module tokenizes an input line for further parsing.
///
/// The lexer reads raw text and produces a lazy stream of tokens, each paired
/// with the byte offset it starts at: numbers, identifiers, the `print`
/// keyword, operators and parentheses. This is the first stage of the
/// pipeline.
///
/// # Responsibilities
/// - Converts the input characters into tokens with source positions.
/// - Terminates every stream with an end-of-input token.
/// - Reports the first unrecognized character as a lexical error.
pub mod lexer;
/// The parser module builds the statement tree from tokens.
///
/// A recursive-descent parser whose production hierarchy encodes operator
/// precedence and associativity.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Statement`] and [`crate::ast::Expr`]
///   nodes.
/// - Validates the grammar, reporting errors with positions.
/// - Rejects tokens left over after a complete statement.
pub mod parser;
/// Bytecode instruction definitions and disassembly.
pub mod bytecode;
/// Lowers statement trees to bytecode.
pub mod codegen;
/// Persistent variable storage.
///
/// The environment outlives single statements and is the only state carried
/// from one statement to the next.
pub mod environment;
/// The virtual machine executes bytecode.
///
/// # Responsibilities
/// - Runs instructions in order against an operand stack.
/// - Reads and writes variables in the [`environment::Environment`].
/// - Reports runtime errors such as division by zero or undefined variables,
///   and treats stack discipline violations as checked failures.
pub mod vm;
