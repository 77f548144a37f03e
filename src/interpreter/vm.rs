/// The stack machine and its execution loop.
///
/// Holds the operand stack, dispatches instructions in order, stages variable
/// writes, and turns the final stack into the statement's result.
pub mod core;

/// Arithmetic for the binary opcodes.
///
/// Applies `+`, `-`, `*`, `/` and `^` to two operands, including the
/// division-by-zero check.
pub mod arithmetic;

pub use self::core::{Execution, Vm, VmResult, execute};
