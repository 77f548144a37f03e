use thiserror::Error;

/// Represents all errors that can occur while the virtual machine executes a
/// bytecode sequence.
///
/// Runtime errors refer to the instruction that failed by its index in the
/// sequence. `StackUnderflow`, `UnbalancedStack` and `MissingValue` can only
/// be produced by a malformed instruction sequence; the code generator never
/// emits one for a well-formed statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read a variable that has never been assigned.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:  String,
        /// Index of the `LOAD_VAR` instruction.
        index: usize,
    },
    /// Attempted division by zero.
    #[error("Division by zero.")]
    DivisionByZero {
        /// Index of the `DIV` instruction.
        index: usize,
    },
    /// An instruction needed more operands than the stack held.
    #[error("Internal error: stack underflow in {instruction} at instruction {index}.")]
    StackUnderflow {
        /// Mnemonic of the instruction that popped.
        instruction: String,
        /// Index of that instruction.
        index:       usize,
    },
    /// More than one value was left on the stack after the last instruction.
    #[error("Internal error: {depth} values left on the stack.")]
    UnbalancedStack {
        /// Number of values left behind.
        depth: usize,
    },
    /// A statement completed without the value its kind guarantees.
    #[error("Internal error: statement produced no value.")]
    MissingValue,
}
