use std::fmt::Write;

use crate::ast::BinaryOperator;

/// One stack-machine instruction.
///
/// Instructions are executed strictly in sequence; the instruction set has no
/// branches. Binary instructions pop the right operand first, then the left,
/// so `a b SUB` computes `a - b`.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a constant.
    PushConst(f64),
    /// Push the value bound to a variable.
    LoadVar(String),
    /// Pop a value and bind it to a variable.
    StoreVar(String),
    /// Pop `a`, push `-a`.
    Negate,
    /// Pop `b`, pop `a`, push `a + b`.
    Add,
    /// Pop `b`, pop `a`, push `a - b`.
    Sub,
    /// Pop `b`, pop `a`, push `a * b`.
    Mul,
    /// Pop `b`, pop `a`, push `a / b`; fails when `b` is zero.
    Div,
    /// Pop `b`, pop `a`, push `a` raised to `b`.
    Pow,
    /// Pop a value and emit it as print output.
    PrintTop,
}

impl Instruction {
    /// The assembly-style name of the opcode, without its operand.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::PushConst(_) => "PUSH_CONST",
            Self::LoadVar(_) => "LOAD_VAR",
            Self::StoreVar(_) => "STORE_VAR",
            Self::Negate => "NEGATE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Pow => "POW",
            Self::PrintTop => "PRINT_TOP",
        }
    }
}

impl From<BinaryOperator> for Instruction {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Add => Self::Add,
            BinaryOperator::Sub => Self::Sub,
            BinaryOperator::Mul => Self::Mul,
            BinaryOperator::Div => Self::Div,
            BinaryOperator::Pow => Self::Pow,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PushConst(value) => write!(f, "{} {value}", self.mnemonic()),
            Self::LoadVar(name) | Self::StoreVar(name) => write!(f, "{} {name}", self.mnemonic()),
            _ => f.write_str(self.mnemonic()),
        }
    }
}

/// Renders an instruction sequence as a numbered listing, one instruction
/// per line.
///
/// # Example
/// ```
/// use stackcalc::interpreter::bytecode::{Instruction, disassemble};
///
/// let code = [Instruction::PushConst(2.0), Instruction::StoreVar("x".into())];
/// assert_eq!(disassemble(&code), "0000  PUSH_CONST 2\n0001  STORE_VAR x\n");
/// ```
#[must_use]
pub fn disassemble(code: &[Instruction]) -> String {
    let mut listing = String::new();
    for (index, instruction) in code.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(listing, "{index:04}  {instruction}");
    }
    listing
}
