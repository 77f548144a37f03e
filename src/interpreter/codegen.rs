//! Code generation: lower a parsed statement into stack-machine bytecode.
//!
//! Every expression leaves exactly one value on the stack. Assignments and
//! `print` statements consume that value again, so after a complete
//! statement the stack holds one value for a bare expression and nothing
//! otherwise.

use crate::{
    ast::{Expr, Statement},
    interpreter::bytecode::Instruction,
};

/// Emit the instruction sequence for one statement.
///
/// Generation is total: every well-formed tree lowers without error.
#[must_use]
pub fn generate(statement: &Statement) -> Vec<Instruction> {
    let mut code = Vec::new();
    emit_statement(statement, &mut code);
    code
}

fn emit_statement(statement: &Statement, code: &mut Vec<Instruction>) {
    match statement {
        Statement::Assign { name, value, .. } => {
            emit_expr(value, code);
            code.push(Instruction::StoreVar(name.clone()));
        },
        Statement::Print { expr, .. } => {
            emit_expr(expr, code);
            code.push(Instruction::PrintTop);
        },
        Statement::Expression { expr } => emit_expr(expr, code),
    }
}

/// Emit post-order code for a single expression node: operands first, then
/// the operator.
fn emit_expr(expr: &Expr, code: &mut Vec<Instruction>) {
    match expr {
        Expr::Number { value, .. } => code.push(Instruction::PushConst(*value)),
        Expr::Variable { name, .. } => code.push(Instruction::LoadVar(name.clone())),
        Expr::UnaryMinus { operand, .. } => {
            emit_expr(operand, code);
            code.push(Instruction::Negate);
        },
        Expr::BinaryOp { left, op, right, .. } => {
            emit_expr(left, code);
            emit_expr(right, code);
            code.push(Instruction::from(*op));
        },
    }
}
