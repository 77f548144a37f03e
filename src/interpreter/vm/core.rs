use std::collections::HashMap;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{bytecode::Instruction, environment::Environment, vm::arithmetic},
};

/// Result type used by the virtual machine.
pub type VmResult<T> = Result<T, RuntimeError>;

/// What one successful run of an instruction sequence produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    /// The single value left on the stack, if any.
    pub result:  Option<f64>,
    /// Values emitted by `PRINT_TOP`, in order.
    pub printed: Vec<f64>,
}

/// A stack machine.
///
/// ## Usage
///
/// A `Vm` owns only its operand stack, which is cleared at the start of every
/// [`Vm::execute`] call, so one machine can be reused for any number of
/// statements. Variables live in the [`Environment`] passed to each call.
///
/// Writes made by `STORE_VAR` are staged and committed to the environment
/// only once the whole sequence has run; a sequence that fails part-way
/// leaves the environment exactly as it found it.
#[derive(Debug, Default)]
pub struct Vm {
    stack: Vec<f64>,
}

impl Vm {
    /// Creates a machine with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `code` against `env`.
    ///
    /// Instructions run strictly in order. After the last one, a single
    /// remaining stack value becomes [`Execution::result`] and an empty stack
    /// means there is no result.
    ///
    /// # Errors
    /// - [`RuntimeError::UndefinedVariable`] when `LOAD_VAR` names an unbound
    ///   variable.
    /// - [`RuntimeError::DivisionByZero`] when `DIV` meets a zero divisor.
    /// - [`RuntimeError::StackUnderflow`] when an instruction pops from an
    ///   empty stack.
    /// - [`RuntimeError::UnbalancedStack`] when more than one value is left.
    ///
    /// # Example
    /// ```
    /// use stackcalc::interpreter::{
    ///     bytecode::Instruction, environment::Environment, vm::Vm,
    /// };
    ///
    /// let mut env = Environment::new();
    /// let code = [Instruction::PushConst(6.0), Instruction::PushConst(7.0), Instruction::Mul];
    /// let execution = Vm::new().execute(&code, &mut env).unwrap();
    /// assert_eq!(execution.result, Some(42.0));
    /// ```
    pub fn execute(&mut self, code: &[Instruction], env: &mut Environment) -> VmResult<Execution> {
        self.stack.clear();
        let mut staged: HashMap<&str, f64> = HashMap::new();
        let mut printed = Vec::new();

        for (index, instruction) in code.iter().enumerate() {
            match instruction {
                Instruction::PushConst(value) => self.stack.push(*value),
                Instruction::LoadVar(name) => {
                    let value = staged.get(name.as_str())
                                      .copied()
                                      .or_else(|| env.get(name))
                                      .ok_or_else(|| RuntimeError::UndefinedVariable { name:
                                                                                           name.clone(),
                                                                                       index })?;
                    self.stack.push(value);
                },
                Instruction::StoreVar(name) => {
                    let value = self.pop(instruction, index)?;
                    staged.insert(name.as_str(), value);
                },
                Instruction::Negate => {
                    let value = self.pop(instruction, index)?;
                    self.stack.push(-value);
                },
                Instruction::PrintTop => {
                    let value = self.pop(instruction, index)?;
                    printed.push(value);
                },
                Instruction::Add => self.binary(BinaryOperator::Add, instruction, index)?,
                Instruction::Sub => self.binary(BinaryOperator::Sub, instruction, index)?,
                Instruction::Mul => self.binary(BinaryOperator::Mul, instruction, index)?,
                Instruction::Div => self.binary(BinaryOperator::Div, instruction, index)?,
                Instruction::Pow => self.binary(BinaryOperator::Pow, instruction, index)?,
            }
        }

        let result = match self.stack.as_slice() {
            [] => None,
            [value] => Some(*value),
            values => return Err(RuntimeError::UnbalancedStack { depth: values.len() }),
        };
        self.stack.clear();

        for (name, value) in staged {
            env.bind(name.to_string(), value);
        }

        Ok(Execution { result, printed })
    }

    /// Pops `b`, then `a`, and pushes `a op b`.
    fn binary(&mut self,
              op: BinaryOperator,
              instruction: &Instruction,
              index: usize)
              -> VmResult<()> {
        let right = self.pop(instruction, index)?;
        let left = self.pop(instruction, index)?;
        self.stack.push(arithmetic::apply(op, left, right, index)?);
        Ok(())
    }

    /// Pops the top of the stack on behalf of `instruction`.
    fn pop(&mut self, instruction: &Instruction, index: usize) -> VmResult<f64> {
        self.stack
            .pop()
            .ok_or_else(|| RuntimeError::StackUnderflow { instruction: instruction.mnemonic()
                                                                                  .to_string(),
                                                          index })
    }
}

/// Executes `code` on a fresh machine.
///
/// # Errors
/// See [`Vm::execute`].
#[tracing::instrument(level = "trace", skip_all, fields(len = code.len()))]
pub fn execute(code: &[Instruction], env: &mut Environment) -> VmResult<Execution> {
    let outcome = Vm::new().execute(code, env);
    if let Err(error) = &outcome {
        tracing::debug!(%error, "execution failed");
    }
    outcome
}
