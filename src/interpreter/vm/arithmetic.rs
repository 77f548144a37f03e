use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::vm::core::VmResult};

/// Applies a binary operator to two operands.
///
/// `left` is the operand that was pushed first. Division is true division;
/// a zero divisor (including `-0.0`) is an error rather than an infinity.
/// Exponentiation follows `f64::powf`, so fractional powers of negative
/// numbers yield `NaN`.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `index`: Index of the executing instruction, for error reporting.
///
/// # Example
/// ```
/// use stackcalc::{ast::BinaryOperator, interpreter::vm::arithmetic::apply};
///
/// assert_eq!(apply(BinaryOperator::Sub, 10.0, 4.0, 0).unwrap(), 6.0);
/// assert_eq!(apply(BinaryOperator::Pow, 2.0, 10.0, 0).unwrap(), 1024.0);
/// assert!(apply(BinaryOperator::Div, 1.0, 0.0, 0).is_err());
/// ```
pub fn apply(op: BinaryOperator, left: f64, right: f64, index: usize) -> VmResult<f64> {
    Ok(match op {
           BinaryOperator::Add => left + right,
           BinaryOperator::Sub => left - right,
           BinaryOperator::Mul => left * right,
           BinaryOperator::Div => {
               if right == 0.0 {
                   return Err(RuntimeError::DivisionByZero { index });
               }
               left / right
           },
           BinaryOperator::Pow => left.powf(right),
       })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_is_not_truncated() {
        assert_eq!(apply(BinaryOperator::Div, 7.0, 2.0, 0).unwrap(), 3.5);
    }

    #[test]
    fn negative_zero_divisor_is_rejected() {
        assert_eq!(apply(BinaryOperator::Div, 1.0, -0.0, 3).unwrap_err(),
                   RuntimeError::DivisionByZero { index: 3 });
    }

    #[test]
    fn zero_dividend_is_fine() {
        assert_eq!(apply(BinaryOperator::Div, 0.0, 5.0, 0).unwrap(), 0.0);
    }

    #[test]
    fn power_follows_host_rules() {
        assert_eq!(apply(BinaryOperator::Pow, 4.0, 0.5, 0).unwrap(), 2.0);
        assert_eq!(apply(BinaryOperator::Pow, 2.0, -1.0, 0).unwrap(), 0.5);
        assert!(apply(BinaryOperator::Pow, -8.0, 1.0 / 3.0, 0).unwrap().is_nan());
    }
}
