/// An abstract syntax tree (AST) node representing an expression.
///
/// Every node owns its children and records the byte offset of the token it
/// was built from, so later stages can refer back to the input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value:    f64,
        /// Byte offset in the input.
        position: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Byte offset in the input.
        position: usize,
    },
    /// Arithmetic negation.
    UnaryMinus {
        /// The operand expression.
        operand:  Box<Self>,
        /// Byte offset of the `-` token.
        position: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator token.
        position: usize,
    },
}

impl Expr {
    /// Returns the byte offset this expression was parsed from.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Number { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryMinus { position, .. }
            | Self::BinaryOp { position, .. } => *position,
        }
    }

    /// Returns the number of nodes on the longest path from this node to a
    /// leaf; a literal has height 1.
    ///
    /// The walk keeps its own stack, so it is safe on trees of any shape.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, level)) = pending.pop() {
            deepest = deepest.max(level);
            match expr {
                Self::Number { .. } | Self::Variable { .. } => {},
                Self::UnaryMinus { operand, .. } => pending.push((operand, level + 1)),
                Self::BinaryOp { left, right, .. } => {
                    pending.push((left, level + 1));
                    pending.push((right, level + 1));
                },
            }
        }
        deepest
    }

    /// Builds a negation node.
    #[must_use]
    pub fn negate(operand: Self, position: usize) -> Self {
        Self::UnaryMinus { operand: Box::new(operand),
                           position }
    }

    /// Builds a binary operation node.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self, position: usize) -> Self {
        Self::BinaryOp { left: Box::new(left),
                         op,
                         right: Box::new(right),
                         position }
    }
}

/// The root of one parsed line.
///
/// A statement is either an assignment, a `print`, or a bare expression whose
/// value becomes the statement's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Binds the value of `value` to `name`.
    Assign {
        /// Name of the variable.
        name:     String,
        /// The expression whose value is stored.
        value:    Expr,
        /// Byte offset of the identifier.
        position: usize,
    },
    /// Evaluates `expr` and emits it as print output.
    Print {
        /// The expression to print.
        expr:     Expr,
        /// Byte offset of the `print` keyword.
        position: usize,
    },
    /// Evaluates `expr` and yields it as the statement's result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
    },
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`, right-associative.
    Pow,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        f.write_str(operator)
    }
}

/// Renders the expression fully parenthesized, which makes the grouping the
/// parser chose visible: `-2^2` is shown as `(-(2 ^ 2))`.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => f.write_str(name),
            Self::UnaryMinus { operand, .. } => write!(f, "(-{operand})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign { name, value, .. } => write!(f, "{name} = {value}"),
            Self::Print { expr, .. } => write!(f, "print {expr}"),
            Self::Expression { expr } => write!(f, "{expr}"),
        }
    }
}
