use std::fmt::Display;

#[derive(Hash, Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Hash, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// What an operator demands of its operands, and so which obligations it
/// contributes during inference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperatorClass {
    /// Both operands share a numeric type, which is also the result.
    Arithmetic,
    /// Both operands share a numeric type, the result is `Bool`.
    Ordering,
    /// Both operands share a type supporting equality, the result is `Bool`.
    Equality,
    /// Both operands and the result are `Bool`.
    Logical,
}

impl UnaryOp {
    pub const ALL: [Self; 2] = [Self::Neg, Self::Not];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl BinaryOp {
    pub const ALL: [Self; 13] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::And,
        Self::Or,
    ];

    pub const MIN_PRECEDENCE: u8 = 1;
    pub const MAX_PRECEDENCE: u8 = 5;

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Binding strength; higher binds tighter. All levels are
    /// left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div | Self::Rem => 5,
        }
    }

    pub fn class(self) -> OperatorClass {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem => OperatorClass::Arithmetic,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => OperatorClass::Ordering,
            Self::Eq | Self::Ne => OperatorClass::Equality,
            Self::And | Self::Or => OperatorClass::Logical,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbol().fmt(f)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbol().fmt(f)
    }
}
