//! Surface operators and their library function names.
//!
//! The MIR has no dedicated operator node. `a + b` is the standard-library
//! application `Plus__(a, b)`, so every pass that cares about operators
//! recognizes them by name through [`Operator::from_name`].

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    IntDivide,
    Modulo,
    LDivide,
    EltTimes,
    EltDivide,
    Pow,
    EltPow,
    Equals,
    NEquals,
    Less,
    Leq,
    Greater,
    Geq,
    PMinus,
    PPlus,
    PNot,
    Transpose,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 21] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Divide,
        Operator::IntDivide,
        Operator::Modulo,
        Operator::LDivide,
        Operator::EltTimes,
        Operator::EltDivide,
        Operator::Pow,
        Operator::EltPow,
        Operator::Equals,
        Operator::NEquals,
        Operator::Less,
        Operator::Leq,
        Operator::Greater,
        Operator::Geq,
        Operator::PMinus,
        Operator::PPlus,
        Operator::PNot,
        Operator::Transpose,
    ];

    /// Library function name the operator is applied through.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Plus => "Plus__",
            Operator::Minus => "Minus__",
            Operator::Times => "Times__",
            Operator::Divide => "Divide__",
            Operator::IntDivide => "IntDivide__",
            Operator::Modulo => "Modulo__",
            Operator::LDivide => "LDivide__",
            Operator::EltTimes => "EltTimes__",
            Operator::EltDivide => "EltDivide__",
            Operator::Pow => "Pow__",
            Operator::EltPow => "EltPow__",
            Operator::Equals => "Equals__",
            Operator::NEquals => "NEquals__",
            Operator::Less => "Less__",
            Operator::Leq => "Leq__",
            Operator::Greater => "Greater__",
            Operator::Geq => "Geq__",
            Operator::PMinus => "PMinus__",
            Operator::PPlus => "PPlus__",
            Operator::PNot => "PNot__",
            Operator::Transpose => "Transpose__",
        }
    }

    /// Recognize an operator from its library function name.
    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.name() == name)
    }
}
