//! Expression tree for version constraints

use std::fmt;
use std::ops;

use super::{Bound, ExpressionParser, Operator};
use crate::error::ParseError;
use crate::version::Version;

/// A parsed constraint.
///
/// Shorthands such as `~1.2` or `1.0 - 2.0` never survive parsing; they are
/// desugared into [`Expression::Range`] or comparison trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// `op version`
    Comparison(Operator, Version),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    /// Versions between two bounds
    Range { low: Bound, high: Bound },
}

impl Expression {
    /// Parse a constraint such as `>=1.0.0 & <2.0.0 | ~3.1`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        ExpressionParser::parse(text)
    }

    pub fn comparison(operator: Operator, version: Version) -> Self {
        Expression::Comparison(operator, version)
    }

    pub fn and(self, other: Expression) -> Self {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expression) -> Self {
        Expression::Or(Box::new(self), Box::new(other))
    }

    /// Check whether `version` satisfies the constraint.
    ///
    /// Both sides of a logical node are always evaluated.
    pub fn interpret(&self, version: &Version) -> bool {
        match self {
            Expression::Comparison(operator, literal) => operator.accepts(version.cmp(literal)),
            Expression::And(left, right) => {
                let left = left.interpret(version);
                let right = right.interpret(version);
                left && right
            }
            Expression::Or(left, right) => {
                let left = left.interpret(version);
                let right = right.interpret(version);
                left || right
            }
            Expression::Not(inner) => !inner.interpret(version),
            Expression::Range { low, high } => {
                let above = low.admits_from_below(version);
                let below = high.admits_from_above(version);
                above && below
            }
        }
    }
}

impl ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::Not(Box::new(self))
    }
}

impl ops::BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Expression) -> Expression {
        self.and(rhs)
    }
}

impl ops::BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        self.or(rhs)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison(operator, version) => write!(f, "{}{}", operator, version),
            Expression::And(left, right) => write!(f, "({} & {})", left, right),
            Expression::Or(left, right) => write!(f, "({} | {})", left, right),
            Expression::Not(inner) => write!(f, "!({})", inner),
            Expression::Range { low, high } => write!(
                f,
                "({}{} & {}{})",
                low.lower_operator(),
                low.version(),
                high.upper_operator(),
                high.version()
            ),
        }
    }
}

impl std::str::FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}
