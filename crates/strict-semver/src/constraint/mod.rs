//! Constraint expressions: lexing, parsing and evaluation against a version

mod bound;
mod expression;
mod lexer;
mod operator;
mod parser;
pub(crate) mod range;

pub use bound::Bound;
pub use expression::Expression;
pub use lexer::{Lexer, Token, TokenKind};
pub use operator::{InvalidOperatorError, Operator};
pub use parser::ExpressionParser;
