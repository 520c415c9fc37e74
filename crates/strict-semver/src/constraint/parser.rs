//! Recursive-descent parser for constraint expressions
//!
//! ```text
//! expr     := and_expr (OR and_expr)*
//! and_expr := term (AND? term)*
//! term     := NOT term | "(" expr ")" | range
//! range    := "~" literal | "^" literal | op literal | literal ("-" literal)?
//! ```

use super::lexer::{Lexer, Token, TokenKind};
use super::range::{self, Literal};
use super::{Expression, Operator};
use crate::error::{ParseError, UnexpectedToken};
use crate::version_parser::VersionParser;

/// Tokens that can start a term
const TERM_START: &[TokenKind] = &[
    TokenKind::Not,
    TokenKind::LeftParen,
    TokenKind::Tilde,
    TokenKind::Caret,
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Version,
];

/// Deepest parenthesis nesting accepted
pub const MAX_NESTING: usize = 64;

/// Parser for constraint text
pub struct ExpressionParser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    after_literal: bool,
}

impl ExpressionParser {
    /// Parse constraint text into an [`Expression`]
    pub fn parse(text: &str) -> Result<Expression, ParseError> {
        let tokens = Lexer::tokenize(text)?;
        let mut parser = ExpressionParser {
            tokens,
            index: 0,
            depth: 0,
            after_literal: false,
        };

        let expression = parser.parse_expression()?;
        let expected = parser.expected_after_term(TokenKind::Eoi);
        parser.expect(&expected, TokenKind::Eoi)?;

        log::trace!("Parsed constraint {:?} as {}", text, expression);
        Ok(expression)
    }

    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.index)
            .map(Token::kind)
            .unwrap_or(TokenKind::Eoi)
    }

    fn next(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eoi, "", 0));
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    /// Consume a token of `kind`, reporting `expected` otherwise
    fn expect(&mut self, expected: &[TokenKind], kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.next();
        if token.kind() != kind {
            return Err(UnexpectedToken::new(token, expected).into());
        }
        Ok(token)
    }

    /// Everything that may follow a complete term when `closer` ends the group
    fn expected_after_term(&self, closer: TokenKind) -> Vec<TokenKind> {
        let mut expected = vec![TokenKind::And, TokenKind::Or, closer];
        if self.after_literal {
            expected.push(TokenKind::Hyphen);
        }
        expected.extend_from_slice(TERM_START);
        expected
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.parse_and()?;
        let mut rest = Vec::new();
        while self.peek() == TokenKind::Or {
            self.next();
            rest.push(self.parse_and()?);
        }
        Ok(join_balanced(first, rest, Expression::or))
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        loop {
            let kind = self.peek();
            if kind == TokenKind::And {
                self.next();
            } else if !TERM_START.contains(&kind) {
                break;
            }
            rest.push(self.parse_term()?);
        }
        Ok(join_balanced(first, rest, Expression::and))
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut negations = 0usize;
        while self.peek() == TokenKind::Not {
            self.next();
            negations += 1;
        }

        let term = self.parse_operand()?;
        if negations % 2 == 1 {
            Ok(!term)
        } else {
            Ok(term)
        }
    }

    fn parse_operand(&mut self) -> Result<Expression, ParseError> {
        let kind = self.peek();
        log::trace!("Parsing term at {}", kind);
        self.after_literal = false;

        match kind {
            TokenKind::LeftParen => {
                let open = self.next();
                if self.depth == MAX_NESTING {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING,
                        position: open.position(),
                    });
                }

                self.depth += 1;
                let inner = self.parse_expression()?;
                let expected = self.expected_after_term(TokenKind::RightParen);
                self.expect(&expected, TokenKind::RightParen)?;
                self.depth -= 1;
                self.after_literal = false;
                Ok(inner)
            }
            TokenKind::Tilde => {
                self.next();
                Ok(range::tilde(self.parse_literal()?))
            }
            TokenKind::Caret => {
                self.next();
                Ok(range::caret(self.parse_literal()?))
            }
            TokenKind::Version => {
                let low = self.parse_literal()?;
                if self.peek() == TokenKind::Hyphen {
                    self.next();
                    let high = self.parse_literal()?;
                    return Ok(range::hyphen(low, high));
                }
                self.after_literal = true;
                Ok(range::comparison(Operator::Equal, low))
            }
            _ => match comparison_operator(kind) {
                Some(operator) => {
                    self.next();
                    Ok(range::comparison(operator, self.parse_literal()?))
                }
                None => Err(UnexpectedToken::new(self.next(), TERM_START).into()),
            },
        }
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.expect(&[TokenKind::Version], TokenKind::Version)?;
        VersionParser::parse_literal(token.lexeme()).map_err(|e| e.offset_by(token.position()))
    }
}

/// Join a run of operands with `join`, keeping the tree depth logarithmic in
/// the run length. Three or fewer operands nest to the left.
fn join_balanced(
    first: Expression,
    mut rest: Vec<Expression>,
    join: fn(Expression, Expression) -> Expression,
) -> Expression {
    if rest.is_empty() {
        return first;
    }

    let len = rest.len() + 1;
    let mut right = rest.split_off((len + 1) / 2 - 1);
    let left = join_balanced(first, rest, join);
    let right_first = right.remove(0);
    join(left, join_balanced(right_first, right, join))
}

fn comparison_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Equal => Some(Operator::Equal),
        TokenKind::NotEqual => Some(Operator::NotEqual),
        TokenKind::Greater => Some(Operator::GreaterThan),
        TokenKind::GreaterEqual => Some(Operator::GreaterThanOrEqual),
        TokenKind::Less => Some(Operator::LessThan),
        TokenKind::LessEqual => Some(Operator::LessThanOrEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Bound;
    use crate::version::Version;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn eq(s: &str) -> Expression {
        Expression::comparison(Operator::Equal, v(s))
    }

    fn parse(s: &str) -> Expression {
        ExpressionParser::parse(s).unwrap()
    }

    fn satisfies(constraint: &str, version: &str) -> bool {
        parse(constraint).interpret(&v(version))
    }

    #[test]
    fn test_parse_comparison() {
        assert_eq!(
            parse(">=1.0.0"),
            Expression::comparison(Operator::GreaterThanOrEqual, v("1.0.0"))
        );
        assert_eq!(parse("1.0.0"), eq("1.0.0"));
        assert_eq!(parse("==1.0.0"), eq("1.0.0"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            parse("1.0.0 | 2.0.0 & 3.0.0"),
            eq("1.0.0") | (eq("2.0.0") & eq("3.0.0"))
        );
        assert_eq!(
            parse("1.0.0 & 2.0.0 | 3.0.0"),
            (eq("1.0.0") & eq("2.0.0")) | eq("3.0.0")
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            parse("1.0.0 || 2.0.0 || 3.0.0"),
            (eq("1.0.0") | eq("2.0.0")) | eq("3.0.0")
        );
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(parse(">=1.0.0 <2.0.0"), parse(">=1.0.0 & <2.0.0"));
        assert_eq!(parse(">=1.0.0, <2.0.0"), parse(">=1.0.0 && <2.0.0"));
        assert_eq!(parse(">=1.0.0 AND <2.0.0 or 3.0.0"), parse(">=1.0.0 & <2.0.0 | 3.0.0"));
        assert_eq!(parse("1.0.0and 2.0.0"), eq("1.0.0") & eq("2.0.0"));
        assert_eq!(parse("1.0.0or2.0.0"), eq("1.0.0") | eq("2.0.0"));
    }

    #[test]
    fn test_not_and_parentheses() {
        assert_eq!(parse("!1.0.0 & 2.0.0"), !eq("1.0.0") & eq("2.0.0"));
        assert_eq!(parse("!(1.0.0 | 2.0.0)"), !(eq("1.0.0") | eq("2.0.0")));
        assert_eq!(parse("not not 1.0.0"), eq("1.0.0"));
        assert_eq!(parse("! ! !1.0.0"), !eq("1.0.0"));
        assert!(satisfies("(1.0.0 | 2.0.0) & !=2.0.0", "1.0.0"));
        assert!(!satisfies("(1.0.0 | 2.0.0) & !=2.0.0", "2.0.0"));
    }

    #[test]
    fn test_range_shorthands() {
        assert!(satisfies("~1.2.3", "1.2.9"));
        assert!(!satisfies("~1.2.3", "1.3.0"));
        assert!(satisfies("^1.2.3", "1.9.0"));
        assert!(!satisfies("^1.2.3", "2.0.0"));
        assert!(satisfies("1.x", "1.5.2"));
        assert!(!satisfies("1.x", "2.0.0"));
        assert!(satisfies("*", "0.0.0-alpha"));
        assert!(satisfies("!=1.2", "1.3.0"));
        assert!(!satisfies("!=1.2", "1.2.7"));
        assert!(satisfies(">1.2", "1.3.0"));
        assert!(!satisfies(">1.2", "1.2.9"));
        assert!(satisfies("<=1.2", "1.2.9"));
    }

    #[test]
    fn test_hyphen_range() {
        assert_eq!(
            parse("1.2.3 - 2.3.4"),
            Expression::Range {
                low: Bound::inclusive(v("1.2.3")),
                high: Bound::inclusive(v("2.3.4")),
            }
        );
        assert!(satisfies("1.2 - 2.3", "2.3.9"));
        assert!(!satisfies("1.2 - 2.3", "2.4.0"));
    }

    #[test]
    fn test_pre_release_before_release_ceiling() {
        assert!(satisfies(">=1.0.0 & <2.0.0", "2.0.0-beta"));
        assert!(!satisfies(">=2.0.0 & <3.0.0", "2.0.0-beta"));
    }

    #[test]
    fn test_unexpected_token() {
        let err = ExpressionParser::parse(">=1.0.0 &").unwrap_err();
        match err {
            ParseError::UnexpectedToken(e) => {
                assert_eq!(e.unexpected_token().kind(), TokenKind::Eoi);
                assert_eq!(e.position(), 9);
                assert_eq!(e.expected_token_kinds(), TERM_START);
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = ExpressionParser::parse("(1.0.0").unwrap_err();
        match err {
            ParseError::UnexpectedToken(e) => {
                assert_eq!(
                    e.expected_token_kinds(),
                    &[
                        TokenKind::And,
                        TokenKind::Or,
                        TokenKind::RightParen,
                        TokenKind::Hyphen,
                        TokenKind::Not,
                        TokenKind::LeftParen,
                        TokenKind::Tilde,
                        TokenKind::Caret,
                        TokenKind::Equal,
                        TokenKind::NotEqual,
                        TokenKind::Greater,
                        TokenKind::GreaterEqual,
                        TokenKind::Less,
                        TokenKind::LessEqual,
                        TokenKind::Version,
                    ]
                );
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = ExpressionParser::parse("1.0.0 )").unwrap_err();
        assert_eq!(err.position(), 6);

        let err = ExpressionParser::parse(">= <1.0.0").unwrap_err();
        match err {
            ParseError::UnexpectedToken(e) => {
                assert_eq!(e.unexpected_token().kind(), TokenKind::Less);
                assert_eq!(e.expected_token_kinds(), &[TokenKind::Version]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_expected_after_complete_term() {
        let expected_after = |text: &str| match ExpressionParser::parse(text).unwrap_err() {
            ParseError::UnexpectedToken(e) => e.expected_token_kinds().to_vec(),
            other => panic!("unexpected error {:?}", other),
        };

        let mut after_comparison = vec![TokenKind::And, TokenKind::Or, TokenKind::Eoi];
        after_comparison.extend_from_slice(TERM_START);
        assert_eq!(expected_after(">=1.0.0 )"), after_comparison);
        assert_eq!(expected_after("(1.0.0) )"), after_comparison);
        assert_eq!(expected_after("1.0.0 - 2.0.0 )"), after_comparison);

        let mut after_literal = vec![TokenKind::And, TokenKind::Or, TokenKind::Eoi, TokenKind::Hyphen];
        after_literal.extend_from_slice(TERM_START);
        assert_eq!(expected_after("1.0.0 )"), after_literal);
        assert_eq!(expected_after("!1.0.0 )"), after_literal);

        let mut in_group = vec![TokenKind::And, TokenKind::Or, TokenKind::RightParen];
        in_group.extend_from_slice(TERM_START);
        assert_eq!(expected_after("(~1.0"), in_group);
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}1.0.0{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(parse(&nested(MAX_NESTING)), eq("1.0.0"));
        assert_eq!(
            ExpressionParser::parse(&nested(MAX_NESTING + 1)).unwrap_err(),
            ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                position: MAX_NESTING,
            }
        );

        let err = ExpressionParser::parse(&"(".repeat(100_000)).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { position: 64, .. }));

        // Sibling groups do not accumulate depth.
        let siblings = vec![nested(MAX_NESTING); 4].join(" | ");
        assert!(ExpressionParser::parse(&siblings).is_ok());
    }

    #[test]
    fn test_long_negation_runs() {
        let even = format!("{}1.0.0", "!".repeat(100_000));
        assert_eq!(parse(&even), eq("1.0.0"));

        let odd = format!("{}1.0.0", "!".repeat(100_001));
        assert_eq!(parse(&odd), !eq("1.0.0"));
        assert!(parse(&odd).interpret(&v("2.0.0")));
    }

    #[test]
    fn test_long_operand_runs() {
        let disjunction = vec!["1.0.0"; 100_000].join(" | ");
        let expression = parse(&format!("{} | 2.0.0", disjunction));
        assert!(expression.interpret(&v("2.0.0")));
        assert!(!expression.interpret(&v("3.0.0")));

        let conjunction = vec![">=1.0.0"; 100_000].join(" ");
        assert!(parse(&conjunction).interpret(&v("1.5.0")));
    }

    #[test]
    fn test_literal_errors_point_into_expression() {
        let err = ExpressionParser::parse(">=1.0.0 & <2.01.0").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter(_)));
        assert_eq!(err.position(), 14);

        let err = ExpressionParser::parse("1.*.3").unwrap_err();
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_lexer_errors_propagate() {
        assert!(matches!(
            ExpressionParser::parse(">=1.0.0 $"),
            Err(ParseError::Lexer(_))
        ));
    }
}
