//! Error types shared by the version grammar and the constraint language

use thiserror::Error;

use crate::constraint::{Token, TokenKind};
use crate::version_parser::CharType;

/// Failure to parse version or constraint text.
///
/// Every variant carries the 0-based character offset of the problem so the
/// caller can point at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The version grammar met a character it cannot accept here
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
    /// The constraint lexer met a character outside every token class
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// The constraint parser met a token that fits no production here
    #[error(transparent)]
    UnexpectedToken(#[from] UnexpectedToken),
    /// A numeric component does not fit into 64 bits
    #[error("Numeric value \"{digits}\" at position {position} is too large")]
    NumericOverflow { digits: String, position: usize },
    /// Parentheses nest deeper than the parser allows
    #[error("Parentheses nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    /// Offset of the offending input
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter(e) => e.position,
            ParseError::Lexer(e) => e.position,
            ParseError::UnexpectedToken(e) => e.position(),
            ParseError::NumericOverflow { position, .. } => *position,
            ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// Shift the reported position, used when a version literal is parsed
    /// on its own and the error must point into the enclosing expression.
    pub(crate) fn offset_by(self, base: usize) -> Self {
        match self {
            ParseError::UnexpectedCharacter(mut e) => {
                e.position += base;
                ParseError::UnexpectedCharacter(e)
            }
            ParseError::Lexer(mut e) => {
                e.position += base;
                ParseError::Lexer(e)
            }
            ParseError::NumericOverflow { digits, position } => ParseError::NumericOverflow {
                digits,
                position: position + base,
            },
            other => other,
        }
    }
}

/// A character the version grammar did not expect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Unexpected character {}({}) at position {position}{}",
    CharType::for_character(*.unexpected),
    display_char(*.unexpected),
    expecting(.expected)
)]
pub struct UnexpectedCharacter {
    unexpected: Option<char>,
    position: usize,
    expected: Vec<CharType>,
}

impl UnexpectedCharacter {
    pub(crate) fn new(unexpected: Option<char>, position: usize, expected: &[CharType]) -> Self {
        UnexpectedCharacter {
            unexpected,
            position,
            expected: expected.to_vec(),
        }
    }

    /// The offending character, `None` at end of input
    pub fn unexpected_character(&self) -> Option<char> {
        self.unexpected
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Character classes that would have been accepted
    pub fn expected_char_types(&self) -> &[CharType] {
        &self.expected
    }
}

/// A character that starts no constraint token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Illegal character '{character}' at position {position}")]
pub struct LexerError {
    character: char,
    position: usize,
}

impl LexerError {
    pub(crate) fn new(character: char, position: usize) -> Self {
        LexerError { character, position }
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// A constraint token that fits no production at the current parser state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Unexpected token {} at position {}{}",
    .token,
    .token.position(),
    expecting(.expected)
)]
pub struct UnexpectedToken {
    token: Token,
    expected: Vec<TokenKind>,
}

impl UnexpectedToken {
    pub(crate) fn new(token: Token, expected: &[TokenKind]) -> Self {
        UnexpectedToken {
            token,
            expected: expected.to_vec(),
        }
    }

    pub fn unexpected_token(&self) -> &Token {
        &self.token
    }

    pub fn position(&self) -> usize {
        self.token.position()
    }

    pub fn expected_token_kinds(&self) -> &[TokenKind] {
        &self.expected
    }
}

/// Failure of a derived-value operation on a well-formed version.
///
/// These are arithmetic or state errors, never parse errors; the only
/// exception is [`VersionError::Parse`] which wraps the failure to parse a
/// pre-release passed alongside an increment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Incrementing the {component} version would overflow")]
    Overflow { component: &'static str },
    #[error("Cannot increment {field}: it is not set")]
    MissingMetadata { field: &'static str },
    #[error("Cannot increment \"{metadata}\": it has no numeric identifier")]
    NoNumericIdentifier { metadata: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn display_char(c: Option<char>) -> String {
    match c {
        Some(c) => c.to_string(),
        None => "end of input".to_string(),
    }
}

fn expecting<T: std::fmt::Display>(expected: &[T]) -> String {
    if expected.is_empty() {
        return String::new();
    }
    let names: Vec<String> = expected.iter().map(|e| e.to_string()).collect();
    format!(", expecting [{}]", names.join(", "))
}
