//! Tokenizer for constraint expressions

use std::fmt;

use crate::error::{LexerError, ParseError};

/// Kinds of constraint tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Tilde,
    Caret,
    /// `-` between the two ends of a hyphen range
    Hyphen,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    /// Version literal text, full or partial
    Version,
    /// End of input
    Eoi,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Tilde => "TILDE",
            TokenKind::Caret => "CARET",
            TokenKind::Hyphen => "HYPHEN",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Version => "VERSION",
            TokenKind::Eoi => "EOI",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with the text it was lexed from and its character offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Eoi {
            return write!(f, "{}", self.kind);
        }
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}

/// Splits constraint text into tokens
pub struct Lexer;

impl Lexer {
    /// Tokenize `input`, always ending with an [`TokenKind::Eoi`] token
    pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            let (kind, len) = match c {
                '=' => (TokenKind::Equal, if next == Some('=') { 2 } else { 1 }),
                '!' if next == Some('=') => (TokenKind::NotEqual, 2),
                '!' => (TokenKind::Not, 1),
                '>' if next == Some('=') => (TokenKind::GreaterEqual, 2),
                '>' => (TokenKind::Greater, 1),
                '<' if next == Some('=') => (TokenKind::LessEqual, 2),
                '<' => (TokenKind::Less, 1),
                '~' => (TokenKind::Tilde, 1),
                '^' => (TokenKind::Caret, 1),
                '-' => (TokenKind::Hyphen, 1),
                '&' => (TokenKind::And, if next == Some('&') { 2 } else { 1 }),
                ',' => (TokenKind::And, 1),
                '|' => (TokenKind::Or, if next == Some('|') { 2 } else { 1 }),
                '(' => (TokenKind::LeftParen, 1),
                ')' => (TokenKind::RightParen, 1),
                c if starts_literal(c, next) => (TokenKind::Version, literal_length(&chars[i..])),
                c if c.is_ascii_alphabetic() => {
                    let len = run_length(&chars[i..], |c| c.is_ascii_alphabetic());
                    let word: String = chars[i..i + len].iter().collect();
                    match keyword(&word) {
                        Some(kind) => (kind, len),
                        None => return Err(LexerError::new(c, i).into()),
                    }
                }
                _ => return Err(LexerError::new(c, i).into()),
            };

            let lexeme: String = chars[i..i + len].iter().collect();
            tokens.push(Token::new(kind, lexeme, i));
            i += len;
        }

        tokens.push(Token::new(TokenKind::Eoi, "", chars.len()));
        log::trace!("Tokenized {:?} into {} tokens", input, tokens.len());

        Ok(tokens)
    }
}

fn starts_literal(c: char, next: Option<char>) -> bool {
    match c {
        '0'..='9' | '*' => true,
        // a lone x is a wildcard, a longer word is a keyword
        'x' | 'X' => !next.is_some_and(|n| n.is_ascii_alphabetic()),
        _ => false,
    }
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '*')
}

/// Length of the literal at the start of `chars`. Before any pre-release or
/// build part, a letter run spelling a keyword ends the literal.
fn literal_length(chars: &[char]) -> usize {
    let mut len = 0;
    let mut in_core = true;

    while len < chars.len() && is_literal_char(chars[len]) {
        let c = chars[len];
        if matches!(c, '-' | '+') {
            in_core = false;
        }

        if in_core && len > 0 && c.is_ascii_alphabetic() {
            let word_len = run_length(&chars[len..], |c| c.is_ascii_alphabetic());
            let word: String = chars[len..len + word_len].iter().collect();
            if keyword(&word).is_some() {
                break;
            }
            len += word_len;
            continue;
        }

        len += 1;
    }

    len
}

fn run_length(chars: &[char], accept: impl Fn(char) -> bool) -> usize {
    chars.iter().take_while(|&&c| accept(c)).count()
}

fn keyword(word: &str) -> Option<TokenKind> {
    match word.to_ascii_lowercase().as_str() {
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "not" => Some(TokenKind::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input).unwrap().iter().map(Token::kind).collect()
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("= == != > >= < <="),
            vec![
                TokenKind::Equal,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Eoi,
            ]
        );
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(
            kinds("& && , | || ! ( )"),
            vec![
                TokenKind::And,
                TokenKind::And,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Eoi,
            ]
        );
        assert_eq!(
            kinds("AND or Not"),
            vec![TokenKind::And, TokenKind::Or, TokenKind::Not, TokenKind::Eoi]
        );
    }

    #[test]
    fn test_version_literals() {
        let tokens = Lexer::tokenize(">=1.0.0-rc.1+build.5 <2.x").unwrap();
        assert_eq!(tokens[1], Token::new(TokenKind::Version, "1.0.0-rc.1+build.5", 2));
        assert_eq!(tokens[3], Token::new(TokenKind::Version, "2.x", 22));
        assert_eq!(tokens[4], Token::new(TokenKind::Eoi, "", 25));
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(kinds("*"), vec![TokenKind::Version, TokenKind::Eoi]);
        assert_eq!(kinds("x"), vec![TokenKind::Version, TokenKind::Eoi]);
        assert_eq!(kinds("X.X"), vec![TokenKind::Version, TokenKind::Eoi]);
        assert_eq!(kinds("1.*"), vec![TokenKind::Version, TokenKind::Eoi]);
    }

    #[test]
    fn test_hyphen_range() {
        assert_eq!(
            kinds("1.2.3 - 2.3.4"),
            vec![TokenKind::Version, TokenKind::Hyphen, TokenKind::Version, TokenKind::Eoi]
        );
        // a hyphen inside a literal introduces a pre-release
        assert_eq!(kinds("1.2.3-2.3.4"), vec![TokenKind::Version, TokenKind::Eoi]);
    }

    #[test]
    fn test_tilde_and_caret() {
        assert_eq!(
            kinds("~1.2 ^0.3"),
            vec![TokenKind::Tilde, TokenKind::Version, TokenKind::Caret, TokenKind::Version, TokenKind::Eoi]
        );
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(
            Lexer::tokenize(">=1.0 $"),
            Err(ParseError::Lexer(LexerError::new('$', 6)))
        );
        assert_eq!(
            Lexer::tokenize("1.0 xor 2.0"),
            Err(ParseError::Lexer(LexerError::new('x', 4)))
        );
        assert!(Lexer::tokenize("v1.0.0").is_err());
    }

    #[test]
    fn test_keyword_ends_literal() {
        assert_eq!(
            kinds("1.0.0and 2.0.0"),
            vec![TokenKind::Version, TokenKind::And, TokenKind::Version, TokenKind::Eoi]
        );
        assert_eq!(
            kinds("1.0OR2.0.0"),
            vec![TokenKind::Version, TokenKind::Or, TokenKind::Version, TokenKind::Eoi]
        );
        assert_eq!(
            kinds("1.0.0not 1.0.1"),
            vec![TokenKind::Version, TokenKind::Not, TokenKind::Version, TokenKind::Eoi]
        );

        // pre-release and build identifiers may spell keywords
        let tokens = Lexer::tokenize("1.0.0-and.or+not").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme(), "1.0.0-and.or+not");

        let tokens = Lexer::tokenize("1.0.0-1and").unwrap();
        assert_eq!(tokens[0].lexeme(), "1.0.0-1and");
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(TokenKind::Version, "1.0.0", 0).to_string(), "VERSION(1.0.0)");
        assert_eq!(Token::new(TokenKind::Eoi, "", 3).to_string(), "EOI");
    }
}
