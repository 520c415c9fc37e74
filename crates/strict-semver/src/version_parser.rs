//! Version grammar parsing
//!
//! A predictive recursive-descent parser over a stream of classified
//! characters:
//!
//! ```text
//! version        := normal ("-" preRelease)? ("+" build)?
//! normal         := numericId "." numericId "." numericId
//! numericId      := "0" | nonZeroDigit digit*
//! preRelease     := dotSeparatedId ("." dotSeparatedId)*
//! build          := dotSeparatedId ("." dotSeparatedId)*
//! dotSeparatedId := alphanumericId | numericId
//! ```
//!
//! The first character that does not fit aborts the parse with its offset
//! and the character classes that were acceptable at that point.

use std::fmt;

use crate::constraint::range::{Literal, PartialVersion};
use crate::error::{ParseError, UnexpectedCharacter};
use crate::identifier::Identifier;
use crate::metadata::Metadata;
use crate::normal::NormalVersion;
use crate::version::Version;

/// Character classes of the version grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Digit,
    Letter,
    Dot,
    Hyphen,
    Plus,
    /// End of input
    Eoi,
    /// Anything else
    Illegal,
}

impl CharType {
    /// Classify a character, `None` standing for end of input
    pub fn for_character(c: Option<char>) -> CharType {
        match c {
            None => CharType::Eoi,
            Some('0'..='9') => CharType::Digit,
            Some('a'..='z' | 'A'..='Z') => CharType::Letter,
            Some('.') => CharType::Dot,
            Some('-') => CharType::Hyphen,
            Some('+') => CharType::Plus,
            Some(_) => CharType::Illegal,
        }
    }

    pub fn is_matched_by(self, c: Option<char>) -> bool {
        CharType::for_character(c) == self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharType::Digit => "DIGIT",
            CharType::Letter => "LETTER",
            CharType::Dot => "DOT",
            CharType::Hyphen => "HYPHEN",
            CharType::Plus => "PLUS",
            CharType::Eoi => "EOI",
            CharType::Illegal => "ILLEGAL",
        }
    }
}

impl fmt::Display for CharType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const IDENTIFIER_CHARS: [CharType; 3] = [CharType::Digit, CharType::Letter, CharType::Hyphen];

struct CharStream {
    chars: Vec<char>,
    offset: usize,
}

impl CharStream {
    fn new(text: &str) -> Self {
        CharStream {
            chars: text.chars().collect(),
            offset: 0,
        }
    }

    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn lookahead_is(&self, types: &[CharType]) -> bool {
        let c = self.lookahead();
        types.iter().any(|t| t.is_matched_by(c))
    }

    fn position(&self) -> usize {
        self.offset
    }

    fn advance(&mut self) {
        if self.offset < self.chars.len() {
            self.offset += 1;
        }
    }

    /// Consume the next character if it belongs to one of `expected`
    fn consume(&mut self, expected: &[CharType]) -> Result<Option<char>, ParseError> {
        let c = self.lookahead();
        if !expected.iter().any(|t| t.is_matched_by(c)) {
            return Err(UnexpectedCharacter::new(c, self.offset, expected).into());
        }
        self.advance();
        Ok(c)
    }

    fn slice(&self, start: usize) -> String {
        self.chars[start..self.offset].iter().collect()
    }
}

/// Parser for version text and its pre-release and build fields
pub struct VersionParser {
    chars: CharStream,
}

impl VersionParser {
    fn new(text: &str) -> Self {
        VersionParser {
            chars: CharStream::new(text),
        }
    }

    /// Parse a complete version, e.g. `1.0.0-rc.1+build.5`
    pub fn parse_valid_semver(text: &str) -> Result<Version, ParseError> {
        VersionParser::new(text).parse_version()
    }

    /// Parse a standalone pre-release field, e.g. `rc.1`
    pub fn parse_pre_release(text: &str) -> Result<Metadata, ParseError> {
        let mut parser = VersionParser::new(text);
        let pre_release = parser.parse_identifiers(false)?;
        parser.chars.consume(&[CharType::Dot, CharType::Eoi])?;
        Ok(pre_release)
    }

    /// Parse a standalone build field, e.g. `build.007`
    pub fn parse_build(text: &str) -> Result<Metadata, ParseError> {
        let mut parser = VersionParser::new(text);
        let build = parser.parse_identifiers(true)?;
        parser.chars.consume(&[CharType::Dot, CharType::Eoi])?;
        Ok(build)
    }

    /// Parse a version literal of the constraint language.
    ///
    /// Accepts a complete version or a partial one such as `1`, `1.2`,
    /// `1.x` or `*`; a wildcard component may only be followed by more
    /// wildcards and metadata requires all three numeric components.
    pub(crate) fn parse_literal(text: &str) -> Result<Literal, ParseError> {
        let mut parser = VersionParser::new(text);
        let mut components: Vec<Option<u64>> = Vec::with_capacity(3);

        loop {
            match parser.chars.lookahead() {
                Some('*' | 'x' | 'X') => {
                    parser.chars.advance();
                    components.push(None);
                }
                c if components.last() == Some(&None) => {
                    return Err(UnexpectedCharacter::new(c, parser.chars.position(), &[]).into());
                }
                _ => components.push(Some(parser.parse_numeric_identifier()?)),
            }

            if components.len() == 3 || parser.chars.lookahead() != Some('.') {
                break;
            }
            parser.chars.advance();
        }

        let complete = components.len() == 3 && components.iter().all(Option::is_some);
        match parser.chars.lookahead() {
            None => {}
            Some('-' | '+') if complete => {
                return Self::parse_valid_semver(text).map(Literal::Full);
            }
            c => {
                let expected: &[CharType] = if components.len() < 3 {
                    &[CharType::Dot, CharType::Eoi]
                } else if complete {
                    &[CharType::Hyphen, CharType::Plus, CharType::Eoi]
                } else {
                    &[CharType::Eoi]
                };
                return Err(UnexpectedCharacter::new(c, parser.chars.position(), expected).into());
            }
        }

        let component = |i: usize| components.get(i).copied().flatten();
        if complete {
            let normal = NormalVersion::new(component(0).unwrap_or(0), component(1).unwrap_or(0), component(2).unwrap_or(0));
            return Ok(Literal::Full(Version::from_parts(normal, None, None)));
        }

        Ok(Literal::Partial(PartialVersion::new(component(0), component(1), component(2))))
    }

    fn parse_version(&mut self) -> Result<Version, ParseError> {
        let normal = self.parse_normal()?;
        let mut pre_release = None;
        let mut build = None;

        let mut next = self
            .chars
            .consume(&[CharType::Hyphen, CharType::Plus, CharType::Eoi])?;

        if next == Some('-') {
            pre_release = Some(self.parse_identifiers(false)?);
            next = self.chars.consume(&[CharType::Dot, CharType::Plus, CharType::Eoi])?;
        }

        if next == Some('+') {
            build = Some(self.parse_identifiers(true)?);
            self.chars.consume(&[CharType::Dot, CharType::Eoi])?;
        }

        Ok(Version::from_parts(normal, pre_release, build))
    }

    fn parse_normal(&mut self) -> Result<NormalVersion, ParseError> {
        let major = self.parse_numeric_identifier()?;
        self.chars.consume(&[CharType::Dot])?;
        let minor = self.parse_numeric_identifier()?;
        self.chars.consume(&[CharType::Dot])?;
        let patch = self.parse_numeric_identifier()?;
        Ok(NormalVersion::new(major, minor, patch))
    }

    /// `"0" | nonZeroDigit digit*`; digits after a leading zero are left for
    /// the caller to reject as unexpected.
    fn parse_numeric_identifier(&mut self) -> Result<u64, ParseError> {
        let start = self.chars.position();
        if self.chars.lookahead() == Some('0') {
            self.chars.advance();
            return Ok(0);
        }

        self.chars.consume(&[CharType::Digit])?;
        while self.chars.lookahead_is(&[CharType::Digit]) {
            self.chars.advance();
        }

        let digits = self.chars.slice(start);
        digits
            .parse::<u64>()
            .map_err(|_| ParseError::NumericOverflow { digits, position: start })
    }

    fn parse_identifiers(&mut self, build: bool) -> Result<Metadata, ParseError> {
        let mut identifiers = vec![self.parse_dot_separated_identifier(build)?];
        while self.chars.lookahead() == Some('.') {
            self.chars.advance();
            identifiers.push(self.parse_dot_separated_identifier(build)?);
        }
        Ok(Metadata::new(identifiers))
    }

    fn parse_dot_separated_identifier(&mut self, build: bool) -> Result<Identifier, ParseError> {
        let start = self.chars.position();
        self.chars.consume(&IDENTIFIER_CHARS)?;
        while self.chars.lookahead_is(&IDENTIFIER_CHARS) {
            self.chars.advance();
        }

        Identifier::from_validated(&self.chars.slice(start), build).map_err(|e| e.offset_by(start))
    }
}
