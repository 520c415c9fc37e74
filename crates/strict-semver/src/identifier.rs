//! Dot-separated identifiers of pre-release and build fields

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ParseError, UnexpectedCharacter};
use crate::version_parser::CharType;

/// A single dot-separated segment of a pre-release or build field.
///
/// The kind is derived from the content: all-digit text is numeric, anything
/// else built from `[0-9A-Za-z-]` is alphanumeric. Numeric text is kept as
/// written so values wider than `u64` stay representable.
///
/// Only the classifying constructors can build one, so the kind always
/// agrees with the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: Kind,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Numeric,
    Alphanumeric,
}

impl Identifier {
    /// Classify text as a pre-release identifier.
    ///
    /// Fails on empty text, on characters outside `[0-9A-Za-z-]` and on
    /// numeric identifiers with a leading zero.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::classify(text, false)
    }

    /// Classify text as a build identifier, where leading zeros are allowed
    pub fn parse_build(text: &str) -> Result<Self, ParseError> {
        Self::classify(text, true)
    }

    fn classify(text: &str, allow_leading_zeros: bool) -> Result<Self, ParseError> {
        const ID_CHARS: [CharType; 3] = [CharType::Digit, CharType::Letter, CharType::Hyphen];

        if text.is_empty() {
            return Err(UnexpectedCharacter::new(None, 0, &ID_CHARS).into());
        }

        for (position, c) in text.chars().enumerate() {
            if !matches!(
                CharType::for_character(Some(c)),
                CharType::Digit | CharType::Letter | CharType::Hyphen
            ) {
                return Err(UnexpectedCharacter::new(Some(c), position, &ID_CHARS).into());
            }
        }

        Self::from_validated(text, allow_leading_zeros)
    }

    /// Build an identifier from text already known to be `[0-9A-Za-z-]+`
    pub(crate) fn from_validated(text: &str, allow_leading_zeros: bool) -> Result<Self, ParseError> {
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Identifier::new(Kind::Alphanumeric, text));
        }

        if !allow_leading_zeros && text.len() > 1 && text.starts_with('0') {
            // "0" followed by more digits: only a letter or hyphen somewhere
            // in the run could have made this a valid identifier.
            let next = text.chars().nth(1);
            return Err(UnexpectedCharacter::new(next, 1, &[CharType::Letter, CharType::Hyphen]).into());
        }

        Ok(Identifier::new(Kind::Numeric, text))
    }

    fn new(kind: Kind, text: impl Into<String>) -> Self {
        Identifier { kind, text: text.into() }
    }

    /// The numeric identifier `0`
    pub(crate) fn zero() -> Self {
        Identifier::new(Kind::Numeric, "0")
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == Kind::Numeric
    }

    /// Decimal successor of a numeric identifier, `None` for alphanumerics.
    ///
    /// The digit width grows on carry (`99` becomes `100`) and otherwise
    /// stays as written (`007` becomes `008`).
    pub fn successor(&self) -> Option<Identifier> {
        if !self.is_numeric() {
            return None;
        }

        let mut bytes = self.text.clone().into_bytes();
        let mut carry = true;
        for b in bytes.iter_mut().rev() {
            if !carry {
                break;
            }
            if *b == b'9' {
                *b = b'0';
            } else {
                *b += 1;
                carry = false;
            }
        }
        if carry {
            bytes.insert(0, b'1');
        }

        String::from_utf8(bytes)
            .ok()
            .map(|digits| Identifier::new(Kind::Numeric, digits))
    }
}

/// Compare two digit runs by numeric value without converting them
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');

    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // equal value, different zero padding (build only)
        .then_with(|| a.cmp(b))
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.as_str(), other.as_str());
        match (self.kind, other.kind) {
            (Kind::Numeric, Kind::Numeric) => compare_numeric(a, b),
            (Kind::Alphanumeric, Kind::Alphanumeric) => a.as_bytes().cmp(b.as_bytes()),
            (Kind::Numeric, Kind::Alphanumeric) => Ordering::Less,
            (Kind::Alphanumeric, Kind::Numeric) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
