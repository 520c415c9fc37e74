//! Pre-release and build metadata sequences

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ParseError, VersionError};
use crate::identifier::Identifier;
use crate::version_parser::VersionParser;

/// An ordered, non-empty sequence of identifiers.
///
/// An absent pre-release or build field is `None` at the [`crate::Version`]
/// level; the two fields give absence opposite precedence, so that decision
/// is not made here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    identifiers: Vec<Identifier>,
}

impl Metadata {
    pub(crate) fn new(identifiers: Vec<Identifier>) -> Self {
        debug_assert!(!identifiers.is_empty());
        Metadata { identifiers }
    }

    /// Parse the text following `-` in a version
    pub fn parse_pre_release(text: &str) -> Result<Self, ParseError> {
        VersionParser::parse_pre_release(text)
    }

    /// Parse the text following `+` in a version
    pub fn parse_build(text: &str) -> Result<Self, ParseError> {
        VersionParser::parse_build(text)
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Replace the right-most numeric identifier with its successor.
    ///
    /// `beta.1` becomes `beta.2`, `1.rc` becomes `2.rc`. A sequence without
    /// a numeric identifier cannot be incremented.
    pub fn increment(&self) -> Result<Self, VersionError> {
        let index = self
            .identifiers
            .iter()
            .rposition(Identifier::is_numeric)
            .ok_or_else(|| VersionError::NoNumericIdentifier {
                metadata: self.to_string(),
            })?;

        let mut identifiers = self.identifiers.clone();
        if let Some(next) = identifiers[index].successor() {
            identifiers[index] = next;
        }

        Ok(Metadata { identifiers })
    }
}

impl Ord for Metadata {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.identifiers.iter().zip(other.identifiers.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        // common prefix exhausted: the shorter sequence is lesser
        self.identifiers.len().cmp(&other.identifiers.len())
    }
}

impl PartialOrd for Metadata {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identifier) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", identifier)?;
        }
        Ok(())
    }
}
