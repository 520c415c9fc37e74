//! Semantic Versioning 2.0.0 library
//!
//! This crate parses and validates versions that follow the SemVer 2.0.0
//! grammar, orders them by precedence and evaluates range constraints such
//! as `>=1.0.0 & <2.0.0 | ~3.1` against them.
//!
//! ```
//! use strict_semver::{parse_constraint, Version};
//!
//! let version = Version::parse("2.0.0-beta").unwrap();
//! let constraint = parse_constraint(">=1.0.0 & <2.0.0").unwrap();
//! assert!(version.satisfies(&constraint));
//! ```

pub mod constraint;
mod comparator;
mod error;
mod identifier;
mod metadata;
mod normal;
mod semver;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use constraint::{Bound, Expression, Operator};
pub use error::{LexerError, ParseError, UnexpectedCharacter, UnexpectedToken, VersionError};
pub use identifier::Identifier;
pub use metadata::Metadata;
pub use normal::NormalVersion;
pub use semver::Semver;
pub use version::Version;
pub use version_parser::{CharType, VersionParser};

/// Parse version text
pub fn parse_version(text: &str) -> Result<Version, ParseError> {
    Version::parse(text)
}

/// Parse version text, discarding the diagnostic
pub fn try_parse_version(text: &str) -> Option<Version> {
    Version::try_parse(text)
}

pub fn is_valid_version(text: &str) -> bool {
    Version::is_valid(text)
}

/// Parse constraint text into an expression tree
pub fn parse_constraint(text: &str) -> Result<Expression, ParseError> {
    Expression::parse(text)
}
