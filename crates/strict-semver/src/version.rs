//! The version facade

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::constraint::Expression;
use crate::error::{ParseError, VersionError};
use crate::metadata::Metadata;
use crate::normal::NormalVersion;
use crate::version_parser::VersionParser;

const PRE_RELEASE_PREFIX: char = '-';
const BUILD_PREFIX: char = '+';

/// An immutable semantic version.
///
/// `Ord`, `Eq` and `Hash` follow version precedence, which ignores build
/// metadata: `1.0.0+a == 1.0.0+b`. Use [`Version::compare_with_builds`] for
/// a total order that also looks at build metadata.
///
/// Every derived-value operation returns a new `Version`.
#[derive(Debug, Clone)]
pub struct Version {
    normal: NormalVersion,
    pre_release: Option<Metadata>,
    build: Option<Metadata>,
}

impl Version {
    pub(crate) fn from_parts(normal: NormalVersion, pre_release: Option<Metadata>, build: Option<Metadata>) -> Self {
        Version {
            normal,
            pre_release,
            build,
        }
    }

    /// A release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version::from_parts(NormalVersion::new(major, minor, patch), None, None)
    }

    /// `major.0.0`
    pub fn from_major(major: u64) -> Self {
        Version::new(major, 0, 0)
    }

    /// `major.minor.0`
    pub fn from_major_minor(major: u64, minor: u64) -> Self {
        Version::new(major, minor, 0)
    }

    /// Build a version from its components.
    ///
    /// The canonical text is assembled and parsed, so the metadata strings
    /// are held to the same grammar as [`Version::parse`]. Empty strings
    /// count as absent.
    pub fn with_metadata(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self, ParseError> {
        let mut text = NormalVersion::new(major, minor, patch).to_string();
        if let Some(pre_release) = pre_release.filter(|s| !s.is_empty()) {
            text.push(PRE_RELEASE_PREFIX);
            text.push_str(pre_release);
        }
        if let Some(build) = build.filter(|s| !s.is_empty()) {
            text.push(BUILD_PREFIX);
            text.push_str(build);
        }
        VersionParser::parse_valid_semver(&text)
    }

    /// Parse version text such as `1.0.0-rc.1+build.5`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        VersionParser::parse_valid_semver(text)
    }

    /// Parse version text, discarding the diagnostic on failure
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn major(&self) -> u64 {
        self.normal.major()
    }

    pub fn minor(&self) -> u64 {
        self.normal.minor()
    }

    pub fn patch(&self) -> u64 {
        self.normal.patch()
    }

    pub fn normal_version(&self) -> &NormalVersion {
        &self.normal
    }

    pub fn pre_release(&self) -> Option<&Metadata> {
        self.pre_release.as_ref()
    }

    pub fn build_metadata(&self) -> Option<&Metadata> {
        self.build.as_ref()
    }

    pub fn increment_major(&self) -> Result<Self, VersionError> {
        Ok(Version::from_parts(self.normal.increment_major()?, None, None))
    }

    /// Next major version carrying the given pre-release, e.g. `2.0.0-beta`
    pub fn increment_major_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        let pre_release = VersionParser::parse_pre_release(pre_release)?;
        Ok(Version::from_parts(self.normal.increment_major()?, Some(pre_release), None))
    }

    pub fn increment_minor(&self) -> Result<Self, VersionError> {
        Ok(Version::from_parts(self.normal.increment_minor()?, None, None))
    }

    pub fn increment_minor_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        let pre_release = VersionParser::parse_pre_release(pre_release)?;
        Ok(Version::from_parts(self.normal.increment_minor()?, Some(pre_release), None))
    }

    pub fn increment_patch(&self) -> Result<Self, VersionError> {
        Ok(Version::from_parts(self.normal.increment_patch()?, None, None))
    }

    pub fn increment_patch_with(&self, pre_release: &str) -> Result<Self, VersionError> {
        let pre_release = VersionParser::parse_pre_release(pre_release)?;
        Ok(Version::from_parts(self.normal.increment_patch()?, Some(pre_release), None))
    }

    /// Increment the pre-release field, dropping build metadata
    pub fn increment_pre_release(&self) -> Result<Self, VersionError> {
        let pre_release = self
            .pre_release
            .as_ref()
            .ok_or(VersionError::MissingMetadata { field: "pre-release" })?
            .increment()?;
        Ok(Version::from_parts(self.normal, Some(pre_release), None))
    }

    /// Increment the build field, keeping the pre-release
    pub fn increment_build_metadata(&self) -> Result<Self, VersionError> {
        let build = self
            .build
            .as_ref()
            .ok_or(VersionError::MissingMetadata { field: "build metadata" })?
            .increment()?;
        Ok(Version::from_parts(self.normal, self.pre_release.clone(), Some(build)))
    }

    /// Replace the pre-release field, dropping build metadata
    pub fn set_pre_release(&self, pre_release: &str) -> Result<Self, ParseError> {
        let pre_release = VersionParser::parse_pre_release(pre_release)?;
        Ok(Version::from_parts(self.normal, Some(pre_release), None))
    }

    /// Replace the build field, keeping the pre-release
    pub fn set_build_metadata(&self, build: &str) -> Result<Self, ParseError> {
        let build = VersionParser::parse_build(build)?;
        Ok(Version::from_parts(self.normal, self.pre_release.clone(), Some(build)))
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn greater_than_or_equal_to(&self, other: &Version) -> bool {
        self >= other
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self < other
    }

    pub fn less_than_or_equal_to(&self, other: &Version) -> bool {
        self <= other
    }

    /// Same major version
    pub fn is_major_version_compatible(&self, other: &Version) -> bool {
        self.major() == other.major()
    }

    /// Same major and minor version
    pub fn is_minor_version_compatible(&self, other: &Version) -> bool {
        self.major() == other.major() && self.minor() == other.minor()
    }

    /// Build-aware total order.
    ///
    /// Precedence decides first. On a tie, build metadata is compared, with
    /// an absent build field ranking *below* any present one: the opposite
    /// of how an absent pre-release ranks.
    pub fn compare_with_builds(&self, other: &Version) -> Ordering {
        self.cmp(other).then_with(|| match (&self.build, &other.build) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }

    /// Evaluate a parsed constraint against this version
    pub fn satisfies(&self, expression: &Expression) -> bool {
        expression.interpret(self)
    }

    /// Parse a constraint and evaluate it against this version
    pub fn satisfies_str(&self, expression: &str) -> Result<bool, ParseError> {
        Ok(Expression::parse(expression)?.interpret(self))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normal
            .cmp(&other.normal)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                // a release outranks its pre-releases
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normal.hash(state);
        self.pre_release.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normal)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "{}{}", PRE_RELEASE_PREFIX, pre_release)?;
        }
        if let Some(build) = &self.build {
            write!(f, "{}{}", BUILD_PREFIX, build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}
