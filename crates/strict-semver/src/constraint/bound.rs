//! Bound type for range endpoints

use std::cmp::Ordering;
use std::fmt;

use crate::version::Version;

/// One endpoint of a version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    version: Version,
    is_inclusive: bool,
}

impl Bound {
    /// Create a new bound
    pub fn new(version: Version, is_inclusive: bool) -> Self {
        Bound {
            version,
            is_inclusive,
        }
    }

    pub fn inclusive(version: Version) -> Self {
        Self::new(version, true)
    }

    pub fn exclusive(version: Version) -> Self {
        Self::new(version, false)
    }

    /// Get the version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check if the bound is inclusive
    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }

    /// Check whether `candidate` lies above this bound used as a floor
    pub fn admits_from_below(&self, candidate: &Version) -> bool {
        match candidate.cmp(&self.version) {
            Ordering::Greater => true,
            Ordering::Equal => self.is_inclusive,
            Ordering::Less => false,
        }
    }

    /// Check whether `candidate` lies below this bound used as a ceiling
    pub fn admits_from_above(&self, candidate: &Version) -> bool {
        match candidate.cmp(&self.version) {
            Ordering::Less => true,
            Ordering::Equal => self.is_inclusive,
            Ordering::Greater => false,
        }
    }

    /// Operator text this bound renders with as a floor
    pub(crate) fn lower_operator(&self) -> &'static str {
        if self.is_inclusive {
            ">="
        } else {
            ">"
        }
    }

    /// Operator text this bound renders with as a ceiling
    pub(crate) fn upper_operator(&self) -> &'static str {
        if self.is_inclusive {
            "<="
        } else {
            "<"
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.is_inclusive {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}
