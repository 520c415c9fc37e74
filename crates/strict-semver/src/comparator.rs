//! Version comparison utilities

use crate::constraint::Operator;
use crate::version::Version;

/// Comparator for comparing version strings
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &str, version2: &str) -> bool {
        Self::compare(version1, ">", version2)
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare(version1, ">=", version2)
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &str, version2: &str) -> bool {
        Self::compare(version1, "<", version2)
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare(version1, "<=", version2)
    }

    /// Check if version1 == version2
    pub fn equal_to(version1: &str, version2: &str) -> bool {
        Self::compare(version1, "==", version2)
    }

    /// Check if version1 != version2
    pub fn not_equal_to(version1: &str, version2: &str) -> bool {
        Self::compare(version1, "!=", version2)
    }

    /// Compare version1 to version2 by precedence using the given operator.
    ///
    /// Returns false when either version or the operator is invalid.
    pub fn compare(version1: &str, operator: &str, version2: &str) -> bool {
        let Ok(operator) = operator.parse::<Operator>() else {
            return false;
        };

        match (Version::parse(version1), Version::parse(version2)) {
            (Ok(v1), Ok(v2)) => operator.accepts(v1.cmp(&v2)),
            _ => false,
        }
    }
}
