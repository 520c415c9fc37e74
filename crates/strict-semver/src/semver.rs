//! Semver facade providing high-level version operations

use crate::constraint::Expression;
use crate::error::ParseError;
use crate::version::Version;

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a constraint.
    ///
    /// An invalid version or constraint never satisfies.
    pub fn satisfies(version: &str, constraints: &str) -> bool {
        let Ok(version) = Version::parse(version) else {
            return false;
        };

        match Expression::parse(constraints) {
            Ok(expression) => expression.interpret(&version),
            Err(e) => {
                log::debug!("Ignoring invalid constraint {:?}: {}", constraints, e);
                false
            }
        }
    }

    /// Return all versions that satisfy the given constraints
    pub fn satisfied_by(versions: &[&str], constraints: &str) -> Vec<String> {
        let expression = match Expression::parse(constraints) {
            Ok(expression) => expression,
            Err(e) => {
                log::debug!("Ignoring invalid constraint {:?}: {}", constraints, e);
                return Vec::new();
            }
        };

        versions
            .iter()
            .filter(|v| Self::satisfies_parsed(v, &expression))
            .map(|v| v.to_string())
            .collect()
    }

    /// Parse constraints and return a reusable representation.
    pub fn parse_constraints(constraints: &str) -> Result<Expression, ParseError> {
        Expression::parse(constraints)
    }

    /// Check a version against pre-parsed constraints.
    pub fn satisfies_parsed(version: &str, constraints: &Expression) -> bool {
        match Version::parse(version) {
            Ok(version) => constraints.interpret(&version),
            Err(e) => {
                log::debug!("Skipping invalid version {:?}: {}", version, e);
                false
            }
        }
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match Version::parse(v) {
                Ok(version) => Some((version, i)),
                Err(e) => {
                    log::debug!("Dropping invalid version {:?} from sort: {}", v, e);
                    None
                }
            })
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.compare_with_builds(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        // Return original versions in sorted order
        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_positive() {
        // Hyphen ranges
        assert!(Semver::satisfies("1.2.3", "1.0.0 - 2.0.0"));
        assert!(Semver::satisfies("2.0.0", "1.0.0 - 2.0.0"));
        assert!(Semver::satisfies("2.3.9", "1.2 - 2.3"));

        // Pre-releases are not excluded from ranges
        assert!(Semver::satisfies("2.0.0-beta", ">=1.0.0 <2.0.0"));
        assert!(Semver::satisfies("1.2.3-beta", "<=1.2.3"));
        assert!(Semver::satisfies("1.3.0-beta", ">1.2"));

        // Basic constraints
        assert!(Semver::satisfies("1.0.0", "1.0.0"));
        assert!(Semver::satisfies("1.0.0+build.1", "=1.0.0"));
        assert!(Semver::satisfies("1.2.3", "*"));

        // Greater than/less than
        assert!(Semver::satisfies("1.0.0", ">=1.0.0"));
        assert!(Semver::satisfies("1.0.1", ">1.0.0"));
        assert!(Semver::satisfies("2.0.0", "<=2.0.0"));
        assert!(Semver::satisfies("1.9999.9999", "<2.0.0"));

        // With spaces
        assert!(Semver::satisfies("1.0.0", ">= 1.0.0"));
        assert!(Semver::satisfies("1.9999.9999", "<    2.0.0"));

        // Or constraints
        assert!(Semver::satisfies("1.2.4", "0.1.20 || 1.2.4"));
        assert!(Semver::satisfies("0.0.0", ">=0.2.3 || <0.0.1"));
        assert!(Semver::satisfies("0.2.4", ">=0.2.3 or <0.0.1"));

        // Wildcard
        assert!(Semver::satisfies("2.1.3", "2.x.x"));
        assert!(Semver::satisfies("1.2.3", "1.2.x || 2.x"));
        assert!(Semver::satisfies("1.2.3", "x"));
        assert!(Semver::satisfies("1.2.3", "1.2.* || 2.*"));

        // Tilde
        assert!(Semver::satisfies("2.4.5", "~2.4"));
        assert!(Semver::satisfies("1.2.3", "~1"));
        assert!(Semver::satisfies("1.2.9", "~1.2.3"));

        // Combined constraints
        assert!(Semver::satisfies("1.2.3", "~1.2.1 >=1.2.3"));
        assert!(Semver::satisfies("1.2.3", "~1.2.1 1.2.3"));
        assert!(Semver::satisfies("1.2.3", ">=1.2.1, <1.3.0"));
        assert!(Semver::satisfies("1.2.3", "!(1.2.4 | 1.2.5) & ~1.2"));

        // Caret
        assert!(Semver::satisfies("1.8.1", "^1.2.3"));
        assert!(Semver::satisfies("0.1.2", "^0.1.2"));
        assert!(Semver::satisfies("0.1.9", "^0.1"));
        assert!(Semver::satisfies("1.4.2", "^1.2 ^1"));
        assert!(Semver::satisfies("0.0.1-beta", "^0.0.1-alpha"));
    }

    #[test]
    fn test_satisfies_negative() {
        assert!(!Semver::satisfies("2.2.3", "1.0.0 - 2.0.0"));
        assert!(!Semver::satisfies("1.0.1", "1.0.0"));
        assert!(!Semver::satisfies("0.1.0", ">=1.0.0"));
        assert!(!Semver::satisfies("2.2.9", "<=2.0.0"));
        assert!(!Semver::satisfies("1.2.3", "0.1.20 || 1.2.4"));
        assert!(!Semver::satisfies("0.0.3", ">=0.2.3 || <0.0.1"));
        assert!(!Semver::satisfies("3.1.3", "1.2.x || 2.x"));
        assert!(!Semver::satisfies("2.4.1", "2.3"));
        assert!(!Semver::satisfies("3.0.0", "~2.4"));
        assert!(!Semver::satisfies("1.0.0", "<1"));
        assert!(!Semver::satisfies("1.2.3-beta", "<1.2.3-alpha"));
        assert!(!Semver::satisfies("2.0.0-alpha", "^1.2.3"));
        assert!(!Semver::satisfies("0.0.2", "^0.0.1"));
        assert!(!Semver::satisfies("2.0.0-beta", ">=2.0.0 <3.0.0"));
    }

    #[test]
    fn test_satisfies_invalid_input() {
        assert!(!Semver::satisfies("v1.2.3", "*"));
        assert!(!Semver::satisfies("1.2", "*"));
        assert!(!Semver::satisfies("1.2.3", ">=1.0.0 $"));
        assert!(!Semver::satisfies("1.2.3", ">=1.0.0 &"));
    }

    #[test]
    fn test_satisfied_by() {
        let versions = vec!["1.0.0", "1.2.0", "1.9999.9999", "2.0.0", "2.1.0", "0.9999.9999"];
        let result = Semver::satisfied_by(&versions, "~1");
        assert_eq!(result, vec!["1.0.0", "1.2.0", "1.9999.9999"]);

        let versions2 = vec!["1.0.0", "1.1.0", "2.9999.9999", "3.0.0", "3.1.0", "4.0.0", "4.1.0"];
        let result2 = Semver::satisfied_by(&versions2, ">1.0.0 <3.0.0 || >=4.0.0");
        assert_eq!(result2, vec!["1.1.0", "2.9999.9999", "4.0.0", "4.1.0"]);

        let versions3 = vec!["0.1.1", "0.2.0", "not-a-version", "0.2.1", "0.3.0"];
        let result3 = Semver::satisfied_by(&versions3, "^0.2.0");
        assert_eq!(result3, vec!["0.2.0", "0.2.1"]);

        assert!(Semver::satisfied_by(&versions3, "^^").is_empty());
    }

    #[test]
    fn test_sort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0"];
        let sorted = Semver::sort(&versions);
        assert_eq!(sorted, vec!["0.1.0", "0.1.0", "1.0.0", "2.4.0-alpha", "2.4.0", "3.2.1"]);

        let versions2 = vec!["1.0.0+b", "dev-master", "1.0.0", "1.0.0-rc.1"];
        let sorted2 = Semver::sort(&versions2);
        assert_eq!(sorted2, vec!["1.0.0-rc.1", "1.0.0", "1.0.0+b"]);
    }

    #[test]
    fn test_rsort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0"];
        let rsorted = Semver::rsort(&versions);
        assert_eq!(rsorted, vec!["3.2.1", "2.4.0", "2.4.0-alpha", "1.0.0", "0.1.0", "0.1.0"]);
    }

    #[test]
    fn test_parsed_constraints_reuse() {
        let parsed = Semver::parse_constraints("^1.2").unwrap();
        assert!(Semver::satisfies_parsed("1.2.3", &parsed));
        assert!(Semver::satisfies_parsed("1.9.0", &parsed));
        assert!(!Semver::satisfies_parsed("2.0.0", &parsed));
        assert!(!Semver::satisfies_parsed("1.9", &parsed));
    }
}
