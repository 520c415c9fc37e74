//! Desugaring of range shorthands into comparison trees
//!
//! Partial literals describe a span of versions: `1.2` covers
//! `[1.2.0, 1.3.0)`, `1` covers `[1.0.0, 2.0.0)` and `*` covers everything.
//! When the end of a span cannot be represented the span is open-ended.

use super::{Bound, Expression, Operator};
use crate::identifier::Identifier;
use crate::metadata::Metadata;
use crate::normal::NormalVersion;
use crate::version::Version;

/// A version literal as written in a constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Literal {
    Full(Version),
    Partial(PartialVersion),
}

/// A version with missing or wildcard components (`None`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl PartialVersion {
    pub(crate) fn new(major: Option<u64>, minor: Option<u64>, patch: Option<u64>) -> Self {
        PartialVersion { major, minor, patch }
    }

    /// First version of the span
    fn floor(&self) -> Version {
        match self.major {
            None => minimum(),
            Some(major) => Version::new(major, self.minor.unwrap_or(0), self.patch.unwrap_or(0)),
        }
    }

    /// First version past the span, `None` when unbounded
    fn ceil(&self) -> Option<Version> {
        let floor = NormalVersion::new(self.major?, self.minor.unwrap_or(0), self.patch.unwrap_or(0));
        let next = match (self.minor, self.patch) {
            (None, _) => floor.increment_major(),
            (Some(_), None) => floor.increment_minor(),
            (Some(_), Some(_)) => floor.increment_patch(),
        };
        next.ok().map(release)
    }
}

impl Literal {
    fn floor(&self) -> Version {
        match self {
            Literal::Full(version) => version.clone(),
            Literal::Partial(partial) => partial.floor(),
        }
    }
}

/// The lowest version there is: `0.0.0-0`
fn minimum() -> Version {
    let zero = Metadata::new(vec![Identifier::zero()]);
    Version::from_parts(NormalVersion::new(0, 0, 0), Some(zero), None)
}

fn release(normal: NormalVersion) -> Version {
    Version::from_parts(normal, None, None)
}

/// `[low, high)`, or `>= low` when there is no upper end
fn span(low: Version, high: Option<Version>) -> Expression {
    match high {
        Some(high) => Expression::Range {
            low: Bound::inclusive(low),
            high: Bound::exclusive(high),
        },
        None => Expression::Comparison(Operator::GreaterThanOrEqual, low),
    }
}

/// `op literal`; a bare literal is an equality
pub(crate) fn comparison(operator: Operator, literal: Literal) -> Expression {
    let partial = match literal {
        Literal::Full(version) => return Expression::Comparison(operator, version),
        Literal::Partial(partial) => partial,
    };

    match operator {
        Operator::Equal => span(partial.floor(), partial.ceil()),
        Operator::NotEqual => Expression::Not(Box::new(span(partial.floor(), partial.ceil()))),
        Operator::GreaterThanOrEqual => Expression::Comparison(operator, partial.floor()),
        Operator::LessThan => Expression::Comparison(operator, partial.floor()),
        Operator::GreaterThan => match partial.ceil() {
            Some(ceil) => Expression::Comparison(Operator::GreaterThanOrEqual, ceil),
            // nothing lies above an open span
            None => Expression::Comparison(Operator::LessThan, minimum()),
        },
        Operator::LessThanOrEqual => match partial.ceil() {
            Some(ceil) => Expression::Comparison(Operator::LessThan, ceil),
            None => Expression::Comparison(Operator::GreaterThanOrEqual, minimum()),
        },
    }
}

/// `~1.2.3` allows patch-level changes: `[1.2.3, 1.3.0)`
pub(crate) fn tilde(literal: Literal) -> Expression {
    match literal {
        Literal::Full(version) => {
            let ceil = version.normal_version().increment_minor().ok().map(release);
            span(version, ceil)
        }
        Literal::Partial(partial) => span(partial.floor(), partial.ceil()),
    }
}

/// `^1.2.3` allows changes that keep the left-most non-zero component:
/// `[1.2.3, 2.0.0)`, `^0.2.3` is `[0.2.3, 0.3.0)`, `^0.0.3` is `[0.0.3, 0.0.4)`
pub(crate) fn caret(literal: Literal) -> Expression {
    let low = literal.floor();
    let normal = *low.normal_version();

    let ceil = match literal {
        Literal::Partial(PartialVersion { major: None, .. }) => None,
        Literal::Partial(PartialVersion { minor: None, .. }) => normal.increment_major().ok(),
        Literal::Partial(PartialVersion { patch: None, .. }) if normal.major() == 0 => normal.increment_minor().ok(),
        Literal::Partial(PartialVersion { patch: None, .. }) => normal.increment_major().ok(),
        _ if normal.major() > 0 => normal.increment_major().ok(),
        _ if normal.minor() > 0 => normal.increment_minor().ok(),
        _ => normal.increment_patch().ok(),
    };

    span(low, ceil.map(release))
}

/// `1.2.3 - 2.3.4` is inclusive at both ends; a partial upper end covers
/// its whole span, so `1.2 - 2.3` is `[1.2.0, 2.4.0)`
pub(crate) fn hyphen(low: Literal, high: Literal) -> Expression {
    let low = low.floor();
    match high {
        Literal::Full(high) => Expression::Range {
            low: Bound::inclusive(low),
            high: Bound::inclusive(high),
        },
        Literal::Partial(high) => span(low, high.ceil()),
    }
}
