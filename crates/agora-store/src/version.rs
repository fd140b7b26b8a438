//! Semantic-version comparison for release gating
//!
//! Two checks drive the whole compatibility surface: does the host runtime
//! satisfy a release's `requires` range, and is a release newer than the
//! installed extension.
//!
//! Range evaluation is prerelease-inclusive: a prerelease host build
//! satisfies a non-prerelease lower bound and vice versa. The stock
//! `VersionReq::matches` refuses prerelease versions unless a comparator on
//! the same triple carries a prerelease, so the per-comparator precedence
//! walk is done here without that gate.

use semver::{Comparator, Op, Version, VersionReq};
use std::cmp::Ordering;

/// Check whether a version satisfies a required range
///
/// A missing version is treated as `"0.0.0"`. A missing or blank range
/// means "no constraint". A bare `X.Y.Z` range means "at least X.Y.Z",
/// not "exactly X.Y.Z". Malformed input never panics; it fails the check.
pub fn satisfies_requires(version: Option<&str>, requires: Option<&str>) -> bool {
    let requires = match requires {
        Some(requires) => requires.trim(),
        None => return true,
    };
    if requires.is_empty() {
        return true;
    }

    let version = version
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("0.0.0");
    let Ok(version) = Version::parse(version) else {
        return false;
    };

    let normalized;
    let requires = if is_bare_version(requires) {
        normalized = format!(">={requires}");
        &normalized
    } else {
        requires
    };

    let Ok(req) = VersionReq::parse(requires) else {
        return false;
    };

    req.comparators
        .iter()
        .all(|cmp| comparator_matches(cmp, &version))
}

/// Whether `latest` is strictly newer than the installed version
///
/// A missing installed version counts as `"0.0.0"`; malformed input fails
/// the check rather than panicking. Build metadata is ignored.
pub fn update_available(installed: Option<&str>, latest: &str) -> bool {
    let installed = installed
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("0.0.0");

    match (Version::parse(installed), Version::parse(latest.trim())) {
        (Ok(installed), Ok(latest)) => installed.cmp_precedence(&latest) == Ordering::Less,
        _ => false,
    }
}

/// A bare three-part version with no operator, e.g. `2.1.0`
fn is_bare_version(s: &str) -> bool {
    let mut parts = s.split('.');
    let triple = [parts.next(), parts.next(), parts.next()];
    if parts.next().is_some() {
        return false;
    }
    triple
        .iter()
        .all(|part| part.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())))
}

/// Per-comparator precedence matching without the prerelease gate
fn comparator_matches(cmp: &Comparator, ver: &Version) -> bool {
    match cmp.op {
        Op::Exact | Op::Wildcard => matches_exact(cmp, ver),
        Op::Greater => matches_greater(cmp, ver),
        Op::GreaterEq => matches_exact(cmp, ver) || matches_greater(cmp, ver),
        Op::Less => matches_less(cmp, ver),
        Op::LessEq => matches_exact(cmp, ver) || matches_less(cmp, ver),
        Op::Tilde => matches_tilde(cmp, ver),
        Op::Caret => matches_caret(cmp, ver),
        _ => false,
    }
}

fn matches_exact(cmp: &Comparator, ver: &Version) -> bool {
    if ver.major != cmp.major {
        return false;
    }
    if let Some(minor) = cmp.minor {
        if ver.minor != minor {
            return false;
        }
    }
    match cmp.patch {
        Some(patch) => ver.patch == patch && ver.pre == cmp.pre,
        // Partial comparator is an x-range; prereleases of the matched
        // triple are in range.
        None => true,
    }
}

fn matches_greater(cmp: &Comparator, ver: &Version) -> bool {
    if ver.major != cmp.major {
        return ver.major > cmp.major;
    }
    let minor = match cmp.minor {
        None => return false,
        Some(minor) => minor,
    };
    if ver.minor != minor {
        return ver.minor > minor;
    }
    let patch = match cmp.patch {
        None => return false,
        Some(patch) => patch,
    };
    if ver.patch != patch {
        return ver.patch > patch;
    }
    ver.pre > cmp.pre
}

fn matches_less(cmp: &Comparator, ver: &Version) -> bool {
    if ver.major != cmp.major {
        return ver.major < cmp.major;
    }
    let minor = match cmp.minor {
        None => return false,
        Some(minor) => minor,
    };
    if ver.minor != minor {
        return ver.minor < minor;
    }
    let patch = match cmp.patch {
        None => return false,
        Some(patch) => patch,
    };
    if ver.patch != patch {
        return ver.patch < patch;
    }
    ver.pre < cmp.pre
}

fn matches_tilde(cmp: &Comparator, ver: &Version) -> bool {
    if ver.major != cmp.major {
        return false;
    }
    if let Some(minor) = cmp.minor {
        if ver.minor != minor {
            return false;
        }
    }
    if let Some(patch) = cmp.patch {
        if ver.patch != patch {
            return ver.patch > patch;
        }
        return ver.pre >= cmp.pre;
    }
    true
}

fn matches_caret(cmp: &Comparator, ver: &Version) -> bool {
    if ver.major != cmp.major {
        return false;
    }
    let minor = match cmp.minor {
        None => return true,
        Some(minor) => minor,
    };
    let patch = match cmp.patch {
        None => {
            return if cmp.major > 0 {
                ver.minor >= minor
            } else {
                ver.minor == minor
            };
        }
        Some(patch) => patch,
    };
    if cmp.major > 0 {
        if ver.minor != minor {
            return ver.minor > minor;
        }
        if ver.patch != patch {
            return ver.patch > patch;
        }
    } else if minor > 0 {
        if ver.minor != minor {
            return false;
        }
        if ver.patch != patch {
            return ver.patch > patch;
        }
    } else if ver.minor != minor || ver.patch != patch {
        return false;
    }
    ver.pre >= cmp.pre
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfied_ranges() {
        assert!(satisfies_requires(Some("2.0.0"), Some("*")));
        assert!(satisfies_requires(Some("2.0.0"), Some("")));
        assert!(satisfies_requires(Some("2.0.0"), Some(">=2.0.0")));
        assert!(satisfies_requires(Some("2.1.0"), Some("2.0.0")));
        assert!(satisfies_requires(Some("2.0.0"), Some("2.0.0")));
    }

    #[test]
    fn unsatisfied_ranges() {
        assert!(!satisfies_requires(Some("0.0.0"), Some(">=2.2.0")));
        assert!(!satisfies_requires(Some("2.0.0"), Some(">2.0.0")));
        assert!(!satisfies_requires(Some("2.0.0"), Some(">=2.1.0")));
    }

    #[test]
    fn missing_inputs() {
        assert!(satisfies_requires(Some("2.0.0"), None));
        assert!(satisfies_requires(None, None));
        // Missing version means 0.0.0
        assert!(!satisfies_requires(None, Some(">=2.0.0")));
        assert!(satisfies_requires(None, Some("   ")));
    }

    #[test]
    fn prerelease_inclusive_ranges() {
        assert!(satisfies_requires(Some("2.0.0-beta.1"), Some(">=2.0.0-beta.1")));
        assert!(satisfies_requires(Some("2.0.0-beta.1"), Some(">=2.0.0-beta.0")));
        assert!(satisfies_requires(Some("2.0.0-beta.1"), Some(">=2.0.0-alpha.0")));
        assert!(satisfies_requires(Some("2.0.0"), Some(">=2.0.0-alpha.0")));
        // A prerelease build satisfies a lower non-prerelease bound
        assert!(satisfies_requires(Some("2.1.0-beta.1"), Some(">=2.0.0")));
        assert!(!satisfies_requires(Some("2.0.0-beta.1"), Some(">=2.0.0")));
    }

    #[test]
    fn compound_and_shorthand_ranges() {
        assert!(satisfies_requires(Some("2.5.0"), Some(">=2.0.0, <3.0.0")));
        assert!(!satisfies_requires(Some("3.0.0"), Some(">=2.0.0, <3.0.0")));
        assert!(satisfies_requires(Some("2.5.0"), Some("^2.0.0")));
        assert!(!satisfies_requires(Some("3.0.0"), Some("^2.0.0")));
        assert!(satisfies_requires(Some("2.0.5"), Some("~2.0.0")));
        assert!(!satisfies_requires(Some("2.1.0"), Some("~2.0.0")));
        assert!(satisfies_requires(Some("2.9.9"), Some("2.x")));
    }

    #[test]
    fn malformed_input_does_not_panic() {
        assert!(!satisfies_requires(Some("not-a-version"), Some(">=1.0.0")));
        assert!(!satisfies_requires(Some("1.0.0"), Some("not a range")));
        assert!(!satisfies_requires(Some("1.0"), Some(">=1.0.0")));
    }

    #[test]
    fn update_detection() {
        assert!(update_available(Some("1.0.0"), "1.1.0"));
        assert!(!update_available(Some("1.1.0"), "1.1.0"));
        assert!(!update_available(Some("1.2.0"), "1.1.0"));
        // Prerelease precedes its release
        assert!(update_available(Some("2.0.0-beta.1"), "2.0.0"));
        assert!(!update_available(Some("2.0.0"), "2.0.0-beta.1"));
    }

    #[test]
    fn update_detection_tolerates_bad_input() {
        assert!(update_available(None, "0.0.1"));
        assert!(!update_available(Some("garbage"), "1.0.0"));
        assert!(!update_available(Some("1.0.0"), "garbage"));
    }
}
