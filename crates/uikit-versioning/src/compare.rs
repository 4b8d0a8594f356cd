//! ---
//! uikit_section: "14-versioning"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Version comparison helpers for platform feature gates."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use std::cmp::Ordering;

use tracing::trace;

/// Compare two dotted version strings segment by segment.
///
/// The shorter version is padded with `0` segments. Each segment is read as a
/// base-10 integer from its leading digits (`"3beta"` reads as 3). A segment
/// with no leading digits is not a number and is neither greater nor smaller
/// than its counterpart, so it never decides the result.
pub fn compare_version(v1: &str, v2: &str) -> Ordering {
    let left: Vec<&str> = v1.split('.').collect();
    let right: Vec<&str> = v2.split('.').collect();
    let len = left.len().max(right.len());

    for index in 0..len {
        let a = left.get(index).copied().unwrap_or("0");
        let b = right.get(index).copied().unwrap_or("0");
        match (leading_int(a), leading_int(b)) {
            (Some(x), Some(y)) if x != y => return x.cmp(&y),
            (None, _) | (_, None) => {
                trace!(
                    segment = index,
                    left = a,
                    right = b,
                    "non-numeric version segment skipped"
                );
            }
            _ => {}
        }
    }
    Ordering::Equal
}

/// Whether `current` is at least `minimum`.
pub fn meets_minimum(current: &str, minimum: &str) -> bool {
    compare_version(current, minimum) != Ordering::Less
}

/// Leading-digit integer parse: optional whitespace and sign, then digits.
/// Saturates instead of overflowing.
fn leading_int(segment: &str) -> Option<i128> {
    let trimmed = segment.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let run: &str = &digits[..digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len())];
    if run.is_empty() {
        return None;
    }
    let magnitude = run.bytes().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
