//! Bounded edit distance
//!
//! Optimal string alignment (OSA) distance: unit-cost insertion, deletion and
//! substitution, plus swapping two adjacent characters at cost 1. A swapped
//! pair is never edited again, which is what separates OSA from full
//! Damerau-Levenshtein (`"ca"` to `"abc"` is 3 here, not 2).
//!
//! Both inputs are canonicalized with [`normalize`] before comparison.
//!
//! ```rust
//! use squatcheck_core::distance::bounded_edit_distance;
//!
//! assert_eq!(bounded_edit_distance("example.com", "exapmle.com", 2), 1);
//! // Anything beyond the threshold collapses to threshold + 1
//! assert_eq!(bounded_edit_distance("example.com", "completelydifferent.com", 5), 6);
//! ```

use crate::domain::normalize;

/// Edit distance between two domains, bounded by `threshold`.
///
/// Returns the exact distance when it is at most `threshold`, otherwise
/// exactly `threshold + 1`. The sentinel does not say how far apart the
/// inputs are.
pub fn bounded_edit_distance(a: &str, b: &str, threshold: usize) -> usize {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    bounded_osa(&a, &b, threshold)
}

/// Unbounded OSA distance between two canonicalized domains.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::osa_distance(&normalize(a), &normalize(b))
}

pub(crate) fn bounded_osa(a: &[char], b: &[char], threshold: usize) -> usize {
    let exceeded = threshold.saturating_add(1);
    let (m, n) = (a.len(), b.len());

    if m.abs_diff(n) > threshold {
        return exceeded;
    }
    if m == 0 || n == 0 {
        return m.max(n);
    }

    // Three rolling rows. Row i only writes columns [lo - 1, hi + 1]; every
    // cell a later row reads falls inside that window, so stale values from
    // earlier rotations are never observed.
    let mut two_ago = vec![exceeded; n + 1];
    let mut prev = vec![exceeded; n + 1];
    let mut curr = vec![exceeded; n + 1];

    for (j, cell) in prev.iter_mut().enumerate().take(n.min(threshold) + 1) {
        *cell = j;
    }

    for i in 1..=m {
        let lo = i.saturating_sub(threshold).max(1);
        let hi = n.min(i.saturating_add(threshold));

        curr[lo - 1] = if lo == 1 { i.min(exceeded) } else { exceeded };
        let mut row_min = curr[lo - 1];

        for j in lo..=hi {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            let mut cell = prev[j - 1]
                .saturating_add(cost)
                .min(prev[j].saturating_add(1))
                .min(curr[j - 1].saturating_add(1));

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                cell = cell.min(two_ago[j - 2].saturating_add(1));
            }

            curr[j] = cell.min(exceeded);
            row_min = row_min.min(curr[j]);
        }

        if hi < n {
            curr[hi + 1] = exceeded;
        }

        if row_min > threshold {
            return exceeded;
        }

        std::mem::swap(&mut two_ago, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[n];
    if distance <= threshold {
        distance
    } else {
        exceeded
    }
}
