//! Self-contained string similarity scoring.
//!
//! Implements a Ratcliff/Obershelp ratio: find the longest common substring,
//! recurse into the unmatched pieces on either side of it, and normalize
//! twice the total matched character count by the combined length. The result
//! is scaled to an integer percentage so thresholds read naturally
//! ("anything 75 or better is suspicious").
//!
//! Comparison happens per Unicode scalar value, not per byte, so labels with
//! multi-byte characters score the same as their ASCII lookalikes would.

/// Similarity between two strings on a 0-100 scale.
///
/// The score is symmetric; 100 means the strings are identical (two empty
/// strings count as identical), 0 means they share no characters in any
/// order-preserving alignment.
///
/// ```
/// use nrdscan::similarity::ratio;
///
/// assert_eq!(ratio("newspaper", "newspaper"), 100);
/// assert_eq!(ratio("newspaper", "news-paper"), 95);
/// assert_eq!(ratio("abc", "xyz"), 0);
/// ```
pub fn ratio(a: &str, b: &str) -> u32 {
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    // The block search tie-breaks on position in its first argument, which
    // would make the decomposition depend on argument order. A canonical
    // order (shorter first, then lexicographic) keeps the score symmetric.
    if (a.len(), &a) > (b.len(), &b) {
        std::mem::swap(&mut a, &mut b);
    }
    let matched = matched_chars(&a, &b);
    ((200.0 * matched as f64) / total as f64).round() as u32
}

/// Total characters covered by the recursive longest-common-substring
/// decomposition of `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_chars(&a[..start_a], &b[..start_b])
        + matched_chars(&a[start_a + len..], &b[start_b + len..])
}

/// Longest contiguous run shared by `a` and `b`, as (start_a, start_b, len).
/// Ties resolve to the earliest occurrence in `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                cur[j] = prev[j - 1] + 1;
                if cur[j] > best.2 {
                    best = (i - cur[j], j - cur[j], cur[j]);
                }
            } else {
                cur[j] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}
