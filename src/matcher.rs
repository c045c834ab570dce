//! The matching core: decides which feed candidates look like watched domains.
//!
//! Two rules, checked in priority order for every (reference, candidate) pair:
//! 1. Direct: the reference label occurs verbatim anywhere in the full
//!    candidate string. Note the asymmetry: only the reference side is reduced
//!    to its label, the candidate keeps its TLD and any suffix.
//! 2. Fuzzy: the two labels score at or above the threshold
//!    ([`similarity::ratio`]). Skipped when the threshold is 0 and for pairs
//!    the direct rule already claimed.
//!
//! The matcher is pure: no I/O, no state across calls, inputs untouched.
//! Output order is part of the contract: records appear reference-major,
//! candidate-minor, exactly as the loops visit them.

use serde::Serialize;

use crate::similarity;

/// How a candidate matched a reference domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    #[serde(rename = "DirectMatch")]
    Direct,
    #[serde(rename = "FuzzyMatch")]
    Fuzzy,
}

impl MatchKind {
    /// Stable name used in table, CSV and structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Direct => "DirectMatch",
            MatchKind::Fuzzy => "FuzzyMatch",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (reference, candidate) pair that crossed a matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainMatch {
    /// The watched domain, verbatim from the reference list.
    pub domain: String,

    /// The newly registered domain, verbatim from the feed.
    pub new_domain: String,

    /// Which rule fired.
    pub kind: MatchKind,

    /// Similarity ratio for fuzzy matches; 0 for direct matches, where no
    /// score is computed.
    pub ratio: u32,
}

/// Substring of a domain before its first `.`, or the whole string if it
/// contains none.
pub fn domain_label(domain: &str) -> &str {
    match domain.split_once('.') {
        Some((label, _)) => label,
        None => domain,
    }
}

/// Compare every reference domain against every candidate and collect the
/// pairs that match.
///
/// `fuzz_ratio` is a 0-100 threshold for the fuzzy rule; 0 is a sentinel that
/// disables fuzzy matching entirely (it does not mean "everything matches").
/// A pair produces at most one record: a direct hit suppresses the fuzzy
/// check. Empty inputs produce an empty result. The output is bounded by
/// `references.len() * candidates.len()` records and is deterministic.
pub fn match_domains<R, C>(references: &[R], candidates: &[C], fuzz_ratio: u32) -> Vec<DomainMatch>
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    let mut matches = Vec::new();

    for reference in references {
        let reference = reference.as_ref();
        let label = domain_label(reference);

        for candidate in candidates {
            let candidate = candidate.as_ref();

            if candidate.contains(label) {
                matches.push(DomainMatch {
                    domain: reference.to_string(),
                    new_domain: candidate.to_string(),
                    kind: MatchKind::Direct,
                    ratio: 0,
                });
            } else if fuzz_ratio > 0 {
                let score = similarity::ratio(label, domain_label(candidate));
                if score >= fuzz_ratio {
                    matches.push(DomainMatch {
                        domain: reference.to_string(),
                        new_domain: candidate.to_string(),
                        kind: MatchKind::Fuzzy,
                        ratio: score,
                    });
                }
            }
        }
    }

    matches
}
