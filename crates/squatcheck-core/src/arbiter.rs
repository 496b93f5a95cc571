//! Match arbitration
//!
//! Decides whether one input domain is a typosquat of any of the candidates
//! it was handed:
//!
//! 1. An exact match with a candidate wins outright and is *not* flagged.
//! 2. Otherwise every candidate is scored by bounded edit distance. The
//!    smallest distance within the threshold is kept, first seen on ties.
//! 3. Independently, candidates are checked phonetically. The first
//!    candidate that shares a code with the input under any enabled
//!    algorithm (tried in Soundex, Metaphone, Double Metaphone order) is
//!    kept and the phonetic scan stops there.
//!
//! Candidates may come from any [`CandidateSource`](crate::source::CandidateSource),
//! so each name is canonicalized once per scan before it is compared, and the
//! verdict reports canonical names.

use std::borrow::Cow;

use tracing::{debug, info};

use crate::config::DetectionConfig;
use crate::distance::bounded_osa;
use crate::domain::{canonicalize, second_level_label, CanonicalDomain};
use crate::phonetic::{label_code, PhoneticAlgorithm};
use crate::source::TrustedDomain;
use crate::verdict::MatchVerdict;

/// Evaluate a raw input domain against a candidate list.
pub fn evaluate(
    input_domain: &str,
    candidates: &[TrustedDomain],
    config: &DetectionConfig,
) -> MatchVerdict {
    evaluate_canonical(&CanonicalDomain::parse(input_domain), candidates, config)
}

pub(crate) fn evaluate_canonical(
    input: &CanonicalDomain,
    candidates: &[TrustedDomain],
    config: &DetectionConfig,
) -> MatchVerdict {
    let names: Vec<Cow<'_, str>> = candidates
        .iter()
        .map(|c| canonicalize(&c.domain_name))
        .collect();

    if let Some(exact) = names.iter().find(|name| **name == input.normalized) {
        debug!(domain = %input.normalized, "exact match with trusted domain");
        return MatchVerdict::exact(&input.raw, exact);
    }

    let threshold = config.edit_distance_threshold;
    let input_chars: Vec<char> = input.normalized.chars().collect();

    // A bare input has no registrable label to compare
    let input_codes: Vec<(PhoneticAlgorithm, String)> = if input.second_level_label.is_empty() {
        Vec::new()
    } else {
        config
            .enabled_phonetic_algorithms()
            .into_iter()
            .map(|algorithm| (algorithm, label_code(&input.second_level_label, algorithm)))
            .collect()
    };

    let mut closest: Option<(&str, usize)> = None;
    let mut phonetic: Option<(&str, PhoneticAlgorithm)> = None;
    let mut candidate_chars: Vec<char> = Vec::new();

    for name in &names {
        let name: &str = name;
        candidate_chars.clear();
        candidate_chars.extend(name.chars());

        let distance = bounded_osa(&input_chars, &candidate_chars, threshold);
        let closer = match closest {
            Some((_, best)) => distance < best,
            None => true,
        };
        if distance <= threshold && closer {
            closest = Some((name, distance));
        }

        if phonetic.is_none() && !input_codes.is_empty() {
            let label = second_level_label(name);
            if !label.is_empty() {
                phonetic = input_codes
                    .iter()
                    .find(|(algorithm, code)| label_code(label, *algorithm) == *code)
                    .map(|(algorithm, _)| (name, *algorithm));
            }
        }
    }

    if let Some((matched, distance)) = closest {
        info!(
            domain = %input.normalized,
            matched,
            distance,
            "typosquatting detected by edit distance"
        );
    }
    if let Some((matched, algorithm)) = phonetic {
        info!(
            domain = %input.normalized,
            matched,
            %algorithm,
            "typosquatting detected by phonetic match"
        );
    }

    MatchVerdict::detected(&input.raw, closest, phonetic)
}
