//! Match verdicts

use serde::{Deserialize, Serialize};

use crate::phonetic::PhoneticAlgorithm;

/// Outcome of evaluating one domain against its candidates.
///
/// `is_typosquat` is true exactly when an edit-distance match or a phonetic
/// match was found. An exact match with a trusted domain is not a typosquat;
/// it still reports that domain with distance 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchVerdict {
    pub is_typosquat: bool,
    /// The domain as submitted
    pub input_domain: String,
    pub closest_edit_match: Option<String>,
    pub edit_distance: Option<usize>,
    pub is_phonetic_match: bool,
    pub phonetic_match: Option<String>,
    pub phonetic_algorithm: Option<PhoneticAlgorithm>,
}

impl MatchVerdict {
    /// Nothing within the threshold and no phonetic hit.
    pub fn no_match(input_domain: &str) -> Self {
        Self {
            is_typosquat: false,
            input_domain: input_domain.to_string(),
            closest_edit_match: None,
            edit_distance: None,
            is_phonetic_match: false,
            phonetic_match: None,
            phonetic_algorithm: None,
        }
    }

    /// The input is itself a trusted domain.
    pub fn exact(input_domain: &str, trusted: &str) -> Self {
        Self {
            closest_edit_match: Some(trusted.to_string()),
            edit_distance: Some(0),
            ..Self::no_match(input_domain)
        }
    }

    /// Build a verdict from whichever signals fired.
    pub fn detected(
        input_domain: &str,
        edit_match: Option<(&str, usize)>,
        phonetic_match: Option<(&str, PhoneticAlgorithm)>,
    ) -> Self {
        Self {
            is_typosquat: edit_match.is_some() || phonetic_match.is_some(),
            input_domain: input_domain.to_string(),
            closest_edit_match: edit_match.map(|(domain, _)| domain.to_string()),
            edit_distance: edit_match.map(|(_, distance)| distance),
            is_phonetic_match: phonetic_match.is_some(),
            phonetic_match: phonetic_match.map(|(domain, _)| domain.to_string()),
            phonetic_algorithm: phonetic_match.map(|(_, algorithm)| algorithm),
        }
    }

    pub fn is_exact_match(&self) -> bool {
        !self.is_typosquat && self.edit_distance == Some(0)
    }
}
