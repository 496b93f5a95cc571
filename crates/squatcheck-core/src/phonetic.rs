//! Phonetic coding of domain labels
//!
//! Codes are computed on the registrable label only (`example` for
//! `www.example.co.uk`), so the TLD never influences how a name "sounds".
//! Encoders come from `rphonetic`.
//!
//! A label the encoders cannot handle (non-ASCII text left over from a failed
//! IDNA conversion, or a label with no letters) is its own code. Two such
//! domains are then similar only when their labels are identical.
//!
//! A name without a dot has no registrable label and is never phonetically
//! similar to anything.

use rphonetic::Encoder;
use serde::{Deserialize, Serialize};

use crate::domain::extract_second_level_label;

/// Supported phonetic algorithms, in the order the arbitrator tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneticAlgorithm {
    /// Letter plus three digits for consonant groups
    Soundex,
    /// Consonant skeleton tuned for English pronunciation
    Metaphone,
    /// Primary code of Double Metaphone
    DoubleMetaphone,
}

impl PhoneticAlgorithm {
    pub const ALL: [Self; 3] = [Self::Soundex, Self::Metaphone, Self::DoubleMetaphone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soundex => "SOUNDEX",
            Self::Metaphone => "METAPHONE",
            Self::DoubleMetaphone => "DOUBLE_METAPHONE",
        }
    }
}

impl std::fmt::Display for PhoneticAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phonetic code of a domain's registrable label.
pub fn code(domain: &str, algorithm: PhoneticAlgorithm) -> String {
    label_code(&extract_second_level_label(domain), algorithm)
}

/// Whether two domains share the same code under `algorithm`.
pub fn are_similar(a: &str, b: &str, algorithm: PhoneticAlgorithm) -> bool {
    let (a, b) = (extract_second_level_label(a), extract_second_level_label(b));
    labels_similar(&a, &b, algorithm)
}

/// [`are_similar`] on already extracted labels. Empty labels never match.
pub fn labels_similar(a: &str, b: &str, algorithm: PhoneticAlgorithm) -> bool {
    !a.is_empty() && !b.is_empty() && label_code(a, algorithm) == label_code(b, algorithm)
}

/// Phonetic code of an already extracted label, with the label as fallback.
pub fn label_code(label: &str, algorithm: PhoneticAlgorithm) -> String {
    encode(label, algorithm).unwrap_or_else(|| label.to_string())
}

fn encode(label: &str, algorithm: PhoneticAlgorithm) -> Option<String> {
    // The encoders' tables only cover ASCII letters
    if label.is_empty() || !label.is_ascii() {
        return None;
    }

    let code = match algorithm {
        PhoneticAlgorithm::Soundex => rphonetic::Soundex::default().encode(label),
        PhoneticAlgorithm::Metaphone => rphonetic::Metaphone::default().encode(label),
        PhoneticAlgorithm::DoubleMetaphone => rphonetic::DoubleMetaphone::default()
            .double_metaphone(label)
            .primary()
            .to_string(),
    };

    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}
