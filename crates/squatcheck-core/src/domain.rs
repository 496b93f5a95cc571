//! Domain canonicalization
//!
//! Every comparison in the engine runs on canonical names: lowercase, IDNA
//! ASCII form where conversion succeeds, and no leading `www.` label.
//!
//! # TLD rule
//!
//! The "TLD" here is the last label of a two-label name and the last *two*
//! labels of anything longer, so `example.co.uk` groups under `co.uk` and
//! `mail.example.com` groups under `example.com`.
//!
//! ```rust
//! use squatcheck_core::domain::{extract_second_level_label, extract_tld, normalize};
//!
//! assert_eq!(normalize("WWW.Example.COM"), "example.com");
//! assert_eq!(extract_tld("example.com"), "com");
//! assert_eq!(extract_tld("sub.example.co.uk"), "co.uk");
//! assert_eq!(extract_second_level_label("sub.example.co.uk"), "example");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

const WWW_LABEL: &str = "www.";

/// Second-level labels that registries use under two-letter country codes
/// (`co.uk`, `com.au`, `ne.jp`, ...).
const REGISTRY_LABELS: &[&str] = &[
    "ac", "co", "com", "edu", "go", "gov", "ltd", "mil", "ne", "net", "nic", "or", "org", "plc",
    "sch",
];

/// Canonicalize a raw domain name.
///
/// Lowercases, converts internationalized labels to their ASCII (punycode)
/// form and strips the leading `www.` label. IDNA failures are not errors:
/// the lowercased input is kept as-is.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let lowered = raw.to_lowercase();
    let ascii = idna::domain_to_ascii(&lowered).unwrap_or(lowered);

    strip_www(&ascii).to_string()
}

/// [`normalize`] without the allocation when `domain` is already canonical.
///
/// Lowercase ASCII with no leading `www.` label maps to itself under
/// [`normalize`], so it is borrowed as-is.
pub fn canonicalize(domain: &str) -> Cow<'_, str> {
    let already_canonical = domain
        .bytes()
        .all(|b| b.is_ascii() && !b.is_ascii_uppercase())
        && !domain.starts_with(WWW_LABEL);

    if already_canonical {
        Cow::Borrowed(domain)
    } else {
        Cow::Owned(normalize(domain))
    }
}

/// Extract the TLD group of a domain (see module docs for the rule).
///
/// Returns an empty string for names with fewer than two labels.
pub fn extract_tld(domain: &str) -> String {
    let labels = labels(domain);
    match labels.len() {
        0 | 1 => String::new(),
        2 => labels[1].to_string(),
        n => format!("{}.{}", labels[n - 2], labels[n - 1]),
    }
}

/// Extract the registrable label of a domain, after normalizing.
///
/// This is the label before the last one, or the label before a country-code
/// registry suffix such as `co.uk`: `www.example.com`, `sub.example.com` and
/// `sub.example.co.uk` all yield `example`. A name without a dot yields an
/// empty string.
pub fn extract_second_level_label(domain: &str) -> String {
    second_level_label(&normalize(domain)).to_string()
}

/// A domain broken into the parts the matcher needs.
///
/// Created per lookup and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDomain {
    pub raw: String,
    pub normalized: String,
    pub tld: String,
    pub second_level_label: String,
}

impl CanonicalDomain {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize(raw);
        let tld = extract_tld(&normalized);
        let second_level_label = second_level_label(&normalized).to_string();

        Self {
            raw: raw.to_string(),
            normalized,
            tld,
            second_level_label,
        }
    }

    /// True when the name has no TLD (no dot)
    pub fn is_bare(&self) -> bool {
        self.tld.is_empty()
    }
}

// Repeats so that stacked prefixes cannot survive a single pass and break
// idempotence.
fn strip_www(mut domain: &str) -> &str {
    while let Some(rest) = domain.strip_prefix(WWW_LABEL) {
        domain = rest;
    }
    domain
}

pub(crate) fn second_level_label(normalized: &str) -> &str {
    let labels = labels(normalized);
    match labels.len() {
        0 | 1 => "",
        2 => labels[0],
        n if is_registry_suffix(labels[n - 2], labels[n - 1]) => labels[n - 3],
        n => labels[n - 2],
    }
}

fn is_registry_suffix(second: &str, top: &str) -> bool {
    top.len() == 2
        && top.bytes().all(|b| b.is_ascii_lowercase())
        && REGISTRY_LABELS.contains(&second)
}

/// Split on dots, ignoring trailing empty labels (`example.com.`).
fn labels(domain: &str) -> Vec<&str> {
    let mut labels: Vec<&str> = domain.split('.').collect();
    while labels.last().is_some_and(|label| label.is_empty()) {
        labels.pop();
    }
    labels
}
