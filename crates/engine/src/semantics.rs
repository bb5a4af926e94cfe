//! Semantic field formats: which fields carry one, and what text
//! satisfies it.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Format constraint attached to a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SemanticTag {
    #[default]
    None,
    Phone,
    Email,
}

impl fmt::Display for SemanticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticTag::None => write!(f, "none"),
            SemanticTag::Phone => write!(f, "phone"),
            SemanticTag::Email => write!(f, "email"),
        }
    }
}

/// Keyword → tag pairs, checked in order. The first keyword contained in
/// the lowercased field name wins, so `phone` outranks `mail` for names
/// carrying both.
const KEYWORD_TAGS: &[(&str, SemanticTag)] = &[
    ("phone", SemanticTag::Phone),
    ("mail", SemanticTag::Email),
];

/// Derive the semantic tag for a field from its name alone.
///
/// Matching is case-insensitive substring containment, so `user_email`
/// and `Email` both tag as email.
pub fn tag_for_field(name: &str) -> SemanticTag {
    let lowered = name.to_lowercase();
    KEYWORD_TAGS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, tag)| *tag)
        .unwrap_or(SemanticTag::None)
}

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((8|\+7)[\- ]?)?(\(?\d{3}\)?[\- ]?)?[\d\- ]{7,10}$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[a-z0-9!#$%&"*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&"*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$"#,
    )
    .unwrap()
});

/// Russian-style phone number: optional `8`/`+7` prefix, optional
/// three-digit area code, 7 to 10 digits with spaces and dashes allowed.
pub fn is_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// Lower-case-only email address. The pattern covers no upper-case
/// letters, so `Python@python.ru` is rejected while `python@python.ru`
/// passes. Case stays significant on purpose.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Whether `value` satisfies `tag`. `None` imposes nothing.
pub fn satisfies_tag(tag: SemanticTag, value: &str) -> bool {
    match tag {
        SemanticTag::None => true,
        SemanticTag::Phone => is_phone(value),
        SemanticTag::Email => is_email(value),
    }
}
