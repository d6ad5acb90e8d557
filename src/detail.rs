//! Detail projection: a decoded record flattened into labelled value groups.

use serde::{Deserialize, Serialize};

use crate::resources::{Name, NamedResource};

/// Shown whenever a field cannot be derived.
pub const FALLBACK: &str = "N/A";

/// One labelled group of display values. `values` is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub label: String,
    pub values: Vec<String>,
}

impl Detail {
    /// A single-valued section; `None` becomes [`FALLBACK`].
    pub fn single(label: &str, value: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            values: vec![value.unwrap_or_else(|| FALLBACK.to_string())],
        }
    }

    /// A multi-valued section; an empty list becomes `[FALLBACK]`.
    pub fn list(label: &str, values: Vec<String>) -> Self {
        let values = if values.is_empty() {
            vec![FALLBACK.to_string()]
        } else {
            values
        };
        Self {
            label: label.to_string(),
            values,
        }
    }
}

/// A record that can be shown as an ordered list of [`Detail`]s.
pub trait Displayable {
    fn details(&self) -> Vec<Detail>;
}

pub fn number(value: Option<i64>) -> Option<String> {
    value.map(|value| value.to_string())
}

pub fn flag(value: Option<bool>) -> Option<String> {
    value.map(|value| value.to_string())
}

/// Capitalized text; blank strings count as missing.
pub fn text(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(capitalize)
}

pub fn resource_name(resource: Option<&NamedResource>) -> Option<String> {
    text(resource.and_then(|resource| resource.name.as_deref()))
}

/// The localized `Names` section shared by every record shape.
pub fn names(names: Option<&[Name]>) -> Detail {
    let values = names
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| text(entry.name.as_deref()))
        .collect();
    Detail::list("Names", values)
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// Any non-alphanumeric character starts a new word, so `special-attack`
/// becomes `Special-Attack`. An apostrophe inside a word does not, so
/// `farfetch'd` becomes `Farfetch'd`.
pub fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if matches!(ch, '\'' | '\u{2019}') && !word_start {
            out.push(ch);
        } else if ch.is_alphanumeric() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize("overgrow"), "Overgrow");
        assert_eq!(capitalize("special-attack"), "Special-Attack");
        assert_eq!(capitalize("generation-iii"), "Generation-Iii");
        assert_eq!(capitalize("SOLAR beam"), "Solar Beam");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_keeps_apostrophes_in_word() {
        assert_eq!(capitalize("farfetch'd"), "Farfetch'd");
        assert_eq!(capitalize("farfetch\u{2019}d"), "Farfetch\u{2019}d");
        assert_eq!(capitalize("sirfetch'd-galar"), "Sirfetch'd-Galar");
        assert_eq!(capitalize("'twas"), "'Twas");
        assert_eq!(capitalize("2nd"), "2nd");
    }

    #[test]
    fn test_capitalize_leaves_caseless_text() {
        assert_eq!(capitalize("しんりょく"), "しんりょく");
    }

    #[test]
    fn test_single_falls_back() {
        assert_eq!(Detail::single("ID", None).values, vec![FALLBACK]);
        assert_eq!(Detail::single("ID", number(Some(7))).values, vec!["7"]);
    }

    #[test]
    fn test_list_never_empty() {
        assert_eq!(Detail::list("Names", Vec::new()).values, vec![FALLBACK]);
    }

    #[test]
    fn test_blank_text_is_missing() {
        assert_eq!(text(Some("  ")), None);
        assert_eq!(text(Some("blaze")), Some("Blaze".to_string()));
    }

    #[test]
    fn test_names_without_usable_entries() {
        let entries = vec![Name { name: None }, Name { name: Some(String::new()) }];
        assert_eq!(names(Some(&entries)).values, vec![FALLBACK]);
        assert_eq!(names(None).values, vec![FALLBACK]);
    }

    #[test]
    fn test_names_keep_order() {
        let entries = vec![
            Name {
                name: Some("engrais".into()),
            },
            Name { name: None },
            Name {
                name: Some("overgrow".into()),
            },
        ];
        assert_eq!(names(Some(&entries)).values, vec!["Engrais", "Overgrow"]);
    }
}
