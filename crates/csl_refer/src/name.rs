/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Contributor names and the name parsing capability the translator relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contributor name as it appears in a CSL-JSON name list.
///
/// A name is either split into parts or kept as a single literal string,
/// never both. Deserialization tries the literal form first, so an object
/// carrying a `literal` key is always read as a literal name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Name {
    Literal { literal: String },
    Personal(PersonalName),
}

/// A name broken down into its constituent parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalName {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Name {
    pub fn literal(text: impl Into<String>) -> Self {
        Name::Literal {
            literal: text.into(),
        }
    }

    pub fn personal(family: impl Into<String>, given: Option<&str>) -> Self {
        Name::Personal(PersonalName {
            family: family.into(),
            given: given.map(str::to_string),
            suffix: None,
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Name::Literal { .. })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Literal { literal } => write!(f, "{}", literal),
            Name::Personal(n) => {
                let parts: Vec<&str> = [n.given.as_deref().unwrap_or(""), n.family.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect();
                write!(f, "{}", parts.join(" "))?;
                if let Some(suffix) = &n.suffix {
                    write!(f, ", {}", suffix)?;
                }
                Ok(())
            }
        }
    }
}

/// Converts display names to structured names and back.
///
/// The translator only needs these two operations, so any name parser can
/// be plugged in. `parse` never sees the comma-separated suffix of a refer
/// author entry, and `format` is never handed a name with a suffix.
pub trait NameFormat {
    fn parse(&self, text: &str) -> Name;
    fn format(&self, name: &Name) -> String;
}

/// Whitespace based name parsing in "Given Family" order.
///
/// The last word is the family name. Lowercase words directly before it
/// ("van", "de la") are kept with the family name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNames;

impl NameFormat for PlainNames {
    fn parse(&self, text: &str) -> Name {
        let words: Vec<&str> = text.split_whitespace().collect();
        let Some(last) = words.len().checked_sub(1) else {
            return Name::personal("", None);
        };

        let mut family_start = last;
        while family_start > 1 && starts_lowercase(words[family_start - 1]) {
            family_start -= 1;
        }

        let family = words[family_start..].join(" ");
        if family_start == 0 {
            Name::personal(family, None)
        } else {
            let given = words[..family_start].join(" ");
            Name::personal(family, Some(&given))
        }
    }

    fn format(&self, name: &Name) -> String {
        name.to_string()
    }
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
}
