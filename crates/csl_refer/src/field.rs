/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The refer side of the conversion: field codes, field maps and records.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::classify::RecordType;

/// A refer field code, a single upper case ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldCode(char);

impl FieldCode {
    pub const A: FieldCode = FieldCode('A');
    pub const B: FieldCode = FieldCode('B');
    pub const C: FieldCode = FieldCode('C');
    pub const D: FieldCode = FieldCode('D');
    pub const E: FieldCode = FieldCode('E');
    pub const G: FieldCode = FieldCode('G');
    pub const I: FieldCode = FieldCode('I');
    pub const J: FieldCode = FieldCode('J');
    pub const K: FieldCode = FieldCode('K');
    pub const L: FieldCode = FieldCode('L');
    pub const N: FieldCode = FieldCode('N');
    pub const P: FieldCode = FieldCode('P');
    pub const Q: FieldCode = FieldCode('Q');
    pub const R: FieldCode = FieldCode('R');
    pub const S: FieldCode = FieldCode('S');
    pub const T: FieldCode = FieldCode('T');
    pub const V: FieldCode = FieldCode('V');
    pub const X: FieldCode = FieldCode('X');

    /// Field codes are case-insensitive; anything but a single ASCII letter
    /// is rejected.
    pub fn new(code: char) -> Option<Self> {
        code.is_ascii_alphabetic()
            .then(|| FieldCode(code.to_ascii_uppercase()))
    }

    /// Parse a code token such as `"a"` or `"T"`.
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::new(code),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    /// Author (`A`) and editor (`E`) entries may appear several times in
    /// one record; every other field keeps a single value.
    pub fn is_repeatable(&self) -> bool {
        matches!(self.0, 'A' | 'E')
    }
}

impl fmt::Display for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FieldCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        FieldCode::parse(&token)
            .ok_or_else(|| D::Error::custom(format!("invalid refer field code `{}`", token)))
    }
}

/// The value of one field: a single string, or an ordered list for
/// repeatable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(s) => s.is_empty(),
            FieldValue::Multiple(values) => values.iter().all(String::is_empty),
        }
    }

    /// All values in order; a single value yields one element.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            FieldValue::Single(s) => std::slice::from_ref(s),
            FieldValue::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.values().last()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Single(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Single(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        FieldValue::Multiple(values.iter().map(|s| s.to_string()).collect())
    }
}

/// The fields of one refer record, in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<FieldCode, FieldValue>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldMap::insert`].
    pub fn with(mut self, code: FieldCode, value: impl Into<FieldValue>) -> Self {
        self.insert(code, value);
        self
    }

    /// Set a field, replacing any previous value. Empty values are ignored.
    pub fn insert(&mut self, code: FieldCode, value: impl Into<FieldValue>) {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(code, value);
        }
    }

    /// Add one line's value. Repeatable fields accumulate, others keep the
    /// last value seen.
    pub fn push(&mut self, code: FieldCode, value: String) {
        if value.is_empty() {
            return;
        }
        if !code.is_repeatable() {
            self.0.insert(code, FieldValue::Single(value));
            return;
        }
        let entry = self
            .0
            .entry(code)
            .or_insert_with(|| FieldValue::Multiple(Vec::new()));
        if let FieldValue::Single(first) = entry {
            let first = std::mem::take(first);
            *entry = FieldValue::Multiple(vec![first]);
        }
        if let FieldValue::Multiple(values) = entry {
            values.push(value);
        }
    }

    pub fn get(&self, code: FieldCode) -> Option<&FieldValue> {
        self.0.get(&code)
    }

    pub fn contains(&self, code: FieldCode) -> bool {
        self.0.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldCode, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(FieldCode, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (FieldCode, FieldValue)>>(iter: I) -> Self {
        let mut fields = FieldMap::new();
        for (code, value) in iter {
            fields.insert(code, value);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    #[default]
    #[serde(rename = "refer")]
    Refer,
}

/// A classified refer record, as handed between the codec and the
/// translator. This is also the "object" output form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferRecord {
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub fields: FieldMap,
}

impl ReferRecord {
    /// Wrap a field map, deriving the record type from the fields present.
    pub fn new(fields: FieldMap) -> Self {
        Self {
            scheme: Scheme::Refer,
            record_type: crate::classify::classify(&fields),
            fields,
        }
    }
}
