/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Value converters referenced by the mapping rules.
//!
//! Each converter works in both directions. Errors are plain reasons; the
//! translator adds which rule failed.

use crate::classify::RecordType;
use crate::date;
use crate::field::FieldValue;
use crate::item::Value;
use crate::name::{Name, NameFormat};

const EDITOR_SUFFIX: &str = ", (ed)";
const EDITORS_SUFFIX: &str = ", (eds)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Copy text as is.
    Identity,
    /// Record type to CSL item type. Has no inverse.
    Type,
    /// A list of display names, each with an optional `,suffix`.
    Names,
    /// One display string kept as a single literal name.
    SingleName,
    /// Like `Names`, with the last entry marked `, (ed)` or `, (eds)`.
    Editors,
    /// Free-text date to a structured date or a status.
    Date,
    /// The `unknown` placeholder for records without any date.
    Unknown,
}

/// What a converter hands to the translator for the CSL side.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    One(Option<Value>),
    Pair(Option<Value>, Option<Value>),
}

/// The refer side input of a rule.
#[derive(Debug, Clone, Copy)]
pub enum SourceInput<'a> {
    RecordType(RecordType),
    Field(&'a FieldValue),
}

type Outcome<T> = std::result::Result<T, String>;

impl Converter {
    pub fn to_target<N: NameFormat>(self, names: &N, input: SourceInput<'_>) -> Outcome<Converted> {
        let field = match (self, input) {
            (Converter::Type, SourceInput::RecordType(record_type)) => {
                return Ok(Converted::One(Some(Value::Type(record_type.item_type()))));
            }
            (_, SourceInput::Field(field)) => field,
            (converter, SourceInput::RecordType(_)) => {
                return Err(format!("{:?} cannot read the record type", converter));
            }
        };

        let converted = match self {
            Converter::Identity => Value::Text(single(field)?.to_string()),
            Converter::Names => Value::Names(names_to_target(names, field.values())),
            Converter::SingleName => Value::Names(vec![Name::literal(single(field)?)]),
            Converter::Editors => {
                let mut entries: Vec<&str> = field.values().collect();
                let last = entries.pop().ok_or("no editor entries")?;
                entries.push(strip_editors_suffix(last).unwrap_or(last));
                Value::Names(names_to_target(names, entries.into_iter()))
            }
            Converter::Date => {
                let (issued, status) = date::parse_date(single(field)?);
                return Ok(Converted::Pair(
                    issued.map(Value::Date),
                    status.map(Value::Text),
                ));
            }
            Converter::Type | Converter::Unknown => {
                return Err(format!("{:?} has no conversion to CSL", self));
            }
        };
        Ok(Converted::One(Some(converted)))
    }

    /// Convert CSL values back to a refer field value. `inputs` holds one
    /// entry per target property of the rule, in order.
    pub fn to_source<N: NameFormat>(
        self,
        names: &N,
        inputs: &[Option<&Value>],
    ) -> Outcome<Option<FieldValue>> {
        let first = inputs.first().copied().flatten();

        let converted = match self {
            Converter::Identity => match first {
                Some(Value::Text(text)) => FieldValue::Single(text.clone()),
                Some(Value::Type(item_type)) => FieldValue::Single(item_type.to_string()),
                other => return Err(unexpected("text", other)),
            },
            Converter::Names => FieldValue::Multiple(names_to_source(names, name_list(first)?)),
            Converter::SingleName => match name_list(first)? {
                [Name::Literal { literal }] => FieldValue::Single(literal.clone()),
                _ => return Err("expected exactly one literal name".to_string()),
            },
            Converter::Editors => {
                let mut entries = names_to_source(names, name_list(first)?);
                let suffix = if entries.len() > 1 {
                    EDITORS_SUFFIX
                } else {
                    EDITOR_SUFFIX
                };
                let last = entries.last_mut().ok_or("no editors")?;
                last.push_str(suffix);
                FieldValue::Multiple(entries)
            }
            Converter::Date => {
                let issued = match first {
                    Some(Value::Date(date)) => Some(date),
                    None => None,
                    other => return Err(unexpected("date", other)),
                };
                let status = inputs.get(1).copied().flatten().and_then(Value::as_text);
                return Ok(date::format_date(issued, status).map(FieldValue::Single));
            }
            Converter::Unknown => FieldValue::Single(date::UNKNOWN.to_string()),
            Converter::Type => return Err("the record type is not written back".to_string()),
        };
        Ok(Some(converted))
    }
}

/// The name without a trailing `, (ed)` or `, (eds)` marker, or `None`
/// when the marker is missing.
pub fn strip_editors_suffix(entry: &str) -> Option<&str> {
    entry
        .strip_suffix(EDITORS_SUFFIX)
        .or_else(|| entry.strip_suffix(EDITOR_SUFFIX))
}

/// Parse one refer name entry. Anything after the first comma is a suffix
/// (`Julius Caesar,Jr.`) and is kept verbatim.
pub fn name_to_target<N: NameFormat>(names: &N, entry: &str) -> Name {
    let (main, suffix) = match entry.split_once(',') {
        Some((main, suffix)) => (main, Some(suffix)),
        None => (entry, None),
    };

    match (names.parse(main), suffix) {
        (Name::Personal(mut name), Some(suffix)) => {
            name.suffix = Some(suffix.to_string());
            Name::Personal(name)
        }
        // a literal has no slot for the suffix, keep the entry whole
        (Name::Literal { .. }, Some(_)) => Name::literal(entry),
        (name, None) => name,
    }
}

pub fn name_to_source<N: NameFormat>(names: &N, name: &Name) -> String {
    match name {
        Name::Personal(personal) if personal.suffix.is_some() => {
            let mut bare = personal.clone();
            let suffix = bare.suffix.take().unwrap_or_default();
            format!("{},{}", names.format(&Name::Personal(bare)), suffix)
        }
        _ => names.format(name),
    }
}

fn names_to_target<'a, N: NameFormat>(
    names: &N,
    entries: impl Iterator<Item = &'a str>,
) -> Vec<Name> {
    entries.map(|entry| name_to_target(names, entry)).collect()
}

fn names_to_source<N: NameFormat>(names: &N, list: &[Name]) -> Vec<String> {
    list.iter().map(|name| name_to_source(names, name)).collect()
}

fn single(field: &FieldValue) -> Outcome<&str> {
    match field {
        FieldValue::Single(value) => Ok(value),
        FieldValue::Multiple(values) => match values.as_slice() {
            [value] => Ok(value),
            _ => Err(format!("expected one value, found {}", values.len())),
        },
    }
}

fn name_list(value: Option<&Value>) -> Outcome<&[Name]> {
    match value {
        Some(Value::Names(names)) => Ok(names),
        other => Err(unexpected("a name list", other)),
    }
}

fn unexpected(expected: &str, found: Option<&Value>) -> String {
    match found {
        Some(value) => format!("expected {}, found {:?}", expected, value.shape()),
        None => format!("expected {}, found nothing", expected),
    }
}
