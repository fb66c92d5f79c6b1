/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The declarative refer <-> CSL mapping.
//!
//! [`MAPPING`] is an ordered list of [`Rule`]s. Order matters: a later rule
//! writing the same slot overwrites an earlier one, and guards are how the
//! table lets one refer field feed different CSL properties depending on
//! the rest of the record (`%A` is an author list unless its last entry is
//! marked as editors).

use std::fmt;

use crate::convert::{self, Converter};
use crate::field::{FieldCode, FieldMap, FieldValue};
use crate::item::{Item, ItemType, Property, Value};

/// Read access to one side of the conversion, by slot.
pub trait Lookup<K> {
    type Value;

    fn lookup(&self, key: K) -> Option<&Self::Value>;
}

impl Lookup<FieldCode> for FieldMap {
    type Value = FieldValue;

    fn lookup(&self, key: FieldCode) -> Option<&FieldValue> {
        self.get(key)
    }
}

impl Lookup<Property> for Item {
    type Value = Value;

    fn lookup(&self, key: Property) -> Option<&Value> {
        self.get(key)
    }
}

/// A test on one slot of a guard.
#[derive(Debug)]
pub enum Condition<V: 'static> {
    Present,
    Absent,
    /// The slot is present and the predicate holds for its value.
    Matches(fn(&V) -> bool),
}

/// Whether a rule may fire, judged on the input of the conversion.
#[derive(Debug)]
pub enum Guard<K: 'static, V: 'static> {
    /// No guard; the rule always fires.
    Always,
    /// The rule is switched on or off for this direction.
    Constant(bool),
    /// Every listed slot must satisfy its condition.
    Each(&'static [(K, Condition<V>)]),
}

impl<K: Copy, V> Guard<K, V> {
    pub fn allows<L: Lookup<K, Value = V>>(&self, input: &L) -> bool {
        match self {
            Guard::Always => true,
            Guard::Constant(enabled) => *enabled,
            Guard::Each(conditions) => conditions.iter().all(|(key, condition)| {
                let value = input.lookup(*key);
                match condition {
                    Condition::Present => value.is_some(),
                    Condition::Absent => value.is_none(),
                    Condition::Matches(predicate) => value.is_some_and(predicate),
                }
            }),
        }
    }
}

/// Where a rule reads from on the refer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The classified record type; only read, never written back.
    RecordType,
    Field(FieldCode),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::RecordType => f.write_str("record type"),
            Source::Field(code) => write!(f, "%{}", code),
        }
    }
}

/// Where a rule writes to on the CSL side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Nothing; the rule only produces refer output.
    None,
    One(Property),
    /// A split into two properties, used for the date and its status.
    Pair(Property, Property),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => f.write_str("nothing"),
            Target::One(property) => write!(f, "{}", property),
            Target::Pair(first, second) => write!(f, "{} and {}", first, second),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub source: Source,
    pub target: Target,
    pub converter: Converter,
    /// Checked against the field map when converting to CSL.
    pub when_source: Guard<FieldCode, FieldValue>,
    /// Checked against the item when converting to refer.
    pub when_target: Guard<Property, Value>,
}

impl Rule {
    /// A one-to-one copy of a refer field into a CSL text property.
    pub const fn copy(code: FieldCode, property: Property) -> Self {
        Rule {
            source: Source::Field(code),
            target: Target::One(property),
            converter: Converter::Identity,
            when_source: Guard::Always,
            when_target: Guard::Always,
        }
    }
}

fn editors_marked(value: &FieldValue) -> bool {
    value
        .last()
        .is_some_and(|last| convert::strip_editors_suffix(last).is_some())
}

fn editors_unmarked(value: &FieldValue) -> bool {
    !editors_marked(value)
}

fn personal_or_several(value: &Value) -> bool {
    match value.as_names() {
        Some([only]) => !only.is_literal(),
        Some(names) => names.len() > 1,
        None => false,
    }
}

fn single_literal(value: &Value) -> bool {
    matches!(value.as_names(), Some([only]) if only.is_literal())
}

fn serial_type(value: &Value) -> bool {
    matches!(
        value,
        Value::Type(ItemType::ArticleJournal | ItemType::ArticleMagazine | ItemType::ArticleNewspaper)
    )
}

fn book_part_type(value: &Value) -> bool {
    matches!(
        value,
        Value::Type(ItemType::Chapter | ItemType::PaperConference)
    )
}

pub static MAPPING: &[Rule] = &[
    // type
    Rule {
        source: Source::RecordType,
        target: Target::One(Property::Type),
        converter: Converter::Type,
        when_source: Guard::Always,
        when_target: Guard::Constant(false),
    },
    // author
    Rule {
        converter: Converter::Names,
        when_source: Guard::Each(&[(FieldCode::A, Condition::Matches(editors_unmarked))]),
        when_target: Guard::Each(&[(Property::Author, Condition::Matches(personal_or_several))]),
        ..Rule::copy(FieldCode::A, Property::Author)
    },
    Rule {
        converter: Converter::SingleName,
        when_source: Guard::Each(&[(FieldCode::A, Condition::Absent)]),
        when_target: Guard::Each(&[(Property::Author, Condition::Matches(single_literal))]),
        ..Rule::copy(FieldCode::Q, Property::Author)
    },
    // collection-title
    Rule::copy(FieldCode::S, Property::CollectionTitle),
    // container-title
    Rule {
        when_target: Guard::Each(&[(Property::Type, Condition::Matches(serial_type))]),
        ..Rule::copy(FieldCode::J, Property::ContainerTitle)
    },
    Rule {
        when_source: Guard::Each(&[(FieldCode::J, Condition::Absent)]),
        when_target: Guard::Each(&[(Property::Type, Condition::Matches(book_part_type))]),
        ..Rule::copy(FieldCode::B, Property::ContainerTitle)
    },
    // editor
    Rule {
        converter: Converter::Editors,
        when_source: Guard::Each(&[(FieldCode::A, Condition::Matches(editors_marked))]),
        when_target: Guard::Each(&[(Property::Author, Condition::Absent)]),
        ..Rule::copy(FieldCode::A, Property::Editor)
    },
    Rule {
        converter: Converter::Names,
        when_target: Guard::Each(&[(Property::Author, Condition::Present)]),
        ..Rule::copy(FieldCode::E, Property::Editor)
    },
    // volume, issue
    Rule::copy(FieldCode::V, Property::Volume),
    Rule::copy(FieldCode::N, Property::Issue),
    // issued, status
    Rule {
        target: Target::Pair(Property::Issued, Property::Status),
        converter: Converter::Date,
        ..Rule::copy(FieldCode::D, Property::Issued)
    },
    Rule {
        target: Target::None,
        converter: Converter::Unknown,
        when_source: Guard::Constant(false),
        when_target: Guard::Each(&[
            (Property::Issued, Condition::Absent),
            (Property::Status, Condition::Absent),
        ]),
        ..Rule::copy(FieldCode::D, Property::Issued)
    },
    // keyword
    Rule::copy(FieldCode::K, Property::Keyword),
    // citation-key, id
    Rule::copy(FieldCode::L, Property::CitationKey),
    Rule {
        when_target: Guard::Each(&[
            (Property::CitationKey, Condition::Absent),
            (Property::CitationLabel, Condition::Absent),
        ]),
        ..Rule::copy(FieldCode::L, Property::Id)
    },
    // note
    Rule::copy(FieldCode::X, Property::Note),
    // number
    Rule::copy(FieldCode::R, Property::Number),
    Rule {
        when_source: Guard::Each(&[(FieldCode::R, Condition::Absent)]),
        when_target: Guard::Constant(false),
        ..Rule::copy(FieldCode::G, Property::Number)
    },
    // page
    Rule::copy(FieldCode::P, Property::Page),
    // publisher, publisher-place
    Rule::copy(FieldCode::I, Property::Publisher),
    Rule::copy(FieldCode::C, Property::PublisherPlace),
    // title
    Rule::copy(FieldCode::T, Property::Title),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Name;

    type SourceGuard = Guard<FieldCode, FieldValue>;

    const MARKED: SourceGuard = Guard::Each(&[(FieldCode::A, Condition::Matches(editors_marked))]);
    const A_WITHOUT_J: SourceGuard =
        Guard::Each(&[(FieldCode::A, Condition::Present), (FieldCode::J, Condition::Absent)]);
    const J_UNMARKED: SourceGuard =
        Guard::Each(&[(FieldCode::J, Condition::Matches(editors_unmarked))]);

    #[test]
    fn guard_conditions() {
        let fields = FieldMap::new().with(FieldCode::A, ["Julius Caesar", "Homerus, (eds)"]);

        assert!(MARKED.allows(&fields));
        assert!(A_WITHOUT_J.allows(&fields));
        assert!(!J_UNMARKED.allows(&fields), "predicates fail on absent slots");
        assert!(!SourceGuard::Constant(false).allows(&fields));
        assert!(SourceGuard::Always.allows(&FieldMap::new()));
    }

    #[test]
    fn author_predicates() {
        let literal = Value::Names(vec![Name::literal("NASA")]);
        let personal = Value::Names(vec![Name::personal("Caesar", Some("Julius"))]);
        let several = Value::Names(vec![Name::literal("NASA"), Name::literal("ESA")]);

        assert!(single_literal(&literal));
        assert!(!personal_or_several(&literal));
        assert!(personal_or_several(&personal));
        assert!(!single_literal(&personal));
        assert!(personal_or_several(&several));
        assert!(!single_literal(&several));
    }

    #[test]
    fn type_predicates() {
        assert!(serial_type(&Value::Type(ItemType::ArticleNewspaper)));
        assert!(!serial_type(&Value::Type(ItemType::Chapter)));
        assert!(book_part_type(&Value::Type(ItemType::PaperConference)));
        assert!(!book_part_type(&Value::Text("chapter".to_string())));
    }

    #[test]
    fn only_the_date_rule_splits() {
        let pairs: Vec<&Rule> = MAPPING
            .iter()
            .filter(|rule| matches!(rule.target, Target::Pair(..)))
            .collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].source, Source::Field(FieldCode::D));
        assert_eq!(pairs[0].converter, Converter::Date);
    }
}
