/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The CSL-JSON side of the conversion.
//!
//! An [`Item`] is an ordered map from a fixed set of [`Property`] names to
//! typed [`Value`]s. Properties outside that set are dropped on input, since
//! refer has nowhere to put them.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::name::Name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Article,
    ArticleJournal,
    ArticleMagazine,
    ArticleNewspaper,
    Bill,
    Book,
    Broadcast,
    Chapter,
    Classic,
    Collection,
    Dataset,
    Document,
    Entry,
    EntryDictionary,
    EntryEncyclopedia,
    Event,
    Figure,
    Graphic,
    Hearing,
    Interview,
    #[serde(rename = "legal_case")]
    LegalCase,
    Legislation,
    Manuscript,
    Map,
    #[serde(rename = "motion_picture")]
    MotionPicture,
    #[serde(rename = "musical_score")]
    MusicalScore,
    Pamphlet,
    PaperConference,
    Patent,
    Performance,
    Periodical,
    #[serde(rename = "personal_communication")]
    PersonalCommunication,
    Post,
    PostWeblog,
    Regulation,
    Report,
    Review,
    ReviewBook,
    Software,
    Song,
    Speech,
    Standard,
    Thesis,
    Treaty,
    Webpage,
}

impl ItemType {
    /// Parse a CSL type name, falling back to `document` for names outside
    /// the CSL vocabulary.
    pub fn from_csl(name: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap_or_else(|_| {
            tracing::warn!(item_type = name, "unknown item type, using document");
            ItemType::Document
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Article => "article",
            ItemType::ArticleJournal => "article-journal",
            ItemType::ArticleMagazine => "article-magazine",
            ItemType::ArticleNewspaper => "article-newspaper",
            ItemType::Bill => "bill",
            ItemType::Book => "book",
            ItemType::Broadcast => "broadcast",
            ItemType::Chapter => "chapter",
            ItemType::Classic => "classic",
            ItemType::Collection => "collection",
            ItemType::Dataset => "dataset",
            ItemType::Document => "document",
            ItemType::Entry => "entry",
            ItemType::EntryDictionary => "entry-dictionary",
            ItemType::EntryEncyclopedia => "entry-encyclopedia",
            ItemType::Event => "event",
            ItemType::Figure => "figure",
            ItemType::Graphic => "graphic",
            ItemType::Hearing => "hearing",
            ItemType::Interview => "interview",
            ItemType::LegalCase => "legal_case",
            ItemType::Legislation => "legislation",
            ItemType::Manuscript => "manuscript",
            ItemType::Map => "map",
            ItemType::MotionPicture => "motion_picture",
            ItemType::MusicalScore => "musical_score",
            ItemType::Pamphlet => "pamphlet",
            ItemType::PaperConference => "paper-conference",
            ItemType::Patent => "patent",
            ItemType::Performance => "performance",
            ItemType::Periodical => "periodical",
            ItemType::PersonalCommunication => "personal_communication",
            ItemType::Post => "post",
            ItemType::PostWeblog => "post-weblog",
            ItemType::Regulation => "regulation",
            ItemType::Report => "report",
            ItemType::Review => "review",
            ItemType::ReviewBook => "review-book",
            ItemType::Software => "software",
            ItemType::Song => "song",
            ItemType::Speech => "speech",
            ItemType::Standard => "standard",
            ItemType::Thesis => "thesis",
            ItemType::Treaty => "treaty",
            ItemType::Webpage => "webpage",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value shape a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Type,
    Text,
    Names,
    Date,
}

/// The CSL-JSON properties that take part in the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Type,
    Id,
    CitationKey,
    CitationLabel,
    Author,
    Editor,
    Title,
    ContainerTitle,
    CollectionTitle,
    Volume,
    Issue,
    Number,
    Page,
    Publisher,
    PublisherPlace,
    Keyword,
    Note,
    Issued,
    Status,
}

impl Property {
    pub const ALL: [Property; 19] = [
        Property::Type,
        Property::Id,
        Property::CitationKey,
        Property::CitationLabel,
        Property::Author,
        Property::Editor,
        Property::Title,
        Property::ContainerTitle,
        Property::CollectionTitle,
        Property::Volume,
        Property::Issue,
        Property::Number,
        Property::Page,
        Property::Publisher,
        Property::PublisherPlace,
        Property::Keyword,
        Property::Note,
        Property::Issued,
        Property::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Type => "type",
            Property::Id => "id",
            Property::CitationKey => "citation-key",
            Property::CitationLabel => "citation-label",
            Property::Author => "author",
            Property::Editor => "editor",
            Property::Title => "title",
            Property::ContainerTitle => "container-title",
            Property::CollectionTitle => "collection-title",
            Property::Volume => "volume",
            Property::Issue => "issue",
            Property::Number => "number",
            Property::Page => "page",
            Property::Publisher => "publisher",
            Property::PublisherPlace => "publisher-place",
            Property::Keyword => "keyword",
            Property::Note => "note",
            Property::Issued => "issued",
            Property::Status => "status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == key)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Property::Type => Shape::Type,
            Property::Author | Property::Editor => Shape::Names,
            Property::Issued => Shape::Date,
            _ => Shape::Text,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CSL date reduced to its numeric parts.
///
/// Each inner list is `[year, month?, day?]`; a second list marks the end
/// of a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDate {
    #[serde(rename = "date-parts")]
    pub date_parts: Vec<Vec<i32>>,
}

impl StructuredDate {
    pub fn new(year: i32, month: Option<i32>, day: Option<i32>) -> Self {
        let mut parts = vec![year];
        if let Some(month) = month {
            parts.push(month);
            parts.extend(day);
        }
        Self {
            date_parts: vec![parts],
        }
    }

    /// The first parts list, when it holds at least a year.
    pub fn parts(&self) -> Option<&[i32]> {
        self.date_parts
            .first()
            .map(Vec::as_slice)
            .filter(|parts| !parts.is_empty())
    }

    /// Read `date-parts` from a CSL-JSON date object, accepting numeric
    /// strings as well as numbers.
    fn from_json(value: &serde_json::Value) -> Option<Self> {
        let date_parts = value
            .get("date-parts")?
            .as_array()?
            .iter()
            .filter_map(|parts| {
                parts
                    .as_array()?
                    .iter()
                    .map(|part| match part {
                        serde_json::Value::Number(n) => {
                            n.as_i64().and_then(|n| i32::try_from(n).ok())
                        }
                        serde_json::Value::String(s) => s.trim().parse().ok(),
                        _ => None,
                    })
                    .collect::<Option<Vec<i32>>>()
            })
            .collect::<Vec<_>>();
        let date = Self { date_parts };
        date.parts().is_some().then_some(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Type(ItemType),
    Text(String),
    Names(Vec<Name>),
    Date(StructuredDate),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Type(_) => false,
            Value::Text(s) => s.is_empty(),
            Value::Names(names) => names.is_empty(),
            Value::Date(date) => date.date_parts.is_empty(),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Type(_) => Shape::Type,
            Value::Text(_) => Shape::Text,
            Value::Names(_) => Shape::Names,
            Value::Date(_) => Shape::Date,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[Name]> {
        match self {
            Value::Names(names) => Some(names),
            _ => None,
        }
    }

    /// Read a raw JSON value as the given shape. `None` means the value
    /// cannot be represented and should be dropped.
    fn from_json(shape: Shape, value: serde_json::Value) -> Result<Option<Self>, String> {
        let value = match (shape, value) {
            (_, serde_json::Value::Null) => return Ok(None),
            (Shape::Type, serde_json::Value::String(s)) => Value::Type(ItemType::from_csl(&s)),
            (Shape::Type, other) => return Err(format!("expected a type name, found {}", other)),
            (Shape::Text, serde_json::Value::String(s)) => Value::Text(s),
            (Shape::Text, serde_json::Value::Number(n)) => Value::Text(n.to_string()),
            (Shape::Names, value @ serde_json::Value::Array(_)) => {
                Value::Names(serde_json::from_value(value).map_err(|e| e.to_string())?)
            }
            (Shape::Date, value) => match StructuredDate::from_json(&value) {
                Some(date) => Value::Date(date),
                None => return Ok(None),
            },
            (shape, other) => return Err(format!("expected {:?}, found {}", shape, other)),
        };
        Ok(Some(value))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Name>> for Value {
    fn from(names: Vec<Name>) -> Self {
        Value::Names(names)
    }
}

impl From<StructuredDate> for Value {
    fn from(date: StructuredDate) -> Self {
        Value::Date(date)
    }
}

impl From<ItemType> for Value {
    fn from(item_type: ItemType) -> Self {
        Value::Type(item_type)
    }
}

/// A CSL-JSON item restricted to the properties refer can carry.
///
/// Empty values are never stored: a property is either present with a
/// non-empty value or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    properties: IndexMap<Property, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Item::insert`].
    pub fn with(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a property. Empty values are ignored, and a later insert
    /// overwrites an earlier one in place.
    pub fn insert(&mut self, property: Property, value: impl Into<Value>) {
        let value = value.into();
        if !value.is_empty() {
            self.properties.insert(property, value);
        }
    }

    pub fn get(&self, property: Property) -> Option<&Value> {
        self.properties.get(&property)
    }

    pub fn contains(&self, property: Property) -> bool {
        self.properties.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Property, &Value)> {
        self.properties.iter()
    }

    pub fn item_type(&self) -> Option<ItemType> {
        match self.get(Property::Type) {
            Some(Value::Type(item_type)) => Some(*item_type),
            _ => None,
        }
    }

    pub fn text(&self, property: Property) -> Option<&str> {
        self.get(property).and_then(Value::as_text)
    }

    pub fn names(&self, property: Property) -> Option<&[Name]> {
        self.get(property).and_then(Value::as_names)
    }

    pub fn issued(&self) -> Option<&StructuredDate> {
        match self.get(Property::Issued) {
            Some(Value::Date(date)) => Some(date),
            _ => None,
        }
    }

    /// Build an item from a raw CSL-JSON object, keeping only known
    /// properties and coercing each value to its property's shape.
    pub fn from_json_map(raw: IndexMap<String, serde_json::Value>) -> Result<Self, String> {
        let mut item = Item::new();
        for (key, value) in raw {
            let Some(property) = Property::from_key(&key) else {
                tracing::debug!(property = %key, "dropping property refer cannot represent");
                continue;
            };
            match Value::from_json(property.shape(), value) {
                Ok(Some(value)) => item.insert(property, value),
                Ok(None) => {
                    tracing::debug!(%property, "dropping value refer cannot represent");
                }
                Err(reason) => return Err(format!("invalid `{}`: {}", property, reason)),
            }
        }
        Ok(item)
    }
}

impl FromIterator<(Property, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (Property, Value)>>(iter: I) -> Self {
        let mut item = Item::new();
        for (property, value) in iter {
            item.insert(property, value);
        }
        item
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.properties.iter())
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Item::from_json_map(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_csl_json() {
        let json = r#"{
            "id": "kuhn1962",
            "type": "book",
            "author": [{"family": "Kuhn", "given": "Thomas S."}],
            "title": "The Structure of Scientific Revolutions",
            "issued": {"date-parts": [[1962]]},
            "publisher": "University of Chicago Press",
            "publisher-place": "Chicago",
            "ISBN": "9780226458083"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type(), Some(ItemType::Book));
        assert_eq!(item.text(Property::Id), Some("kuhn1962"));
        assert_eq!(item.issued(), Some(&StructuredDate::new(1962, None, None)));
        assert_eq!(
            item.names(Property::Author).unwrap()[0],
            Name::personal("Kuhn", Some("Thomas S."))
        );
        // ISBN has no refer field
        assert_eq!(item.len(), 7);
    }

    #[test]
    fn coerces_numbers_and_string_date_parts() {
        let item: Item = serde_json::from_str(
            r#"{"volume": 5, "issued": {"date-parts": [["2019", "8"]]}, "note": ""}"#,
        )
        .unwrap();
        assert_eq!(item.text(Property::Volume), Some("5"));
        assert_eq!(item.issued(), Some(&StructuredDate::new(2019, Some(8), None)));
        assert!(!item.contains(Property::Note));
    }

    #[test]
    fn unknown_type_becomes_document() {
        let item: Item = serde_json::from_str(r#"{"type": "videogame"}"#).unwrap();
        assert_eq!(item.item_type(), Some(ItemType::Document));

        let item: Item = serde_json::from_str(r#"{"type": "motion_picture"}"#).unwrap();
        assert_eq!(item.item_type(), Some(ItemType::MotionPicture));
    }

    #[test]
    fn literal_only_date_is_dropped() {
        let item: Item =
            serde_json::from_str(r#"{"issued": {"literal": "forthcoming"}}"#).unwrap();
        assert!(item.is_empty());
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(serde_json::from_str::<Item>(r#"{"author": "Kuhn"}"#).is_err());
        assert!(serde_json::from_str::<Item>(r#"{"type": 3}"#).is_err());
    }

    #[test]
    fn serializes_in_insertion_order() {
        let item = Item::new()
            .with(Property::Title, "Lorem Ipsum")
            .with(Property::Issued, StructuredDate::new(32, None, None))
            .with(Property::Type, ItemType::Chapter);
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"title":"Lorem Ipsum","issued":{"date-parts":[[32]]},"type":"chapter"}"#
        );
    }
}
