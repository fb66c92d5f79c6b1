/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Record type inference for refer records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::{FieldCode, FieldMap};
use crate::item::ItemType;

/// The coarse record categories of the refer format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordType {
    #[default]
    Other,
    JournalArticle,
    Book,
    ArticleInBook,
    TechReport,
}

impl RecordType {
    /// The CSL item type a record of this category becomes.
    pub fn item_type(&self) -> ItemType {
        match self {
            RecordType::Other => ItemType::Book,
            RecordType::JournalArticle => ItemType::ArticleJournal,
            RecordType::Book => ItemType::Book,
            RecordType::ArticleInBook => ItemType::Chapter,
            RecordType::TechReport => ItemType::Report,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Other => "other",
            RecordType::JournalArticle => "journal-article",
            RecordType::Book => "book",
            RecordType::ArticleInBook => "article-in-book",
            RecordType::TechReport => "tech-report",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a record by which fields it has, not by their values.
///
/// Checks run in a fixed order and the first hit wins, so a record with
/// both a journal (`J`) and a book title (`B`) is a journal article.
pub fn classify(fields: &FieldMap) -> RecordType {
    if fields.contains(FieldCode::J) {
        RecordType::JournalArticle
    } else if fields.contains(FieldCode::B) {
        RecordType::ArticleInBook
    } else if fields.contains(FieldCode::G) || fields.contains(FieldCode::R) {
        RecordType::TechReport
    } else if fields.contains(FieldCode::I) {
        RecordType::Book
    } else {
        RecordType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(codes: &[FieldCode]) -> FieldMap {
        codes.iter().map(|code| (*code, "x".into())).collect()
    }

    #[test]
    fn first_matching_field_wins() {
        assert_eq!(
            classify(&fields(&[FieldCode::B, FieldCode::J])),
            RecordType::JournalArticle
        );
        assert_eq!(
            classify(&fields(&[FieldCode::I, FieldCode::B, FieldCode::R])),
            RecordType::ArticleInBook
        );
        assert_eq!(
            classify(&fields(&[FieldCode::I, FieldCode::G])),
            RecordType::TechReport
        );
        assert_eq!(classify(&fields(&[FieldCode::I])), RecordType::Book);
    }

    #[test]
    fn falls_back_to_other() {
        assert_eq!(classify(&FieldMap::new()), RecordType::Other);
        assert_eq!(
            classify(&fields(&[FieldCode::A, FieldCode::T])),
            RecordType::Other
        );
        assert_eq!(RecordType::Other.item_type(), ItemType::Book);
    }

    #[test]
    fn maps_to_item_types() {
        assert_eq!(
            RecordType::JournalArticle.item_type(),
            ItemType::ArticleJournal
        );
        assert_eq!(RecordType::ArticleInBook.item_type(), ItemType::Chapter);
        assert_eq!(RecordType::TechReport.item_type(), ItemType::Report);
        assert_eq!(RecordType::Book.item_type(), ItemType::Book);
    }
}
