/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! refer <-> CSL-JSON conversion
//!
//! This crate reads bibliographic records in the `refer` field-code format
//! (`%A`, `%T`, `%D`, ...) and converts them to CSL-JSON items, and back.
//! The conversion is driven by a declarative rule table ([`mapping::MAPPING`])
//! run by a [`Translator`] in either direction.
//!
//! # Example
//!
//! ```rust
//! use csl_refer::{FormatOptions, Formatted, ItemType, Property};
//!
//! let text = "%A Leo Tolstoy\n%T War and Peace\n%I The Russian Messenger\n%D 1869";
//! let items = csl_refer::parse(text).unwrap();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].item_type(), Some(ItemType::Book));
//! assert_eq!(items[0].text(Property::Title), Some("War and Peace"));
//!
//! let out = csl_refer::format(&items, &FormatOptions::default()).unwrap();
//! assert_eq!(
//!     out,
//!     Formatted::Text(
//!         "%A Leo Tolstoy\n%D 1869\n%I The Russian Messenger\n%T War and Peace\n".to_string()
//!     )
//! );
//! ```

pub mod classify;
pub mod codec;
pub mod convert;
pub mod date;
pub mod error;
pub mod field;
pub mod io;
pub mod item;
pub mod mapping;
pub mod name;
pub mod options;
pub mod translator;

use serde::Serialize;

pub use classify::{classify, RecordType};
pub use error::{Error, Result};
pub use field::{FieldCode, FieldMap, FieldValue, ReferRecord};
pub use item::{Item, ItemType, Property, StructuredDate, Value};
pub use name::{Name, NameFormat, PersonalName, PlainNames};
pub use options::{FormatOptions, LineEnding, OutputFormat};
pub use translator::Translator;

/// The result of [`format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Formatted {
    Text(String),
    Records(Vec<ReferRecord>),
}

impl<N: NameFormat> Translator<N> {
    /// Parse refer text and convert every record to a CSL item.
    pub fn parse_text(&self, text: &str) -> Result<Vec<Item>> {
        self.translate_records(&codec::parse_file(text))
    }

    /// Convert already parsed records, as loaded by [`io::load_records`].
    pub fn translate_records(&self, records: &[ReferRecord]) -> Result<Vec<Item>> {
        tracing::debug!(records = records.len(), "translating records");
        records.iter().map(|record| self.to_target(record)).collect()
    }

    /// Convert CSL items to refer, as text or as classified records.
    pub fn format_items(&self, items: &[Item], options: &FormatOptions) -> Result<Formatted> {
        let records = items
            .iter()
            .map(|item| self.to_source(item).map(ReferRecord::new))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(records = records.len(), format = ?options.format, "formatted items");

        Ok(match options.format {
            OutputFormat::Text => {
                Formatted::Text(codec::render_records(&records, options.line_ending.as_str()))
            }
            OutputFormat::Object => Formatted::Records(records),
        })
    }
}

/// Parse refer text with the default name handling.
pub fn parse(text: &str) -> Result<Vec<Item>> {
    Translator::default().parse_text(text)
}

/// Format CSL items as refer with the default name handling.
pub fn format(items: &[Item], options: &FormatOptions) -> Result<Formatted> {
    Translator::default().format_items(items, options)
}
