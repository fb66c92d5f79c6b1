/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::Path;

use crate::codec;
use crate::error::{Error, Result};
use crate::field::ReferRecord;
use crate::item::Item;

/// Load the records of a refer file.
pub fn load_records(path: &Path) -> Result<Vec<ReferRecord>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(codec::parse_file(&text))
}

/// Load CSL items from a file.
/// `.json` files hold CSL-JSON, anything else is read as YAML. Either may be
/// a list of items or a single item.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let bytes = fs::read(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    parse_items(&String::from_utf8_lossy(&bytes), ext)
}

/// Read CSL items from text, `ext` naming the format as a file extension
/// would.
pub fn parse_items(content: &str, ext: &str) -> Result<Vec<Item>> {
    match ext {
        "json" => {
            // Check for syntax errors first
            let _: serde_json::Value = serde_json::from_str(content)?;

            if let Ok(items) = serde_json::from_str::<Vec<Item>>(content) {
                return Ok(items);
            }
            serde_json::from_str::<Item>(content)
                .map(|item| vec![item])
                .map_err(|e| Error::Parse("JSON".to_string(), e.to_string()))
        }
        _ => {
            // Check for syntax errors first
            let _: serde_yaml::Value = serde_yaml::from_str(content)?;

            if let Ok(items) = serde_yaml::from_str::<Vec<Item>>(content) {
                return Ok(items);
            }
            serde_yaml::from_str::<Item>(content)
                .map(|item| vec![item])
                .map_err(|e| Error::Parse("YAML".to_string(), e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Property;

    #[test]
    fn reads_list_or_single_item() {
        let items = parse_items(r#"[{"type": "book", "title": "One"}, {"title": "Two"}]"#, "json")
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text(Property::Title), Some("Two"));

        let items = parse_items("type: book\ntitle: Only\n", "yaml").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text(Property::Title), Some("Only"));
    }

    #[test]
    fn syntax_errors_name_the_format() {
        let err = parse_items("[{", "json").unwrap_err();
        assert!(matches!(err, Error::Parse(ref format, _) if format == "JSON"));

        let err = parse_items("a: [b", "yaml").unwrap_err();
        assert!(matches!(err, Error::Parse(ref format, _) if format == "YAML"));
    }
}
