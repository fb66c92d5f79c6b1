/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Reading and writing the refer text format.
//!
//! A file is a sequence of records separated by blank lines. Each line of a
//! record is `%<code> <value>`, where the code is a single letter.

use crate::field::{FieldCode, FieldMap, ReferRecord};

pub const MARKER: char = '%';

/// Split a refer file into record blocks.
///
/// Line endings are normalised to `\n`, and any run of blank (or
/// whitespace-only) lines separates two records.
pub fn split_records(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.trim().lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current.join("\n"));
    }
    records
}

/// Read the fields of one record block.
///
/// Lines without the `%` marker or with a code that is not a single letter
/// are skipped, as are empty values.
pub fn parse_record(block: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    for line in block.lines() {
        let Some(rest) = line.strip_prefix(MARKER) else {
            tracing::debug!(line, "skipping line without field marker");
            continue;
        };
        let (token, value) = rest.split_once(' ').unwrap_or((rest, ""));
        let Some(code) = FieldCode::parse(token) else {
            tracing::debug!(line, "skipping line with invalid field code");
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        fields.push(code, value.to_string());
    }

    fields
}

/// Split, parse and classify every record of a refer file.
pub fn parse_file(text: &str) -> Vec<ReferRecord> {
    split_records(text)
        .iter()
        .map(|block| ReferRecord::new(parse_record(block)))
        .collect()
}

/// Write one record, one line per value, each line ending in `line_ending`.
pub fn render_record(fields: &FieldMap, line_ending: &str) -> String {
    let mut out = String::new();
    for (code, value) in fields.iter() {
        for value in value.values() {
            out.push(MARKER);
            out.push(code.as_char());
            out.push(' ');
            out.push_str(value);
            out.push_str(line_ending);
        }
    }
    out
}

/// Write several records separated by an empty line.
pub fn render_records(records: &[ReferRecord], line_ending: &str) -> String {
    records
        .iter()
        .map(|record| render_record(&record.fields, line_ending))
        .collect::<Vec<_>>()
        .join(line_ending)
}
