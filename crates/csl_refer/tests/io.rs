/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::fixtures_dir;

use csl_refer::io::{load_items, load_records};
use csl_refer::{
    Error, FieldCode, FieldValue, FormatOptions, Formatted, ItemType, Name, Property,
    RecordType, Translator,
};

#[test]
fn loads_refer_file() {
    let records = load_records(&fixtures_dir().join("sample.refer")).unwrap();
    let types: Vec<RecordType> = records.iter().map(|r| r.record_type).collect();
    assert_eq!(
        types,
        vec![
            RecordType::JournalArticle,
            RecordType::ArticleInBook,
            RecordType::TechReport
        ]
    );

    let items = Translator::default().translate_records(&records).unwrap();
    assert_eq!(items.len(), 3);
    let report = &items[2];
    assert_eq!(report.item_type(), Some(ItemType::Report));
    assert_eq!(
        report.names(Property::Author),
        Some(&[Name::literal("National Aeronautics and Space Administration")][..])
    );
    assert_eq!(report.text(Property::Number), Some("NASA-TM-1999"));
    assert_eq!(report.text(Property::Status), Some("forthcoming"));
    assert_eq!(report.text(Property::CitationKey), Some("nasa99"));
    assert_eq!(report.text(Property::Id), Some("nasa99"));
    assert_eq!(report.text(Property::PublisherPlace), Some("Washington, DC"));
}

#[test]
fn loads_csl_json_and_drops_unknown_properties() {
    let items = load_items(&fixtures_dir().join("sample.json")).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_type(), Some(ItemType::Book));
    assert_eq!(items[1].item_type(), Some(ItemType::ArticleJournal));

    let out = csl_refer::format(&items[..1], &FormatOptions::default()).unwrap();
    assert_eq!(
        out,
        Formatted::Text(
            "%A Thomas S. Kuhn\n%D 1962\n%L kuhn1962\n%I University of Chicago Press\n%C Chicago\n%T The Structure of Scientific Revolutions\n"
                .to_string()
        )
    );
}

#[test]
fn loads_single_yaml_item() {
    let items = load_items(&fixtures_dir().join("sample.yaml")).unwrap();
    assert_eq!(items.len(), 1);

    let fields = Translator::default().to_source(&items[0]).unwrap();
    assert_eq!(
        fields.get(FieldCode::A),
        Some(&FieldValue::from(["Julius Caesar", "Homerus, (eds)"]))
    );
    assert_eq!(fields.get(FieldCode::D), Some(&FieldValue::from("in press")));
    assert_eq!(fields.get(FieldCode::L), Some(&FieldValue::from("caesar-ed")));
}

#[test]
fn invalid_utf8_is_read_lossily() {
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("latin1.refer");
    std::fs::write(&path, b"%A Fran\xe7ois Viete\n%T Opera\n").unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields.get(FieldCode::T), Some(&FieldValue::from("Opera")));
    assert_eq!(
        records[0].fields.get(FieldCode::A),
        Some(&FieldValue::from(["Fran\u{FFFD}ois Viete"]))
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_items(&fixtures_dir().join("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let err = load_records(&fixtures_dir().join("does-not-exist.refer")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
