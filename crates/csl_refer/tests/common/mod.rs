/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::path::PathBuf;

use csl_refer::Item;
use serde_json::{json, Value};

/// A refer record with the CSL data it stands for.
pub struct Case {
    pub name: &'static str,
    pub input: &'static str,
    pub data: Value,
    /// What formatting `data` gives back, when that differs from `input`.
    pub output: Option<&'static str>,
}

impl Case {
    pub fn output(&self) -> &'static str {
        self.output.unwrap_or(self.input)
    }

    pub fn items(&self) -> Vec<Item> {
        serde_json::from_value(self.data.clone()).expect("case data is valid CSL-JSON")
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures")
}

pub fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "book",
            input: "%A Julius Caesar\n%A Homerus, (eds)\n%D 2000 october 10\n%I Eigenverlag\n%T Sample Text Through the Ages\n",
            data: json!([{
                "editor": [
                    { "family": "Caesar", "given": "Julius" },
                    { "family": "Homerus" }
                ],
                "issued": { "date-parts": [[2000, 10, 10]] },
                "publisher": "Eigenverlag",
                "title": "Sample Text Through the Ages",
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "journal article",
            input: "%A Lars G. Willighagen\n%J PeerJ Computer Science\n%E Silvio Peroni\n%V 5\n%D 2019 august 12\n%P e214\n%T Citation.js: a format-independent, modular bibliography tool for the browser and command line\n",
            data: json!([{
                "author": [{ "family": "Willighagen", "given": "Lars G." }],
                "editor": [{ "family": "Peroni", "given": "Silvio" }],
                "page": "e214",
                "volume": "5",
                "container-title": "PeerJ Computer Science",
                "title": "Citation.js: a format-independent, modular bibliography tool for the browser and command line",
                "issued": { "date-parts": [[2019, 8, 12]] },
                "type": "article-journal"
            }]),
            output: None,
        },
        Case {
            name: "chapter",
            input: "%A Julius Caesar\n%B Sample Text Through the Ages\n%E Homerus\n%D 32\n%P 2-14\n%T Lorem Ipsum\n",
            data: json!([{
                "author": [{ "family": "Caesar", "given": "Julius" }],
                "editor": [{ "family": "Homerus" }],
                "page": "2-14",
                "container-title": "Sample Text Through the Ages",
                "title": "Lorem Ipsum",
                "issued": { "date-parts": [[32]] },
                "type": "chapter"
            }]),
            output: None,
        },
        Case {
            name: "report",
            input: "%A Julius Caesar\n%D 32\n%R USGOV 214\n%T Usage of Trademarked Sample Text\n",
            data: json!([{
                "author": [{ "family": "Caesar", "given": "Julius" }],
                "number": "USGOV 214",
                "title": "Usage of Trademarked Sample Text",
                "issued": { "date-parts": [[32]] },
                "type": "report"
            }]),
            output: None,
        },
        Case {
            name: "literal name",
            input: "%Q National Aeronautics and Space Administration\n%D unknown\n",
            data: json!([{
                "author": [{ "literal": "National Aeronautics and Space Administration" }],
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "single editor",
            input: "%A Julius Caesar, (ed)\n%D unknown\n",
            data: json!([{
                "editor": [{ "family": "Caesar", "given": "Julius" }],
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "multiple editors",
            input: "%A Julius Caesar\n%A Homerus, (eds)\n%D unknown\n",
            data: json!([{
                "editor": [
                    { "family": "Caesar", "given": "Julius" },
                    { "family": "Homerus" }
                ],
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "missing value",
            input: "%A \n%T Sample Text Through the Ages\n",
            data: json!([{
                "title": "Sample Text Through the Ages",
                "type": "book"
            }]),
            output: Some("%D unknown\n%T Sample Text Through the Ages\n"),
        },
        Case {
            name: "unknown month",
            input: "%D 2022 spring\n",
            data: json!([{
                "issued": { "date-parts": [[2022]] },
                "type": "book"
            }]),
            output: Some("%D 2022\n"),
        },
        Case {
            name: "no day",
            input: "%D 2022 march\n",
            data: json!([{
                "issued": { "date-parts": [[2022, 3]] },
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "unknown date",
            input: "%D unknown\n",
            data: json!([{ "type": "book" }]),
            output: None,
        },
        Case {
            name: "forthcoming publication",
            input: "%D forthcoming\n",
            data: json!([{
                "status": "forthcoming",
                "type": "book"
            }]),
            output: None,
        },
        Case {
            name: "name with suffix",
            input: "%A Julius Caesar,Jr.\n%D unknown\n",
            data: json!([{
                "author": [{ "family": "Caesar", "given": "Julius", "suffix": "Jr." }],
                "type": "book"
            }]),
            output: None,
        },
    ]
}
