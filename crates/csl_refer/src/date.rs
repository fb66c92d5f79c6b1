/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Free-text refer dates.
//!
//! refer dates have no grammar: `2000 october 10`, `32`, `Mar. 1999` and
//! `forthcoming` are all valid. This follows the heuristics of the classic
//! `refer` tool: the year is the first number in a plausible range, the month
//! is the first word that abbreviates a month name, and a day is only looked
//! for once a month was found.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::item::StructuredDate;

pub const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Date text that means "no date" rather than a publication status.
pub const UNKNOWN: &str = "unknown";

// A whole digit run of 3 or 4 digits, or 2 digits from 32 to 99.
static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[^0-9]|^)([0-9]{4}|[0-9]{3}|[4-9][0-9]|3[2-9])(?:[^0-9]|$)")
        .expect("year pattern is valid")
});

// A whole digit run from 1 to 31, optionally zero-padded.
static DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[^0-9]|^)(3[01]|[12][0-9]|0?[1-9])(?:[^0-9]|$)")
        .expect("day pattern is valid")
});

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("word pattern is valid"));

/// Parse refer date text into a structured date or a status.
///
/// At most one side of the pair is set. Text without a recognisable year
/// becomes a status (`forthcoming`, `in press`), except the placeholder
/// `unknown`, which yields neither.
pub fn parse_date(text: &str) -> (Option<StructuredDate>, Option<String>) {
    let Some(year) = find_number(&YEAR, text) else {
        let status = (text != UNKNOWN).then(|| text.to_string());
        return (None, status);
    };

    let month = find_month(text);
    let day = month.and_then(|_| find_number(&DAY, text));

    (Some(StructuredDate::new(year, month, day)), None)
}

/// Render a date back to refer text, falling back to the status.
///
/// Returns `None` when there is neither a usable date nor a status; the
/// caller decides what, if anything, to write in that case.
pub fn format_date(date: Option<&StructuredDate>, status: Option<&str>) -> Option<String> {
    if let Some(parts) = date.and_then(StructuredDate::parts) {
        let rendered: Vec<String> = parts
            .iter()
            .enumerate()
            .map(|(index, part)| match index {
                1 => month_name(*part)
                    .map(str::to_string)
                    .unwrap_or_else(|| part.to_string()),
                _ => part.to_string(),
            })
            .collect();
        return Some(rendered.join(" "));
    }

    status.map(str::to_string)
}

/// The 1-based month whose name starts with the first word that abbreviates
/// any month, so `Mar.` is March and `spring` is nothing.
pub fn find_month(text: &str) -> Option<i32> {
    WORD.find_iter(text).find_map(|word| {
        let word = word.as_str().to_ascii_lowercase();
        MONTHS
            .iter()
            .position(|month| month.starts_with(&word))
            .and_then(|index| i32::try_from(index + 1).ok())
    })
}

pub fn month_name(month: i32) -> Option<&'static str> {
    usize::try_from(month)
        .ok()
        .and_then(|month| month.checked_sub(1))
        .and_then(|index| MONTHS.get(index))
        .copied()
}

fn find_number(pattern: &Regex, text: &str) -> Option<i32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
