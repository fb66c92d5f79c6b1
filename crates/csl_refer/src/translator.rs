/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The rule engine that runs the mapping table in either direction.

use crate::convert::{Converted, SourceInput};
use crate::error::{Error, Result};
use crate::field::{FieldMap, ReferRecord};
use crate::item::{Item, Value};
use crate::mapping::{Rule, Source, Target, MAPPING};
use crate::name::{NameFormat, PlainNames};

/// Converts refer records to CSL items and back.
///
/// Rules are applied in table order. A rule is skipped when its guard for
/// the direction rejects the input, or when none of its input slots are
/// set. Fields no rule reads are dropped.
#[derive(Debug, Clone)]
pub struct Translator<N = PlainNames> {
    names: N,
    rules: &'static [Rule],
}

impl Default for Translator<PlainNames> {
    fn default() -> Self {
        Self::new(PlainNames)
    }
}

impl<N: NameFormat> Translator<N> {
    pub fn new(names: N) -> Self {
        Self {
            names,
            rules: MAPPING,
        }
    }

    /// Convert a classified refer record to a CSL item.
    pub fn to_target(&self, record: &ReferRecord) -> Result<Item> {
        let mut item = Item::new();

        for rule in self.rules {
            if rule.target == Target::None || !rule.when_source.allows(&record.fields) {
                continue;
            }

            let input = match rule.source {
                Source::RecordType => SourceInput::RecordType(record.record_type),
                Source::Field(code) => match record.fields.get(code) {
                    Some(value) => SourceInput::Field(value),
                    None => continue,
                },
            };

            let converted = rule
                .converter
                .to_target(&self.names, input)
                .map_err(|reason| conversion_error(rule, reason))?;
            tracing::trace!(source = %rule.source, target = %rule.target, "rule applied");

            match (rule.target, converted) {
                (Target::One(property), Converted::One(value)) => {
                    if let Some(value) = value {
                        item.insert(property, value);
                    }
                }
                (Target::Pair(first, second), Converted::Pair(a, b)) => {
                    if let Some(a) = a {
                        item.insert(first, a);
                    }
                    if let Some(b) = b {
                        item.insert(second, b);
                    }
                }
                (_, converted) => {
                    return Err(conversion_error(
                        rule,
                        format!("converter returned {:?}", converted),
                    ));
                }
            }
        }

        Ok(item)
    }

    /// Convert a CSL item to refer fields.
    pub fn to_source(&self, item: &Item) -> Result<FieldMap> {
        let mut fields = FieldMap::new();

        for rule in self.rules {
            let Source::Field(code) = rule.source else {
                continue;
            };
            if !rule.when_target.allows(item) {
                continue;
            }

            let inputs: Vec<Option<&Value>> = match rule.target {
                Target::None => Vec::new(),
                Target::One(property) => vec![item.get(property)],
                Target::Pair(first, second) => vec![item.get(first), item.get(second)],
            };
            if !inputs.is_empty() && inputs.iter().all(Option::is_none) {
                continue;
            }

            let value = rule
                .converter
                .to_source(&self.names, &inputs)
                .map_err(|reason| conversion_error(rule, reason))?;
            tracing::trace!(source = %rule.source, target = %rule.target, "rule applied");

            if let Some(value) = value {
                fields.insert(code, value);
            }
        }

        Ok(fields)
    }
}

fn conversion_error(rule: &Rule, reason: String) -> Error {
    Error::conversion(rule.source.to_string(), rule.target.to_string(), reason)
}
