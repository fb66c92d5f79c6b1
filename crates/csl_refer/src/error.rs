/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A converter was handed a value of a shape it cannot handle.
    #[error("failed to convert {from} to {to}: {reason}")]
    Conversion {
        from: String,
        to: String,
        reason: String,
    },

    #[error("failed to parse {0}: {1}")]
    Parse(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn conversion(
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Conversion {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse("JSON".to_string(), e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Parse("YAML".to_string(), e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
