// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for everything that can actually fail.
//!
//! Most "failures" in this crate are not errors at all: an empty query gives
//! an empty result list, an unknown skill name gives `None`, and an old index
//! format gives `None` from [`crate::deserialize_index`] so the caller rebuilds.
//! What remains is I/O, malformed bundles, and callers handing us bad
//! arguments. The last one gets its own variant because it means the caller
//! has a bug, which is a different conversation from "that skill doesn't exist".

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    /// Frontmatter that could not be split or parsed.
    #[error("invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },
    /// A bundle file that exists but cannot be used.
    #[error("bundle error: {0}")]
    Bundle(String),
    /// Caller-supplied parameters that fail validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// True when the error is an argument-validation failure (a caller bug).
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::InvalidArgument(_) => true,
            Self::Context { source, .. } => source.is_invalid_argument(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a human-readable context string to a fallible operation.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }
}
