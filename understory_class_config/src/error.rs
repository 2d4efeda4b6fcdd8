// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for bindings files.

use core::fmt;

use thiserror::Error;

/// Errors that can occur when loading a bindings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is not a bindings document (bad JSON or no `bindings` key).
    #[error("invalid bindings document: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more binding trees failed validation.
    #[error("{}", TreeErrors(.0))]
    InvalidTrees(Vec<TreeError>),
}

/// A binding tree that failed validation.
#[derive(Debug, Error)]
#[error("binding tree {index}: {source}")]
pub struct TreeError {
    /// Position of the tree in the file's `bindings` list.
    pub index: usize,
    /// The validation failure.
    pub source: serde_json::Error,
}

struct TreeErrors<'a>(&'a [TreeError]);

impl fmt::Display for TreeErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
