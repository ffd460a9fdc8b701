//! Unified Error Model
//!
//! Only propagated failures live here. Routine data noise (unknown country,
//! disallowed provider, short line) is filtered out and never becomes an error.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SysdashError {
    #[error("SOURCE/{path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TRANSPORT/{url}: {message}")]
    Transport { url: String, message: String },

    #[error("DECODE/{0}")]
    Decode(#[from] serde_json::Error),

    #[error("BITMASK/{text:?}: {source}")]
    Bitmask {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Arithmetic on feed values left the i64 range.
    #[error("OVERFLOW/{0}")]
    Overflow(String),

    #[error("REFERENCE/{path}: {source}")]
    Reference {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CONFIG/{0}")]
    Config(String),
}

impl SysdashError {
    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SysdashError>;
