//! Error types shared by the parser, cache and CLI layers.

use thiserror::Error;

use crate::parser::FileIdentity;

/// Errors a parse provider can report.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("incompatible grammar: {0}")]
    Language(String),
    #[error("parser produced no tree")]
    Cancelled,
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Errors surfaced to callers of the cache and analyzers.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("argument --{name} must not be empty")]
    EmptyArgument { name: String },
    #[error("invalid value {value:?} for argument --{name}")]
    InvalidArgument { name: String, value: String },
    #[error("failed to parse {identity}: {source}")]
    ParseFailure {
        identity: FileIdentity,
        #[source]
        source: ParseError,
    },
}

impl AnalysisError {
    pub fn empty_argument(name: &str) -> Self {
        AnalysisError::EmptyArgument {
            name: name.to_string(),
        }
    }

    pub fn invalid_argument(name: &str, value: &str) -> Self {
        AnalysisError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
