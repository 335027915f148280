//! Core error types

use thiserror::Error;

/// Errors raised while parsing widget values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A color literal that is not `#rrggbb` / `#rrggbbaa`
    #[error("invalid color literal: {0}")]
    InvalidColor(String),

    /// An option value outside its accepted set
    #[error("invalid value {value:?} for option `{option}`")]
    InvalidOption { option: &'static str, value: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
