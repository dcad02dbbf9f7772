//! Core error types

use thiserror::Error;

/// Rejected operator input: the address list, a required parameter or
/// the configuration it was resolved from.
#[derive(Debug, Error)]
pub enum InputError {
    /// The address list contained no tokens at all.
    #[error("address list is empty")]
    EmptyAddressList,

    /// A token of the address list is not a 20-byte hex address.
    #[error("invalid address at position {position} ('{token}'): {reason}")]
    InvalidAddress {
        position: usize,
        token: String,
        reason: String,
    },

    /// A required parameter was not supplied by any configuration source.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter was supplied but cannot be used.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The configuration file is not valid TOML for [`crate::IssuerConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A deployment artifact could not be decoded.
    #[error("deployment artifact error: {0}")]
    Deployment(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for input parsing and configuration.
pub type Result<T> = std::result::Result<T, InputError>;
