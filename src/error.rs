//! Error types for robot rig construction and evaluation.

use thiserror::Error;

/// Main error type for the crate.
///
/// Frame evaluation itself never fails; these errors surface while building
/// proportions and scene configuration, or from the checked stack API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A root body dimension was zero, negative, or not finite.
    #[error("invalid body dimension `{name}`: {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    /// A pop was requested with no matching push.
    #[error("transform stack underflow")]
    StackUnderflow,

    /// Inconsistent scene configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
