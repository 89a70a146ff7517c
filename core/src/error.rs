//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Every variant halts generation at the point of detection; there is no
/// partial-output mode.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (writing the output sink).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document could not be read or parsed into the spec model.
    #[from(ignore)]
    #[display("Spec Load Error: {_0}")]
    SpecLoad(String),

    /// The spec model holds a structure the generator cannot render
    /// (e.g. two parameters with the same name in one operation).
    #[from(ignore)]
    #[display("Spec Integrity Error: {_0}")]
    SpecIntegrity(String),

    /// The generator configuration file could not be read or parsed.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
