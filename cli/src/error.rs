#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use clientgen_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Failure raised by the generator (loading, integrity, config, output).
    #[display("{}", _0)]
    Core(AppError),

    /// Logging could not be initialized.
    #[from(ignore)]
    #[display("Logging setup failed: {}", _0)]
    Logging(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display_is_passed_through() {
        let err: CliError = AppError::SpecLoad("bad yaml".into()).into();
        assert_eq!(format!("{}", err), "Spec Load Error: bad yaml");
    }
}
