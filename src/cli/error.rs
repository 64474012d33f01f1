//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Domain(e) if e.is_bounds_error() => crate::exitcode::DATAERR,
            CliError::Domain(_) => crate::exitcode::SOFTWARE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let overflow = CliError::from(DomainError::Overflow { capacity: 1 });
        assert_eq!(overflow.exit_code(), crate::exitcode::DATAERR);

        let invalid = CliError::from(DomainError::InvalidArgument("1".into()));
        assert_eq!(invalid.exit_code(), crate::exitcode::SOFTWARE);

        let usage = CliError::InvalidArgs("--capacity".into());
        assert_eq!(usage.exit_code(), crate::exitcode::USAGE);
    }
}
