//! Unified error handling for proclab
//!
//! Only conditions that abort a demonstration are errors. Expected outcomes
//! such as "no children left" or "target process is gone" are modelled in
//! the return types of the operations that produce them.

use std::io;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum LabError {
    /// Host lacks fork or a /proc-style introspection filesystem
    #[error("unsupported platform: {reason}")]
    UnsupportedPlatform { reason: String },

    /// A flag required by the selected task was not supplied
    #[error("missing argument {flag} for task {task}")]
    MissingArgument { flag: &'static str, task: String },

    #[error("command line is empty")]
    EmptyCommand,

    #[error("unbalanced {quote} quote in command line")]
    UnbalancedQuote { quote: char },

    #[error("command line ends with an unescaped backslash")]
    TrailingEscape,

    #[error("argument contains an interior NUL byte: {arg:?}")]
    InvalidArgument { arg: String },

    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("wait failed: {0}")]
    Wait(#[source] nix::Error),

    #[error("{program} not found")]
    ProgramNotFound { program: String },

    #[error("exec of {program} failed: {errno}")]
    Exec { program: String, errno: nix::Error },

    #[error("process listing via {command} failed: {source}")]
    ProcessListing {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification used for exit codes and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Startup,
    Usage,
    Process,
    Io,
}

impl LabError {
    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            LabError::UnsupportedPlatform { .. } => ErrorCategory::Startup,
            LabError::MissingArgument { .. }
            | LabError::EmptyCommand
            | LabError::UnbalancedQuote { .. }
            | LabError::TrailingEscape
            | LabError::InvalidArgument { .. } => ErrorCategory::Usage,
            LabError::Fork(_)
            | LabError::Wait(_)
            | LabError::ProgramNotFound { .. }
            | LabError::Exec { .. } => ErrorCategory::Process,
            LabError::ProcessListing { .. } | LabError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Process exit code for a failure that reaches `main`
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            LabError::UnsupportedPlatform { reason } => format!(
                "WARNING: This program requires Linux (fork and /proc). Exiting. ({})",
                reason
            ),
            LabError::MissingArgument { flag, task } => {
                format!("Please provide {} <pid> for task {}", flag, task)
            }
            other => other.to_string(),
        }
    }
}

pub type LabResult<T> = Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = LabError::UnsupportedPlatform {
            reason: "no /proc".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Startup);
        assert_eq!(err.exit_code(), 1);

        let err = LabError::MissingArgument {
            flag: "--pid",
            task: "4".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.exit_code(), 1);

        let err = LabError::Wait(nix::Error::EINTR);
        assert_eq!(err.category(), ErrorCategory::Process);
    }

    #[test]
    fn test_error_messages() {
        let err = LabError::MissingArgument {
            flag: "--pid",
            task: "4".to_string(),
        };
        assert_eq!(err.user_message(), "Please provide --pid <pid> for task 4");

        let err = LabError::ProgramNotFound {
            program: "nosuchprog".to_string(),
        };
        assert_eq!(err.user_message(), "nosuchprog not found");

        let err = LabError::UnsupportedPlatform {
            reason: "fork unavailable".to_string(),
        };
        assert!(err.user_message().contains("requires Linux"));
    }
}
