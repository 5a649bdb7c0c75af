use std::fmt;
use std::path::PathBuf;

/// Fatal registry failures. Either one means the registry cannot be trusted or
/// persisted, so the invocation aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry file could not be read or parsed
    Unreadable {
        /// Location of the registry file
        path: PathBuf,
        /// Underlying I/O or parse error
        reason: String,
    },
    /// The registry file could not be written
    WriteFailed {
        /// Location of the registry file
        path: PathBuf,
        /// Underlying I/O or serialization error
        reason: String,
    },
}

impl RegistryError {
    /// Process exit code used when this error ends an invocation
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Unreadable { .. } => 3,
            Self::WriteFailed { .. } => 4,
        }
    }

    /// Get a user-friendly error message with actionable guidance
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreadable { path, reason } => format!(
                "Cannot read registry {}: {reason}\n\nSuggestions:\n\
                 - Check that the file is valid JSON of the form {{\"files\": {{}}}}\n\
                 - Retention values must be non-negative whole seconds\n\
                 - Tracked paths must be absolute",
                path.display()
            ),
            Self::WriteFailed { path, reason } => format!(
                "Cannot write registry {}: {reason}\n\nSuggestions:\n\
                 - Check file and directory permissions\n\
                 - Check available disk space",
                path.display()
            ),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for RegistryError {}
