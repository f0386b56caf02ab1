//! Error types for the launcher.

use thiserror::Error;

/// Exit status used when the trainer could not be started at all.
pub const EXIT_TRAINER_UNAVAILABLE: i32 = 127;

/// Unified error type for launcher operations.
///
/// Failures of the training run itself are not errors here: the
/// trainer's exit status is passed through untouched.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Launcher configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Trainer program could not be resolved
    #[error("Trainer program '{program}' not found in PATH")]
    TrainerNotFound { program: String },

    /// Trainer program was resolved but could not be started
    #[error("Failed to start trainer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors (config reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LaunchError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        LaunchError::Config(message.into())
    }

    /// Creates a spawn error for `program`.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        LaunchError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Process exit status this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::TrainerNotFound { .. } | LaunchError::Spawn { .. } => {
                EXIT_TRAINER_UNAVAILABLE
            }
            _ => 1,
        }
    }
}
