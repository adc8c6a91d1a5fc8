use std::io::ErrorKind;

use crate::invocation::Step;

/// Exit code for a configuration that could not be resolved.
pub const CONFIG_EXIT_CODE: i32 = 2;

/// Enum to represent errors that abort a launch.
#[derive(thiserror::Error, Debug)]
pub enum LauncherError {
    /// Represents an IO error, wrapping a standard `std::io::Error`.
    #[error("io error {0}")]
    IOError(#[from] std::io::Error),

    /// The environment could not be turned into a launch configuration.
    #[error("invalid configuration: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Indicates that an external program could not be started at all.
    #[error("could not start {command}")]
    SpawnFailed {
        /// The rendered command line.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Represents a step whose command exited with a non-zero code.
    #[error("{step} failed with exit code {code}: {command}")]
    StepFailed {
        step: Step,
        /// The rendered command line.
        command: String,
        code: i32,
    },
}

impl LauncherError {
    /// The process exit code the launcher should terminate with.
    ///
    /// A failed step passes its own code through. Spawn failures follow the shell's
    /// conventions: 127 for a missing program, 126 for one that cannot be executed.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::StepFailed { code, .. } => *code,
            LauncherError::SpawnFailed { source, .. } => match source.kind() {
                ErrorKind::NotFound => 127,
                ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            LauncherError::ConfigError(_) => CONFIG_EXIT_CODE,
            LauncherError::IOError(_) => 1,
        }
    }
}
