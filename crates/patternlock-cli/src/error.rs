use std::path::PathBuf;

use patternlock_core::PatternConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] PatternConfigError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("trace line {line}: {message}")]
    TraceParse { line: usize, message: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Process exit code: 1 for environment failures, 2 for bad input.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } | Self::Output(_) | Self::Config(PatternConfigError::Io(_)) => 1,
            Self::Config(_) | Self::TraceParse { .. } | Self::InvalidArgument(_) => 2,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
