use thiserror::Error;

/// CLI-level error categories mapped to exit codes. Anything that reaches
/// here is fatal for the process; per-symbol problems are absorbed upstream.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] intrabar_core::ValidationError),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] intrabar_core::StoreError),

    #[error(transparent)]
    Cycle(#[from] intrabar_core::CycleError),

    #[error("http client error: {0}")]
    Http(#[from] intrabar_core::HttpError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Config(_) => 2,
            Self::Store(_) | Self::Cycle(_) | Self::Http(_) | Self::Io(_) => 10,
        }
    }
}
