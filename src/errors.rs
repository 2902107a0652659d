use thiserror::Error;

/// Errors produced while parsing and validating the command-line invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("port must be an integer in [1024, 65535]")]
    InvalidPort,

    #[error("password must be non-empty, at most 50 characters, and contain no whitespace")]
    InvalidPassword,
}

/// Fatal errors that abort startup before the connection engine runs.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid invocation: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("fatal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
