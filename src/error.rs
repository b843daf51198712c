use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream generation error: {0}")]
    Generation(String),

    #[error("Upstream error: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Invalid model output: {message}")]
    RecoveryParse { message: String, candidate: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn recovery_parse(msg: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self::RecoveryParse {
            message: msg.into(),
            candidate: candidate.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn token(msg: impl Into<String>) -> Self {
        Self::Token(msg.into())
    }

    pub fn pdf(msg: impl Into<String>) -> Self {
        Self::Pdf(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The string that failed to parse, for recovery errors.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::RecoveryParse { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}
