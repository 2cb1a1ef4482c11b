use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not connected: {detail}")]
    NotConnected { detail: String },
    #[error("Validation error: {detail}")]
    Validation { detail: String },
    #[error("Transport error: {detail}")]
    Transport { detail: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {detail}")]
    HttpStatus { status: u16, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl ClientError {
    pub fn not_connected(detail: impl Into<String>) -> Self {
        Self::NotConnected {
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code, mirrored in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NotConnected { .. } => "NOT_CONNECTED",
            ClientError::Validation { .. } => "VALIDATION_ERROR",
            ClientError::Transport { .. } => "TRANSPORT_ERROR",
            ClientError::Serialization(_) => "SERIALIZATION_ERROR",
            ClientError::Http(_) => "HTTP_ERROR",
            ClientError::HttpStatus { .. } => "HTTP_STATUS",
            ClientError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Local validation failures are shown to the user as-is.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::transport(format!("websocket error: {e}"))
    }
}

impl From<std::env::VarError> for ClientError {
    fn from(e: std::env::VarError) -> Self {
        ClientError::config(format!("env var error: {e}"))
    }
}
