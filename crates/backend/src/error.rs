//! Fehlertypen fuer den Backend-Client

use thiserror::Error;

/// Alle moeglichen Fehler im Backend-Client
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    #[error("HTTP-Fehler: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML-Fehler: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result-Alias fuer den Backend-Client
pub type BackendResult<T> = Result<T, BackendError>;
