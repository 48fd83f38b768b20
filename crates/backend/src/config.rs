//! Backend-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass der Client auch ohne Konfigurationsdatei
//! gegen eine lokale Instanz laeuft.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BackendResult;

/// Konfiguration fuer den Backend-Zugriff
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Basis-URL des gehosteten Backends
    pub url: String,
    /// Statischer Service-Schluessel; wird jeder Anfrage mitgegeben
    pub service_schluessel: String,
    /// Timeout pro Anfrage in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
            service_schluessel: String::new(),
            timeout_sekunden: 30,
        }
    }
}

impl BackendConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei
    pub fn aus_datei(pfad: &Path) -> BackendResult<Self> {
        let inhalt = std::fs::read_to_string(pfad)?;
        Ok(toml::from_str(&inhalt)?)
    }
}
