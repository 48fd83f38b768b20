//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Auth-Logik von der konkreten
//! Datenbank-Implementierung. Die Traits nutzen `async-trait`, damit
//! Store-Handles in gespawnte Tasks (Bereinigung, Hash-Migration)
//! wandern koennen.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{AdminRecord, AdminUpdate, NeueSession, NeuerAdmin, SessionRecord};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://frachtportal.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://frachtportal.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Admin-Zugangsdaten
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Einen neuen Admin anlegen
    async fn create(&self, data: NeuerAdmin<'_>) -> DbResult<AdminRecord>;

    /// Einen Admin anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<AdminRecord>>;

    /// Einen Admin anhand seines Benutzernamens laden (exakter Treffer)
    async fn get_by_name(&self, username: &str) -> DbResult<Option<AdminRecord>>;

    /// Einen Admin partiell aktualisieren
    async fn update(&self, id: Uuid, data: AdminUpdate) -> DbResult<AdminRecord>;

    /// Einen Admin hart loeschen; Sessions werden kaskadierend entfernt
    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// Alle Admins auflisten
    async fn list(&self) -> DbResult<Vec<AdminRecord>>;
}

/// Repository fuer Session-Datensaetze
///
/// Der Store garantiert atomare Einzeloperationen pro Zeile; mehr
/// Koordination braucht die Session-Verwaltung nicht.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Eine neue Session einfuegen
    async fn insert(&self, data: NeueSession<'_>) -> DbResult<SessionRecord>;

    /// Eine Session anhand ihres Tokens laden
    async fn get(&self, id: &str) -> DbResult<Option<SessionRecord>>;

    /// Ablaufzeitpunkt einer Session setzen; false wenn die Zeile fehlt
    async fn update_expiry(&self, id: &str, expires_at: DateTime<Utc>) -> DbResult<bool>;

    /// Eine Session loeschen; false wenn die Zeile fehlt
    async fn delete(&self, id: &str) -> DbResult<bool>;

    /// Alle Sessions eines Admins loeschen, gibt die Anzahl zurueck
    async fn delete_for_admin(&self, admin_id: Uuid) -> DbResult<u64>;

    /// Alle abgelaufenen Sessions loeschen, gibt die Anzahl zurueck
    async fn delete_expired(&self, now: DateTime<Utc>) -> DbResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_config_standard() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.sqlite_wal);
        assert_eq!(cfg.max_verbindungen, 5);
        assert!(cfg.url.starts_with("sqlite://"));
    }
}
