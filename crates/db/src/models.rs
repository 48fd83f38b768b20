//! Datenbankmodelle fuer das Admin-Subsystem
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind reine Datenuebertragungsobjekte ohne Geschaeftslogik.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Admins
// ---------------------------------------------------------------------------

/// Rolle eines Administrators
///
/// Die Autorisierungsentscheidungen selbst trifft die Backend-Policy,
/// nicht dieses Subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRolle {
    Admin,
    SuperAdmin,
}

impl AdminRolle {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl std::str::FromStr for AdminRolle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(format!("Unbekannte Admin-Rolle: {other}")),
        }
    }
}

/// Admin-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub rolle: AdminRolle,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Admins
#[derive(Debug, Clone)]
pub struct NeuerAdmin<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub rolle: AdminRolle,
}

/// Daten zum Aktualisieren eines Admins
#[derive(Debug, Clone, Default)]
pub struct AdminUpdate {
    pub email: Option<Option<String>>,
    pub password_hash: Option<String>,
    pub rolle: Option<AdminRolle>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Session-Datensatz aus der Datenbank
///
/// Die `id` ist zugleich der Session-Token und wird ausschliesslich aus
/// einer kryptografisch starken Zufallsquelle erzeugt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Daten zum Einfuegen einer neuen Session
#[derive(Debug, Clone)]
pub struct NeueSession<'a> {
    pub id: &'a str,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rolle_roundtrip() {
        assert_eq!(AdminRolle::from_str("admin").unwrap(), AdminRolle::Admin);
        assert_eq!(
            AdminRolle::from_str("super_admin").unwrap(),
            AdminRolle::SuperAdmin
        );
        assert_eq!(AdminRolle::SuperAdmin.als_str(), "super_admin");
    }

    #[test]
    fn unbekannte_rolle_gibt_fehler() {
        assert!(AdminRolle::from_str("gast").is_err());
    }
}
