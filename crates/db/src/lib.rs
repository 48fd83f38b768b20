//! frachtportal-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt den Zeilen-Store fuer das Admin-Subsystem bereit:
//! Zugangsdaten (`admins`) und Sessions (`sessions`) hinter den
//! Repository-Traits, implementiert auf SQLite (WAL-Modus, eingebettete
//! Migrationen).

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::{
    AdminRecord, AdminRolle, AdminUpdate, NeueSession, NeuerAdmin, SessionRecord,
};
pub use repository::{AdminRepository, DatabaseConfig, SessionRepository};
pub use sqlite::SqliteDb;
