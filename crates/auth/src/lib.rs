//! frachtportal-auth – Admin-Credential- und Session-Subsystem
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit PBKDF2-HMAC-SHA256 (Konstantzeit-Vergleich)
//! - Session-Verwaltung (Zeilen-Store mit TTL und Lazy Reap)
//! - AuthService (Anmeldung, Abmeldung, Passwortwechsel,
//!   Session-Validierung, Legacy-Hash-Migration)
//!
//! Es ist eine Bibliothek ohne eigene Oberflaeche; die ausgeklammerte
//! CRUD-Schicht konsumiert sie ueber den AuthService.

pub mod error;
pub mod passwort;
pub mod service;
pub mod session;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use passwort::{konstantzeit_gleich, passwort_hashen, passwort_verifizieren};
pub use service::{AuthService, LEGACY_KLARTEXT_SENTINEL};
pub use session::{SessionManager, SESSION_TTL_SEKUNDEN};
