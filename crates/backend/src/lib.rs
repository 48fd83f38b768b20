//! frachtportal-backend – Zugriffsschicht zum gehosteten Backend
//!
//! Dieses Crate ist die Naht zwischen dem Auth-Subsystem und der
//! ausgeklammerten CRUD-Schicht:
//! - [`BackendClient`] haengt an jede ausgehende Anfrage den statischen
//!   Service-Schluessel und, falls angemeldet, den Session-Token.
//! - [`SessionSpeicher`] haelt den Token dauerhaft auf dem Geraet;
//!   kein Token bedeutet "abgemeldet".
//!
//! Ablauf aus Sicht der Oberflaeche: nach erfolgreichem `anmelden`
//! den Token mit [`SessionSpeicher::speichern`] ablegen; beim Start
//! einen vorhandenen Token gegen den AuthService validieren; beim
//! Abmelden erst serverseitig invalidieren (best-effort), dann in
//! jedem Fall [`SessionSpeicher::loeschen`] aufrufen.

pub mod client;
pub mod config;
pub mod error;
pub mod speicher;

// Bequeme Re-Exporte
pub use client::{BackendClient, SERVICE_SCHLUESSEL_HEADER, SESSION_HEADER};
pub use config::BackendConfig;
pub use error::{BackendError, BackendResult};
pub use speicher::{SessionSpeicher, SESSION_SCHLUESSEL};
