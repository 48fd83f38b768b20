//! Backend-Client mit Session-Header
//!
//! Jede ausgehende Anfrage traegt den statischen Service-Schluessel;
//! ist ein Session-Token vorhanden, kommt er als eigener Header dazu.
//! Die serverseitige Policy entscheidet anhand dieses Headers, ob der
//! Aufrufer eine noch gueltige, ausreichend berechtigte Admin-Session
//! besitzt – dieses Subsystem kennt die CRUD-Berechtigungen nicht.

use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::BackendResult;
use crate::speicher::SessionSpeicher;

/// Header unter dem der Session-Token uebertragen wird
pub const SESSION_HEADER: &str = "x-admin-session";

/// Header fuer den statischen Service-Schluessel
pub const SERVICE_SCHLUESSEL_HEADER: &str = "apikey";

/// HTTP-Client fuer das gehostete Backend
pub struct BackendClient {
    http: reqwest::Client,
    basis_url: String,
    service_schluessel: String,
    speicher: Arc<SessionSpeicher>,
}

impl BackendClient {
    /// Erstellt einen neuen Client
    pub fn neu(config: &BackendConfig, speicher: Arc<SessionSpeicher>) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sekunden))
            .build()?;

        Ok(Self {
            http,
            basis_url: config.url.trim_end_matches('/').to_string(),
            service_schluessel: config.service_schluessel.clone(),
            speicher,
        })
    }

    /// Baut eine Anfrage mit allen Pflicht-Headern
    ///
    /// Ohne Session geht die Anfrage trotzdem raus: oeffentliche
    /// Operationen brauchen keine, den Rest weist das Backend ab.
    pub fn anfrage(&self, methode: Method, pfad: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.basis_url, pfad.trim_start_matches('/'));
        let mut anfrage = self
            .http
            .request(methode, url)
            .header(SERVICE_SCHLUESSEL_HEADER, &self.service_schluessel);

        if let Some(token) = self.speicher.token() {
            anfrage = anfrage.header(SESSION_HEADER, token);
        }

        anfrage
    }

    /// GET-Anfrage auf einen Backend-Pfad
    pub fn get(&self, pfad: &str) -> reqwest::RequestBuilder {
        self.anfrage(Method::GET, pfad)
    }

    /// POST-Anfrage auf einen Backend-Pfad
    pub fn post(&self, pfad: &str) -> reqwest::RequestBuilder {
        self.anfrage(Method::POST, pfad)
    }

    /// Zugriff auf den lokalen Session-Speicher
    pub fn speicher(&self) -> &SessionSpeicher {
        &self.speicher
    }
}
