//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Ungueltige Eingabe: {0}")]
    EingabeUngueltig(String),

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Authentifizierung ---
    #[error("Benutzername oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Session ---
    #[error("Session nicht gefunden oder abgelaufen")]
    SessionUngueltig,

    #[error("Session abgelaufen")]
    SessionAbgelaufen,

    // --- Verwaltung ---
    #[error("Benutzername bereits vergeben: {0}")]
    BenutzernameVergeben(String),

    #[error("Admin nicht gefunden: {0}")]
    AdminNichtGefunden(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] frachtportal_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn der Fehler "nicht angemeldet" bedeutet
    ///
    /// Solche Fehler fuehren still zurueck zur Anmeldemaske und werden
    /// nie als Fehlermeldung angezeigt.
    pub fn ist_sitzungsfehler(&self) -> bool {
        matches!(self, Self::SessionUngueltig | Self::SessionAbgelaufen)
    }

    /// Meldungstext fuer die Oberflaeche
    ///
    /// Eingabefehler nennen den konkreten Grund, Anmeldefehler bleiben
    /// bewusst generisch (kein Rueckschluss auf Benutzername vs. Passwort),
    /// Infrastrukturfehler geben keinerlei Interna preis.
    pub fn benutzer_meldung(&self) -> String {
        match self {
            Self::EingabeUngueltig(grund) => grund.clone(),
            Self::UngueltigeAnmeldedaten => "Benutzername oder Passwort falsch".into(),
            Self::BenutzernameVergeben(name) => {
                format!("Benutzername '{name}' bereits vergeben")
            }
            Self::SessionUngueltig | Self::SessionAbgelaufen => {
                "Bitte erneut anmelden".into()
            }
            Self::AdminNichtGefunden(_)
            | Self::PasswortHashing(_)
            | Self::Datenbank(_)
            | Self::Intern(_) => "Dienst derzeit nicht verfuegbar".into(),
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
