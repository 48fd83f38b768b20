//! Lokaler Session-Speicher
//!
//! Haelt den aktuellen Session-Token des Geraets in einer kleinen
//! JSON-Datei unter einem festen Schluessel. Kein Token bedeutet
//! "abgemeldet". Die Datei ist die einzige dauerhafte Ablage; der
//! In-Memory-Wert ist nur ein Spiegel fuer schnelle Zugriffe und
//! ersetzt nie die serverseitige Validierung.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::error::BackendResult;

/// Fester Schlussel unter dem der Token in der Datei liegt
pub const SESSION_SCHLUESSEL: &str = "admin_session";

/// Dauerhafter Schluessel-Wert-Speicher fuer den Session-Token
pub struct SessionSpeicher {
    pfad: PathBuf,
    aktuell: RwLock<Option<String>>,
}

impl SessionSpeicher {
    /// Oeffnet den Speicher und laedt einen eventuell vorhandenen Token
    ///
    /// Eine fehlende Datei ist kein Fehler (frische Installation);
    /// eine unlesbare Datei zaehlt als "abgemeldet".
    pub fn oeffnen(pfad: impl Into<PathBuf>) -> Self {
        let pfad = pfad.into();
        let aktuell = std::fs::read_to_string(&pfad)
            .ok()
            .and_then(|inhalt| serde_json::from_str::<Map<String, Value>>(&inhalt).ok())
            .and_then(|map| {
                map.get(SESSION_SCHLUESSEL)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        if aktuell.is_some() {
            tracing::debug!(pfad = %pfad.display(), "Gespeicherte Session geladen");
        }

        Self {
            pfad,
            aktuell: RwLock::new(aktuell),
        }
    }

    /// Gibt den aktuellen Session-Token zurueck, falls vorhanden
    pub fn token(&self) -> Option<String> {
        self.aktuell.read().clone()
    }

    /// Speichert einen neuen Session-Token dauerhaft
    pub fn speichern(&self, token: &str) -> BackendResult<()> {
        *self.aktuell.write() = Some(token.to_string());
        self.schreiben(Some(token))
    }

    /// Entfernt den Session-Token
    ///
    /// Der In-Memory-Wert ist danach in jedem Fall leer, auch wenn das
    /// Schreiben der Datei fehlschlaegt; das Geraet gilt als abgemeldet.
    pub fn loeschen(&self) -> BackendResult<()> {
        *self.aktuell.write() = None;
        self.schreiben(None)
    }

    fn schreiben(&self, token: Option<&str>) -> BackendResult<()> {
        if let Some(eltern) = self.pfad.parent() {
            std::fs::create_dir_all(eltern)?;
        }

        let mut map = Map::new();
        if let Some(token) = token {
            map.insert(SESSION_SCHLUESSEL.to_string(), Value::String(token.into()));
        }
        std::fs::write(&self.pfad, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pfad() -> PathBuf {
        std::env::temp_dir().join(format!("frachtportal_speicher_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn speichern_und_neu_laden() {
        let pfad = temp_pfad();

        let speicher = SessionSpeicher::oeffnen(&pfad);
        assert!(speicher.token().is_none(), "Frische Installation ist abgemeldet");

        speicher.speichern("token_abc").expect("Speichern fehlgeschlagen");
        assert_eq!(speicher.token().as_deref(), Some("token_abc"));

        // Neu geoeffnet: der Token ueberlebt den Neustart
        let neu = SessionSpeicher::oeffnen(&pfad);
        assert_eq!(neu.token().as_deref(), Some("token_abc"));

        let _ = std::fs::remove_file(&pfad);
    }

    #[test]
    fn loeschen_bedeutet_abgemeldet() {
        let pfad = temp_pfad();

        let speicher = SessionSpeicher::oeffnen(&pfad);
        speicher.speichern("token_xyz").unwrap();
        speicher.loeschen().expect("Loeschen fehlgeschlagen");
        assert!(speicher.token().is_none());

        let neu = SessionSpeicher::oeffnen(&pfad);
        assert!(neu.token().is_none());

        let _ = std::fs::remove_file(&pfad);
    }

    #[test]
    fn kaputte_datei_zaehlt_als_abgemeldet() {
        let pfad = temp_pfad();
        std::fs::write(&pfad, "kein json {{{").unwrap();

        let speicher = SessionSpeicher::oeffnen(&pfad);
        assert!(speicher.token().is_none());

        let _ = std::fs::remove_file(&pfad);
    }
}
