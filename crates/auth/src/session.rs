//! Session-Verwaltung fuer das Admin-Subsystem
//!
//! Kurzlebige Session-Tokens, persistiert im Zeilen-Store. Eine Session
//! ist genau dann gueltig, wenn ihre Zeile existiert und die Ablaufzeit
//! noch nicht erreicht ist; abgelaufene Zeilen werden beim naechsten
//! Kontakt entfernt (lazy reap). Dem Store darf nie unterstellt werden,
//! nur lebende Zeilen zu enthalten.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use rand::RngCore;
use uuid::Uuid;

use frachtportal_db::{NeueSession, SessionRecord, SessionRepository};

use crate::error::{AuthError, AuthResult};

/// Session-Lebensdauer: 10 Minuten
pub const SESSION_TTL_SEKUNDEN: i64 = 10 * 60;

/// Intervall fuer den automatischen Bereinigungs-Task
const BEREINIGUNG_INTERVALL: Duration = Duration::from_secs(60);

/// Verwaltet Sessions auf einem SessionRepository
pub struct SessionManager<S: SessionRepository> {
    repo: Arc<S>,
}

impl<S: SessionRepository> SessionManager<S> {
    /// Erstellt einen neuen SessionManager
    pub fn neu(repo: Arc<S>) -> Self {
        Self { repo }
    }

    /// Startet den periodischen Bereinigungs-Task
    ///
    /// Der Sweep ist idempotent und laeuft gefahrlos parallel zu
    /// Validierung und Erstellung.
    pub fn mit_bereinigung(manager: Arc<Self>) -> Arc<Self>
    where
        S: 'static,
    {
        let klon = Arc::clone(&manager);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(BEREINIGUNG_INTERVALL).await;
                match klon.abgelaufene_bereinigen().await {
                    Ok(entfernt) if entfernt > 0 => {
                        tracing::debug!(anzahl = entfernt, "Abgelaufene Sessions bereinigt");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(fehler = %e, "Session-Bereinigung fehlgeschlagen");
                    }
                }
            }
        });
        manager
    }

    /// Erstellt eine neue Session fuer den angegebenen Admin
    ///
    /// Mehrere gleichzeitige Sessions pro Admin (mehrere Geraete) sind
    /// erlaubt und ergeben unabhaengige Zeilen.
    pub async fn erstellen(&self, admin_id: Uuid) -> AuthResult<SessionRecord> {
        let token = token_generieren()?;
        let jetzt = Utc::now();

        let session = self
            .repo
            .insert(NeueSession {
                id: &token,
                admin_id,
                created_at: jetzt,
                expires_at: jetzt + chrono::Duration::seconds(SESSION_TTL_SEKUNDEN),
            })
            .await?;

        tracing::debug!(admin_id = %admin_id, "Neue Session erstellt");
        Ok(session)
    }

    /// Validiert einen Session-Token
    ///
    /// Fehlende Zeile: `SessionUngueltig`. Abgelaufene Zeile wird
    /// geloescht, danach `SessionAbgelaufen`. Idempotent und fuer jeden
    /// Request geeignet.
    pub async fn validieren(&self, token: &str) -> AuthResult<SessionRecord> {
        match self.repo.get(token).await? {
            None => Err(AuthError::SessionUngueltig),
            Some(session) if Utc::now() > session.expires_at => {
                // Lazy reap; ein paralleler Sweep kann die Zeile schon
                // entfernt haben, das Ergebnis bleibt gleich
                let _ = self.repo.delete(token).await;
                tracing::debug!(admin_id = %session.admin_id, "Abgelaufene Session entfernt");
                Err(AuthError::SessionAbgelaufen)
            }
            Some(session) => Ok(session),
        }
    }

    /// Verlaengert eine gueltige Session um die volle TTL ab jetzt
    ///
    /// Gibt false zurueck wenn die Session bereits ungueltig war; dann
    /// passiert nichts.
    pub async fn verlaengern(&self, token: &str) -> AuthResult<bool> {
        match self.validieren(token).await {
            Ok(_) => {
                let neues_ende = Utc::now() + chrono::Duration::seconds(SESSION_TTL_SEKUNDEN);
                Ok(self.repo.update_expiry(token, neues_ende).await?)
            }
            Err(e) if e.ist_sitzungsfehler() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Invalidiert alle Sessions eines Admins
    ///
    /// Wird beim Abmelden genutzt und zwingend bei Passwortaenderung,
    /// damit ein Angreifer mit alter Session nicht weiterarbeiten kann.
    pub async fn alle_invalidieren(&self, admin_id: Uuid) -> AuthResult<u64> {
        let entfernt = self.repo.delete_for_admin(admin_id).await?;
        if entfernt > 0 {
            tracing::debug!(admin_id = %admin_id, anzahl = entfernt, "Alle Admin-Sessions invalidiert");
        }
        Ok(entfernt)
    }

    /// Entfernt alle abgelaufenen Sessions, unabhaengig vom Besitzer
    pub async fn abgelaufene_bereinigen(&self) -> AuthResult<u64> {
        Ok(self.repo.delete_expired(Utc::now()).await?)
    }
}

/// Generiert einen kryptografisch starken Session-Token (URL-sicheres Base64)
fn token_generieren() -> AuthResult<String> {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::intern(format!("Zufallsquelle: {e}")))?;
    Ok(base64::Engine::encode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        bytes,
    ))
}
