//! Auth-Service fuer das Frachtportal
//!
//! Zentraler Einstiegspunkt fuer Anmeldung, Abmeldung, Passwortwechsel
//! und Session-Validierung. Die Oberflaeche erhaelt den Service als
//! injizierte Abhaengigkeit; saemtliche Fehler werden hier in die
//! geschlossene Fehlertaxonomie aus [`crate::error`] ueberfuehrt.
//!
//! Die Schluesselableitung ist absichtlich teuer und laeuft deshalb
//! immer auf dem Blocking-Pool, nie auf dem Reaktor.

use std::sync::Arc;

use uuid::Uuid;

use frachtportal_db::{
    AdminRecord, AdminRepository, AdminRolle, AdminUpdate, NeuerAdmin, SessionRecord,
    SessionRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    passwort::{konstantzeit_gleich, passwort_hashen, passwort_verifizieren},
    session::SessionManager,
};

/// Klartext-Sentinel aus dem Altbestand
///
/// Erstinstallationen haben das Setup-Passwort unverschluesselt in der
/// Spalte `password_hash` hinterlassen. Beim ersten erfolgreichen Login
/// mit diesem Wert wird der Datensatz auf einen echten Hash migriert.
pub const LEGACY_KLARTEXT_SENTINEL: &str = "admin123";

/// Mindestlaenge fuer neue Passwoerter
const MIN_PASSWORT_LAENGE: usize = 8;

/// Auth-Service – orchestriert Zugangsdaten-Store, Hasher und Sessions
pub struct AuthService<A: AdminRepository, S: SessionRepository> {
    admin_repo: Arc<A>,
    sessions: Arc<SessionManager<S>>,
}

impl<A, S> AuthService<A, S>
where
    A: AdminRepository + 'static,
    S: SessionRepository + 'static,
{
    /// Erstellt einen neuen AuthService
    pub fn neu(admin_repo: Arc<A>, sessions: Arc<SessionManager<S>>) -> Self {
        Self {
            admin_repo,
            sessions,
        }
    }

    /// Meldet einen Admin an und erstellt eine neue Session
    ///
    /// Unbekannter Benutzername und falsches Passwort ergeben denselben
    /// Fehler, damit sich Benutzernamen nicht durchprobieren lassen.
    /// Ohne persistierte Session gibt es keinen erfolgreichen Login.
    pub async fn anmelden(
        &self,
        username: &str,
        passwort: &str,
    ) -> AuthResult<(AdminRecord, SessionRecord)> {
        if username.trim().is_empty() || passwort.is_empty() {
            return Err(AuthError::EingabeUngueltig(
                "Benutzername und Passwort duerfen nicht leer sein".into(),
            ));
        }

        let admin = self
            .admin_repo
            .get_by_name(username)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        if admin.password_hash == LEGACY_KLARTEXT_SENTINEL {
            // Noch nicht migrierter Altbestand: Klartext-Abgleich in
            // konstanter Zeit, danach einmalige Hash-Migration im
            // Hintergrund. Schlaegt die Migration fehl, versucht es der
            // naechste erfolgreiche Login erneut.
            if !konstantzeit_gleich(passwort, LEGACY_KLARTEXT_SENTINEL) {
                tracing::warn!(username = %username, "Fehlgeschlagener Login-Versuch");
                return Err(AuthError::UngueltigeAnmeldedaten);
            }
            self.hash_migration_anstossen(admin.id, passwort.to_string());
        } else {
            let korrekt =
                verifizieren_async(passwort.to_string(), admin.password_hash.clone()).await?;
            if !korrekt {
                tracing::warn!(username = %username, "Fehlgeschlagener Login-Versuch");
                return Err(AuthError::UngueltigeAnmeldedaten);
            }
        }

        let session = self.sessions.erstellen(admin.id).await?;

        tracing::info!(
            admin_id = %admin.id,
            username = %admin.username,
            "Admin angemeldet"
        );

        Ok((admin, session))
    }

    /// Meldet einen Admin ab
    ///
    /// Invalidiert alle Sessions des Admins, nicht nur die des
    /// aktuellen Geraets. Best-effort: ein Store-Fehler wird geloggt,
    /// der Aufrufer leert seinen lokalen Token-Speicher in jedem Fall.
    pub async fn abmelden(&self, admin_id: Uuid) {
        match self.sessions.alle_invalidieren(admin_id).await {
            Ok(anzahl) => {
                tracing::debug!(admin_id = %admin_id, anzahl = anzahl, "Admin abgemeldet");
            }
            Err(e) => {
                tracing::warn!(admin_id = %admin_id, fehler = %e, "Serverseitige Abmeldung fehlgeschlagen");
            }
        }
    }

    /// Validiert einen Session-Token und gibt den zugehoerigen Admin zurueck
    ///
    /// Einstiegspunkt fuer den App-Start und fuer jeden Request.
    /// Verwaiste Sessions (Besitzer geloescht) gelten als ungueltig.
    pub async fn session_validieren(&self, token: &str) -> AuthResult<AdminRecord> {
        let session = self.sessions.validieren(token).await?;

        match self.admin_repo.get_by_id(session.admin_id).await? {
            Some(admin) => Ok(admin),
            None => {
                let _ = self.sessions.alle_invalidieren(session.admin_id).await;
                Err(AuthError::SessionUngueltig)
            }
        }
    }

    /// Verlaengert eine gueltige Session um die volle TTL
    pub async fn session_verlaengern(&self, token: &str) -> AuthResult<bool> {
        self.sessions.verlaengern(token).await
    }

    /// Setzt ein neues Passwort und invalidiert alle Sessions des Admins
    ///
    /// Der neue Hash wird zuerst durabel geschrieben, erst danach fallen
    /// die Sessions: ein zeitgleicher Login mit dem neuen Passwort kann
    /// so nie auf einen halb angewendeten Wechsel treffen.
    pub async fn passwort_aendern(&self, admin_id: Uuid, neues_passwort: &str) -> AuthResult<()> {
        passwort_pruefen(neues_passwort)?;

        self.admin_repo
            .get_by_id(admin_id)
            .await?
            .ok_or_else(|| AuthError::AdminNichtGefunden(admin_id.to_string()))?;

        let neuer_hash = hashen_async(neues_passwort.to_string()).await?;
        self.admin_repo
            .update(
                admin_id,
                AdminUpdate {
                    password_hash: Some(neuer_hash),
                    ..Default::default()
                },
            )
            .await?;

        let anzahl = self.sessions.alle_invalidieren(admin_id).await?;
        tracing::info!(
            admin_id = %admin_id,
            invalidierte_sessions = anzahl,
            "Passwort geaendert, Sessions invalidiert"
        );

        Ok(())
    }

    /// Legt einen neuen Admin an (Bootstrap oder Super-Admin-Aktion)
    pub async fn admin_anlegen(
        &self,
        username: &str,
        email: Option<&str>,
        passwort: &str,
        rolle: AdminRolle,
    ) -> AuthResult<AdminRecord> {
        if username.trim().is_empty() {
            return Err(AuthError::EingabeUngueltig(
                "Benutzername darf nicht leer sein".into(),
            ));
        }
        passwort_pruefen(passwort)?;

        if self.admin_repo.get_by_name(username).await?.is_some() {
            return Err(AuthError::BenutzernameVergeben(username.to_string()));
        }

        let passwort_hash = hashen_async(passwort.to_string()).await?;

        let admin = self
            .admin_repo
            .create(NeuerAdmin {
                username,
                email,
                password_hash: &passwort_hash,
                rolle,
            })
            .await?;

        tracing::info!(
            admin_id = %admin.id,
            username = %admin.username,
            rolle = admin.rolle.als_str(),
            "Neuer Admin angelegt"
        );

        Ok(admin)
    }

    /// Loescht einen Admin hart; alle Sessions fallen kaskadierend mit
    pub async fn admin_loeschen(&self, admin_id: Uuid) -> AuthResult<bool> {
        let geloescht = self.admin_repo.delete(admin_id).await?;
        if geloescht {
            tracing::info!(admin_id = %admin_id, "Admin geloescht");
        }
        Ok(geloescht)
    }

    /// Aendert die Rolle eines Admins
    pub async fn rolle_aendern(&self, admin_id: Uuid, rolle: AdminRolle) -> AuthResult<AdminRecord> {
        let admin = self
            .admin_repo
            .update(
                admin_id,
                AdminUpdate {
                    rolle: Some(rolle),
                    ..Default::default()
                },
            )
            .await?;
        tracing::info!(admin_id = %admin_id, rolle = rolle.als_str(), "Rolle geaendert");
        Ok(admin)
    }

    /// Stoesst die einmalige Hash-Migration im Hintergrund an
    ///
    /// Das Login-Ergebnis haengt nicht an diesem Task; ein Fehlschlag
    /// wird nur geloggt.
    fn hash_migration_anstossen(&self, admin_id: Uuid, passwort: String) {
        let repo = Arc::clone(&self.admin_repo);
        tokio::spawn(async move {
            let hash = match tokio::task::spawn_blocking(move || passwort_hashen(&passwort)).await
            {
                Ok(Ok(hash)) => hash,
                Ok(Err(e)) => {
                    tracing::warn!(admin_id = %admin_id, fehler = %e, "Hash-Migration: Hashing fehlgeschlagen");
                    return;
                }
                Err(e) => {
                    tracing::warn!(admin_id = %admin_id, fehler = %e, "Hash-Migration: Task abgebrochen");
                    return;
                }
            };

            match repo
                .update(
                    admin_id,
                    AdminUpdate {
                        password_hash: Some(hash),
                        ..Default::default()
                    },
                )
                .await
            {
                Ok(_) => {
                    tracing::info!(admin_id = %admin_id, "Legacy-Passwort auf Hash migriert");
                }
                Err(e) => {
                    tracing::warn!(
                        admin_id = %admin_id,
                        fehler = %e,
                        "Hash-Migration nicht persistiert, naechster Login versucht es erneut"
                    );
                }
            }
        });
    }
}

/// Prueft die Mindestanforderungen an ein neues Passwort
fn passwort_pruefen(passwort: &str) -> AuthResult<()> {
    if passwort.chars().count() < MIN_PASSWORT_LAENGE {
        return Err(AuthError::EingabeUngueltig(format!(
            "Passwort muss mindestens {MIN_PASSWORT_LAENGE} Zeichen lang sein"
        )));
    }
    Ok(())
}

/// Verifiziert ein Passwort auf dem Blocking-Pool
async fn verifizieren_async(passwort: String, hash: String) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || passwort_verifizieren(&passwort, &hash))
        .await
        .map_err(|e| AuthError::intern(format!("Blocking-Task: {e}")))
}

/// Hasht ein Passwort auf dem Blocking-Pool
async fn hashen_async(passwort: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .map_err(|e| AuthError::intern(format!("Blocking-Task: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use frachtportal_db::{DbError, DbResult, NeueSession};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };
    use std::time::Duration as StdDuration;

    // Minimaler In-Memory AdminRepository fuer Tests
    #[derive(Default)]
    struct TestAdminRepo {
        admins: Mutex<Vec<AdminRecord>>,
    }

    impl TestAdminRepo {
        fn hash_von(&self, id: Uuid) -> Option<String> {
            self.admins
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.password_hash.clone())
        }
    }

    #[async_trait]
    impl AdminRepository for TestAdminRepo {
        async fn create(&self, data: NeuerAdmin<'_>) -> DbResult<AdminRecord> {
            let mut admins = self.admins.lock().unwrap();
            if admins.iter().any(|a| a.username == data.username) {
                return Err(DbError::Eindeutigkeit(data.username.to_string()));
            }
            let record = AdminRecord {
                id: Uuid::new_v4(),
                username: data.username.to_string(),
                email: data.email.map(str::to_string),
                password_hash: data.password_hash.to_string(),
                rolle: data.rolle,
                created_at: Utc::now(),
            };
            admins.push(record.clone());
            Ok(record)
        }

        async fn get_by_id(&self, id: Uuid) -> DbResult<Option<AdminRecord>> {
            Ok(self.admins.lock().unwrap().iter().find(|a| a.id == id).cloned())
        }

        async fn get_by_name(&self, username: &str) -> DbResult<Option<AdminRecord>> {
            Ok(self
                .admins
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.username == username)
                .cloned())
        }

        async fn update(&self, id: Uuid, data: AdminUpdate) -> DbResult<AdminRecord> {
            let mut admins = self.admins.lock().unwrap();
            let admin = admins
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| DbError::nicht_gefunden(id.to_string()))?;
            if let Some(email) = data.email {
                admin.email = email;
            }
            if let Some(hash) = data.password_hash {
                admin.password_hash = hash;
            }
            if let Some(rolle) = data.rolle {
                admin.rolle = rolle;
            }
            Ok(admin.clone())
        }

        async fn delete(&self, id: Uuid) -> DbResult<bool> {
            let mut admins = self.admins.lock().unwrap();
            let vorher = admins.len();
            admins.retain(|a| a.id != id);
            Ok(admins.len() < vorher)
        }

        async fn list(&self) -> DbResult<Vec<AdminRecord>> {
            Ok(self.admins.lock().unwrap().clone())
        }
    }

    // Minimaler In-Memory SessionRepository, mit schaltbarem Insert-Fehler
    #[derive(Default)]
    struct TestSessionRepo {
        sessions: Mutex<Vec<SessionRecord>>,
        insert_schlaegt_fehl: AtomicBool,
    }

    #[async_trait]
    impl SessionRepository for TestSessionRepo {
        async fn insert(&self, data: NeueSession<'_>) -> DbResult<SessionRecord> {
            if self.insert_schlaegt_fehl.load(Ordering::SeqCst) {
                return Err(DbError::intern("Store nicht erreichbar"));
            }
            let record = SessionRecord {
                id: data.id.to_string(),
                admin_id: data.admin_id,
                created_at: data.created_at,
                expires_at: data.expires_at,
            };
            self.sessions.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn get(&self, id: &str) -> DbResult<Option<SessionRecord>> {
            Ok(self.sessions.lock().unwrap().iter().find(|s| s.id == id).cloned())
        }

        async fn update_expiry(&self, id: &str, expires_at: DateTime<Utc>) -> DbResult<bool> {
            let mut sessions = self.sessions.lock().unwrap();
            match sessions.iter_mut().find(|s| s.id == id) {
                Some(s) => {
                    s.expires_at = expires_at;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: &str) -> DbResult<bool> {
            let mut sessions = self.sessions.lock().unwrap();
            let vorher = sessions.len();
            sessions.retain(|s| s.id != id);
            Ok(sessions.len() < vorher)
        }

        async fn delete_for_admin(&self, admin_id: Uuid) -> DbResult<u64> {
            let mut sessions = self.sessions.lock().unwrap();
            let vorher = sessions.len();
            sessions.retain(|s| s.admin_id != admin_id);
            Ok((vorher - sessions.len()) as u64)
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
            let mut sessions = self.sessions.lock().unwrap();
            let vorher = sessions.len();
            sessions.retain(|s| s.expires_at >= now);
            Ok((vorher - sessions.len()) as u64)
        }
    }

    struct TestUmgebung {
        admin_repo: Arc<TestAdminRepo>,
        session_repo: Arc<TestSessionRepo>,
        service: AuthService<TestAdminRepo, TestSessionRepo>,
    }

    fn umgebung() -> TestUmgebung {
        let admin_repo = Arc::new(TestAdminRepo::default());
        let session_repo = Arc::new(TestSessionRepo::default());
        let sessions = Arc::new(SessionManager::neu(Arc::clone(&session_repo)));
        let service = AuthService::neu(Arc::clone(&admin_repo), sessions);
        TestUmgebung {
            admin_repo,
            session_repo,
            service,
        }
    }

    #[tokio::test]
    async fn anmelden_und_session_validieren() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .expect("Anlegen fehlgeschlagen");

        let (angemeldet, session) = u
            .service
            .anmelden("disponent", "sicheres_passwort!")
            .await
            .expect("Anmeldung fehlgeschlagen");

        assert_eq!(angemeldet.id, admin.id);
        assert!(!session.id.is_empty());

        let validiert = u.service.session_validieren(&session.id).await.unwrap();
        assert_eq!(validiert.id, admin.id);
    }

    #[tokio::test]
    async fn unbekannter_benutzer_und_falsches_passwort_gleicher_fehler() {
        let u = umgebung();
        u.service
            .admin_anlegen("bob", None, "bobs_passwort", AdminRolle::Admin)
            .await
            .unwrap();

        // "alice" existiert nicht, "bob" hat ein anderes Passwort – der
        // Fehler muss identisch ausfallen
        let unbekannt = u.service.anmelden("alice", "x").await.unwrap_err();
        let falsch = u.service.anmelden("bob", "falsches_pw").await.unwrap_err();

        assert!(matches!(unbekannt, AuthError::UngueltigeAnmeldedaten));
        assert!(matches!(falsch, AuthError::UngueltigeAnmeldedaten));
        assert_eq!(unbekannt.benutzer_meldung(), falsch.benutzer_meldung());
    }

    #[tokio::test]
    async fn leere_eingaben_ohne_store_zugriff_abgelehnt() {
        let u = umgebung();
        let ergebnis = u.service.anmelden("", "").await;
        assert!(matches!(ergebnis, Err(AuthError::EingabeUngueltig(_))));

        let ergebnis = u.service.anmelden("disponent", "").await;
        assert!(matches!(ergebnis, Err(AuthError::EingabeUngueltig(_))));
    }

    #[tokio::test]
    async fn legacy_sentinel_login_und_migration() {
        let u = umgebung();
        // Altbestand: Klartext-Sentinel statt Hash in der Datenbank
        let admin = u
            .admin_repo
            .create(NeuerAdmin {
                username: "altadmin",
                email: None,
                password_hash: LEGACY_KLARTEXT_SENTINEL,
                rolle: AdminRolle::SuperAdmin,
            })
            .await
            .unwrap();

        // Falsches Passwort gegen den Sentinel: generischer Fehler
        let ergebnis = u.service.anmelden("altadmin", "falsch").await;
        assert!(matches!(ergebnis, Err(AuthError::UngueltigeAnmeldedaten)));

        // Login mit dem Sentinel gelingt sofort
        let (_, session) = u
            .service
            .anmelden("altadmin", LEGACY_KLARTEXT_SENTINEL)
            .await
            .expect("Sentinel-Login fehlgeschlagen");
        assert!(!session.id.is_empty());

        // Die Migration laeuft im Hintergrund; auf den neuen Hash warten
        let mut neuer_hash = None;
        for _ in 0..200 {
            let hash = u.admin_repo.hash_von(admin.id).unwrap();
            if hash != LEGACY_KLARTEXT_SENTINEL {
                neuer_hash = Some(hash);
                break;
            }
            tokio::time::sleep(StdDuration::from_millis(20)).await;
        }
        let neuer_hash = neuer_hash.expect("Hash-Migration ist nicht gelaufen");

        // Der Sentinel verifiziert weiterhin gegen den migrierten Hash
        assert!(passwort_verifizieren(LEGACY_KLARTEXT_SENTINEL, &neuer_hash));

        // Folge-Login nimmt den normalen Hash-Pfad
        u.service
            .anmelden("altadmin", LEGACY_KLARTEXT_SENTINEL)
            .await
            .expect("Folge-Login fehlgeschlagen");
    }

    #[tokio::test]
    async fn login_ohne_session_schlaegt_fehl() {
        let u = umgebung();
        u.service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .unwrap();

        // Store nimmt keine Sessions mehr an: der Login muss scheitern,
        // Zugriff ohne Session-Zeile gibt es nicht
        u.session_repo.insert_schlaegt_fehl.store(true, Ordering::SeqCst);

        let ergebnis = u.service.anmelden("disponent", "sicheres_passwort!").await;
        assert!(ergebnis.is_err());
        assert!(u.session_repo.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn passwort_aendern_invalidiert_alle_sessions() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "altes_passwort", AdminRolle::Admin)
            .await
            .unwrap();

        // Zwei Geraete
        let (_, s1) = u.service.anmelden("disponent", "altes_passwort").await.unwrap();
        let (_, s2) = u.service.anmelden("disponent", "altes_passwort").await.unwrap();

        u.service
            .passwort_aendern(admin.id, "neues_passwort")
            .await
            .expect("Passwortwechsel fehlgeschlagen");

        // Alle vorher ausgegebenen Sessions sind ungueltig
        assert!(u.service.session_validieren(&s1.id).await.is_err());
        assert!(u.service.session_validieren(&s2.id).await.is_err());

        // Altes Passwort gilt nicht mehr, neues schon
        assert!(u.service.anmelden("disponent", "altes_passwort").await.is_err());
        u.service.anmelden("disponent", "neues_passwort").await.unwrap();
    }

    #[tokio::test]
    async fn passwort_aendern_zu_kurz() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "altes_passwort", AdminRolle::Admin)
            .await
            .unwrap();

        let ergebnis = u.service.passwort_aendern(admin.id, "kurz").await;
        match ergebnis {
            Err(AuthError::EingabeUngueltig(grund)) => {
                assert!(grund.contains("mindestens"));
            }
            andere => panic!("Erwartet EingabeUngueltig, bekommen: {andere:?}"),
        }
    }

    #[tokio::test]
    async fn abmelden_invalidiert_alle_geraete() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .unwrap();

        let (_, s1) = u.service.anmelden("disponent", "sicheres_passwort!").await.unwrap();
        let (_, s2) = u.service.anmelden("disponent", "sicheres_passwort!").await.unwrap();

        u.service.abmelden(admin.id).await;

        assert!(u.service.session_validieren(&s1.id).await.is_err());
        assert!(u.service.session_validieren(&s2.id).await.is_err());
    }

    #[tokio::test]
    async fn doppelter_benutzername_abgelehnt() {
        let u = umgebung();
        u.service
            .admin_anlegen("duplikat", None, "passwort_eins", AdminRolle::Admin)
            .await
            .unwrap();

        let ergebnis = u
            .service
            .admin_anlegen("duplikat", None, "passwort_zwei", AdminRolle::Admin)
            .await;
        assert!(matches!(ergebnis, Err(AuthError::BenutzernameVergeben(_))));
    }

    #[tokio::test]
    async fn verwaiste_session_ist_ungueltig() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .unwrap();
        let (_, session) = u.service.anmelden("disponent", "sicheres_passwort!").await.unwrap();

        // Admin hart loeschen, Session-Zeile im Stub bleibt stehen
        u.admin_repo.delete(admin.id).await.unwrap();

        let ergebnis = u.service.session_validieren(&session.id).await;
        assert!(matches!(ergebnis, Err(AuthError::SessionUngueltig)));
        // Die verwaiste Zeile wurde dabei aufgeraeumt
        assert!(u.session_repo.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn abgelaufene_session_verhaelt_sich_wie_abwesend() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .unwrap();
        let (_, session) = u.service.anmelden("disponent", "sicheres_passwort!").await.unwrap();

        // Ablauf in die Vergangenheit schieben
        u.session_repo
            .update_expiry(&session.id, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        let ergebnis = u.service.session_validieren(&session.id).await.unwrap_err();
        assert!(ergebnis.ist_sitzungsfehler());
        // Verlaengern einer abgelaufenen Session tut nichts
        assert!(!u.service.session_verlaengern(&session.id).await.unwrap());
    }

    #[tokio::test]
    async fn rolle_aendern_und_loeschen() {
        let u = umgebung();
        let admin = u
            .service
            .admin_anlegen("disponent", None, "sicheres_passwort!", AdminRolle::Admin)
            .await
            .unwrap();

        let befoerdert = u
            .service
            .rolle_aendern(admin.id, AdminRolle::SuperAdmin)
            .await
            .unwrap();
        assert_eq!(befoerdert.rolle, AdminRolle::SuperAdmin);

        assert!(u.service.admin_loeschen(admin.id).await.unwrap());
        assert!(u.service.anmelden("disponent", "sicheres_passwort!").await.is_err());
    }
}
