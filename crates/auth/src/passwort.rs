//! Passwort-Hashing mit PBKDF2-HMAC-SHA256
//!
//! Das gespeicherte Format ist ein einzelner Base64-String aus
//! Salt (16 Bytes) gefolgt vom abgeleiteten Schluessel (32 Bytes).
//! Iterationszahl und Laengen sind feste Konstanten dieses Moduls;
//! Aufrufer liefern keine Parameter.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AuthError;

/// Feste Iterationszahl fuer die Schluesselableitung
const PBKDF2_ITERATIONEN: u32 = 100_000;

/// Salt-Laenge in Bytes
const SALT_LAENGE: usize = 16;

/// Laenge des abgeleiteten Schluessels in Bytes
const SCHLUESSEL_LAENGE: usize = 32;

/// Hasht ein Passwort mit frischem Zufalls-Salt
///
/// Ein Fehler der Zufallsquelle ist fatal und wird als Fehler gemeldet;
/// es entsteht nie ein Hash mit schwachem Salt.
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_LAENGE];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| AuthError::PasswortHashing(format!("Zufallsquelle: {e}")))?;

    let mut schluessel = [0u8; SCHLUESSEL_LAENGE];
    pbkdf2_hmac::<Sha256>(passwort.as_bytes(), &salt, PBKDF2_ITERATIONEN, &mut schluessel);

    let mut roh = [0u8; SALT_LAENGE + SCHLUESSEL_LAENGE];
    roh[..SALT_LAENGE].copy_from_slice(&salt);
    roh[SALT_LAENGE..].copy_from_slice(&schluessel);

    Ok(base64::Engine::encode(
        &base64::engine::general_purpose::STANDARD,
        roh,
    ))
}

/// Verifiziert ein Passwort gegen einen gespeicherten Hash
///
/// Der Vergleich der abgeleiteten Schluessel laeuft in konstanter Zeit
/// ueber die gesamte Puffer-Laenge. Fehlformatierte Hashes (kein Base64,
/// falsche Laenge) zaehlen als "Passwort falsch" und sind von einem
/// echten Fehltreffer nicht unterscheidbar.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> bool {
    let roh = match base64::Engine::decode(&base64::engine::general_purpose::STANDARD, hash) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    if roh.len() != SALT_LAENGE + SCHLUESSEL_LAENGE {
        return false;
    }

    let (salt, erwartet) = roh.split_at(SALT_LAENGE);

    let mut abgeleitet = [0u8; SCHLUESSEL_LAENGE];
    pbkdf2_hmac::<Sha256>(passwort.as_bytes(), salt, PBKDF2_ITERATIONEN, &mut abgeleitet);

    bool::from(abgeleitet.ct_eq(erwartet))
}

/// Konstantzeit-Vergleich zweier Klartexte
///
/// Wird fuer den Legacy-Sentinel-Abgleich genutzt. Unterschiedliche
/// Laengen ergeben false, ohne den Inhalt zu beruehren.
pub fn konstantzeit_gleich(a: &str, b: &str) -> bool {
    bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
