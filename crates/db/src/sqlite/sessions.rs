//! SQLite-Implementierung des SessionRepository
//!
//! Zeitstempel werden als RFC-3339-Text gespeichert. Alle Operationen
//! sind einzelne Statements und damit atomar; das genuegt fuer die
//! Last-Write-Wins-Semantik der Session-Verwaltung.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NeueSession, SessionRecord};
use crate::repository::SessionRepository;
use crate::sqlite::pool::SqliteDb;
use crate::DbResult;

#[async_trait]
impl SessionRepository for SqliteDb {
    async fn insert(&self, data: NeueSession<'_>) -> DbResult<SessionRecord> {
        sqlx::query(
            "INSERT INTO sessions (id, admin_id, created_at, expires_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(data.id)
        .bind(data.admin_id.to_string())
        .bind(data.created_at.to_rfc3339())
        .bind(data.expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(SessionRecord {
            id: data.id.to_string(),
            admin_id: data.admin_id,
            created_at: data.created_at,
            expires_at: data.expires_at,
        })
    }

    async fn get(&self, id: &str) -> DbResult<Option<SessionRecord>> {
        let row = sqlx::query(
            "SELECT id, admin_id, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    async fn update_expiry(&self, id: &str, expires_at: DateTime<Utc>) -> DbResult<bool> {
        let affected = sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
            .bind(expires_at.to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn delete(&self, id: &str) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn delete_for_admin(&self, admin_id: Uuid) -> DbResult<u64> {
        let affected = sqlx::query("DELETE FROM sessions WHERE admin_id = ?")
            .bind(admin_id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
        let affected = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected)
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> DbResult<SessionRecord> {
    use sqlx::Row as _;

    let admin_id_str: String = row.try_get("admin_id")?;
    let admin_id = Uuid::parse_str(&admin_id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{admin_id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let expires_at_str: String = row.try_get("expires_at")?;
    let expires_at = chrono::DateTime::parse_from_rfc3339(&expires_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige expires_at '{expires_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(SessionRecord {
        id: row.try_get("id")?,
        admin_id,
        created_at,
        expires_at,
    })
}
