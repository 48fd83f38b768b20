//! SQLite-Implementierung des AdminRepository

use async_trait::async_trait;
use chrono::Utc;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{AdminRecord, AdminRolle, AdminUpdate, NeuerAdmin};
use crate::repository::AdminRepository;
use crate::sqlite::pool::SqliteDb;
use crate::DbResult;

#[async_trait]
impl AdminRepository for SqliteDb {
    async fn create(&self, data: NeuerAdmin<'_>) -> DbResult<AdminRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO admins (id, username, email, password_hash, rolle, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.rolle.als_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!(
                    "Benutzername '{}' bereits vergeben",
                    data.username
                ))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(AdminRecord {
            id,
            username: data.username.to_string(),
            email: data.email.map(str::to_string),
            password_hash: data.password_hash.to_string(),
            rolle: data.rolle,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<AdminRecord>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, rolle, created_at
             FROM admins WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_admin(&r)).transpose()
    }

    async fn get_by_name(&self, username: &str) -> DbResult<Option<AdminRecord>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, rolle, created_at
             FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_admin(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: AdminUpdate) -> DbResult<AdminRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.email.is_some() {
            sets.push("email = ?");
        }
        if data.password_hash.is_some() {
            sets.push("password_hash = ?");
        }
        if data.rolle.is_some() {
            sets.push("rolle = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Admin {id}")));
        }

        let sql = format!("UPDATE admins SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.email {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = data.password_hash {
            q = q.bind(v);
        }
        if let Some(v) = data.rolle {
            q = q.bind(v.als_str());
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Admin {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Admin nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        // Harte Loeschung; Sessions fallen per ON DELETE CASCADE mit
        let affected = sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn list(&self) -> DbResult<Vec<AdminRecord>> {
        let rows = sqlx::query(
            "SELECT id, username, email, password_hash, rolle, created_at
             FROM admins ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_admin).collect()
    }
}

fn row_to_admin(row: &sqlx::sqlite::SqliteRow) -> DbResult<AdminRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let rolle_str: String = row.try_get("rolle")?;
    let rolle = AdminRolle::from_str(&rolle_str).map_err(DbError::intern)?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(AdminRecord {
        id,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        rolle,
        created_at,
    })
}
