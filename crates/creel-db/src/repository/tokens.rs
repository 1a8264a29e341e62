//! Refresh token record operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::RefreshToken;

use super::Database;

impl Database {
    /// Insert a new refresh token record for a user
    pub async fn insert_refresh_token(&self, user_id: &str) -> Result<RefreshToken, DbError> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, valid, created_at, updated_at)
            VALUES (?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(RefreshToken {
            id,
            user_id: user_id.to_string(),
            valid: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a refresh token record by ID
    pub async fn get_refresh_token(&self, id: &str) -> Result<Option<RefreshToken>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, user_id, valid, created_at, updated_at
            FROM refresh_tokens
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| RefreshToken::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    /// Revoke a refresh token record
    ///
    /// Idempotent: once `valid` is cleared it is never set again.
    /// Records are kept for audit; rows are never deleted here.
    pub async fn revoke_refresh_token(&self, id: &str) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET valid = 0, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_refresh_token() {
        let db = test_db().await;

        let record = db.insert_refresh_token("user-1").await.unwrap();
        assert!(record.valid);

        let loaded = db.get_refresh_token(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.user_id, "user-1");
        assert!(loaded.valid);

        assert!(db.get_refresh_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoke_is_permanent_and_idempotent() {
        let db = test_db().await;

        let record = db.insert_refresh_token("user-1").await.unwrap();

        assert!(db.revoke_refresh_token(&record.id).await.unwrap());
        let after_first = db.get_refresh_token(&record.id).await.unwrap().unwrap();
        assert!(!after_first.valid);

        // Revoking again observes the same end state
        assert!(db.revoke_refresh_token(&record.id).await.unwrap());
        let after_second = db.get_refresh_token(&record.id).await.unwrap().unwrap();
        assert!(!after_second.valid);
    }
}
