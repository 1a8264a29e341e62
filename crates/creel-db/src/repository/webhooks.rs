//! Webhook subscription operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewWebhook, Webhook};

use super::Database;

impl Database {
    /// Insert a new webhook subscription
    pub async fn insert_webhook(&self, webhook: NewWebhook) -> Result<Webhook, DbError> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO webhooks (id, user_id, url, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&webhook.user_id)
        .bind(&webhook.url)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Webhook {
            id,
            user_id: webhook.user_id,
            url: webhook.url,
            created_at: now,
        })
    }

    /// List every webhook subscription
    ///
    /// Consulted read-only when a report is created to determine
    /// notification fan-out.
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, url, created_at
            FROM webhooks
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Webhook::try_from(row).map_err(DbError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list_webhooks() {
        let db = Database::new("sqlite::memory:").await.unwrap();

        db.insert_webhook(NewWebhook {
            user_id: "user-1".to_string(),
            url: "https://example.com/hook".to_string(),
        })
        .await
        .unwrap();
        db.insert_webhook(NewWebhook {
            user_id: "user-2".to_string(),
            url: "https://example.org/hook".to_string(),
        })
        .await
        .unwrap();

        let hooks = db.list_webhooks().await.unwrap();
        assert_eq!(hooks.len(), 2);
    }
}
