//! Catch report operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewReport, Report, ReportPatch};

use super::Database;

impl Database {
    /// Insert a new report
    pub async fn insert_report(&self, report: NewReport) -> Result<Report, DbError> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO reports (
                id, user_id, latitude, longitude, location_name, city,
                fish_species, weight, length, image_url, date_of_catch,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&report.user_id)
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(&report.location_name)
        .bind(&report.city)
        .bind(&report.fish_species)
        .bind(report.weight)
        .bind(report.length)
        .bind(&report.image_url)
        .bind(report.date_of_catch.to_rfc3339())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id,
            user_id: report.user_id,
            latitude: report.latitude,
            longitude: report.longitude,
            location_name: report.location_name,
            city: report.city,
            fish_species: report.fish_species,
            weight: report.weight,
            length: report.length,
            image_url: report.image_url,
            date_of_catch: report.date_of_catch,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a report by ID
    pub async fn get_report_by_id(&self, id: &str) -> Result<Option<Report>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, user_id, latitude, longitude, location_name, city,
                   fish_species, weight, length, image_url, date_of_catch,
                   created_at, updated_at
            FROM reports
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| Report::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    /// List all reports, newest first
    pub async fn list_reports(&self) -> Result<Vec<Report>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, latitude, longitude, location_name, city,
                   fish_species, weight, length, image_url, date_of_catch,
                   created_at, updated_at
            FROM reports
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Report::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Replace every domain field of a report
    ///
    /// The owner (`user_id`) is immutable and is not touched.
    pub async fn replace_report(&self, id: &str, report: &NewReport) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET latitude = ?, longitude = ?, location_name = ?, city = ?,
                fish_species = ?, weight = ?, length = ?, image_url = ?,
                date_of_catch = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(&report.location_name)
        .bind(&report.city)
        .bind(&report.fish_species)
        .bind(report.weight)
        .bind(report.length)
        .bind(&report.image_url)
        .bind(report.date_of_catch.to_rfc3339())
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial update to a report
    ///
    /// Fields left as `None` keep their stored values. Returns the
    /// updated report, or `None` if the id is unknown.
    pub async fn patch_report(
        &self,
        id: &str,
        patch: ReportPatch,
    ) -> Result<Option<Report>, DbError> {
        let Some(existing) = self.get_report_by_id(id).await? else {
            return Ok(None);
        };

        let merged = NewReport {
            user_id: existing.user_id.clone(),
            latitude: patch.latitude.unwrap_or(existing.latitude),
            longitude: patch.longitude.unwrap_or(existing.longitude),
            location_name: patch.location_name.unwrap_or(existing.location_name),
            city: patch.city.unwrap_or(existing.city),
            fish_species: patch.fish_species.unwrap_or(existing.fish_species),
            weight: patch.weight.unwrap_or(existing.weight),
            length: patch.length.unwrap_or(existing.length),
            image_url: patch.image_url.or(existing.image_url),
            date_of_catch: patch.date_of_catch.unwrap_or(existing.date_of_catch),
        };

        self.replace_report(id, &merged).await?;
        self.get_report_by_id(id).await
    }

    /// Delete a report
    pub async fn delete_report(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn test_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    fn sample_report(user_id: &str) -> NewReport {
        NewReport {
            user_id: user_id.to_string(),
            latitude: 56.878,
            longitude: 14.809,
            location_name: "Helgasjön".to_string(),
            city: "Växjö".to_string(),
            fish_species: "Pike".to_string(),
            weight: 4.2,
            length: 82.0,
            image_url: None,
            date_of_catch: Utc.with_ymd_and_hms(2024, 5, 17, 6, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_list_delete() {
        let db = test_db().await;

        let report = db.insert_report(sample_report("user-1")).await.unwrap();
        assert_eq!(report.user_id, "user-1");

        let loaded = db.get_report_by_id(&report.id).await.unwrap().unwrap();
        assert_eq!(loaded.fish_species, "Pike");

        assert_eq!(db.list_reports().await.unwrap().len(), 1);

        assert!(db.delete_report(&report.id).await.unwrap());
        assert!(db.get_report_by_id(&report.id).await.unwrap().is_none());
        assert!(!db.delete_report(&report.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_patch_merges_fields() {
        let db = test_db().await;

        let report = db.insert_report(sample_report("user-1")).await.unwrap();

        let patch = ReportPatch {
            weight: Some(5.1),
            ..Default::default()
        };
        let updated = db.patch_report(&report.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.weight, 5.1);
        // Untouched fields keep their values
        assert_eq!(updated.fish_species, "Pike");
        assert_eq!(updated.user_id, "user-1");

        assert!(
            db.patch_report("missing", ReportPatch::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_replace_keeps_owner() {
        let db = test_db().await;

        let report = db.insert_report(sample_report("user-1")).await.unwrap();

        let mut replacement = sample_report("someone-else");
        replacement.fish_species = "Perch".to_string();
        assert!(db.replace_report(&report.id, &replacement).await.unwrap());

        let loaded = db.get_report_by_id(&report.id).await.unwrap().unwrap();
        assert_eq!(loaded.fish_species, "Perch");
        assert_eq!(loaded.user_id, "user-1");
    }
}
