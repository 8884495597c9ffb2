use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Activity;

pub struct ActivityRepository {
    pool: SqlitePool,
}

// Row type for database queries
#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: String,
    title: String,
    date: String,
    description: String,
    category: String,
    city: String,
    venue: String,
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity, sqlx::Error> {
        let id = Uuid::parse_str(&self.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let date = DateTime::parse_from_rfc3339(&self.date)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Activity {
            id,
            title: self.title,
            date,
            description: self.description,
            category: self.category,
            city: self.city,
            venue: self.venue,
        })
    }
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, activity: &Activity) -> Result<Activity, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, title, date, description, category, city, venue)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(activity.id.to_string())
        .bind(&activity.title)
        .bind(activity.date.to_rfc3339())
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.city)
        .bind(&activity.venue)
        .execute(&self.pool)
        .await?;

        // Return the created activity
        self.get_by_id(activity.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Activity>, sqlx::Error> {
        let row: Option<ActivityRow> = sqlx::query_as("SELECT * FROM activities WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => row.into_activity().map(Some),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, sqlx::Error> {
        let rows: Vec<ActivityRow> = sqlx::query_as("SELECT * FROM activities ORDER BY date")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ActivityRow::into_activity).collect()
    }

    /// Replaces an activity wholesale. Returns `RowNotFound` if the id is unknown.
    pub async fn update(&self, activity: &Activity) -> Result<Activity, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET title = ?, date = ?, description = ?, category = ?, city = ?, venue = ?
            WHERE id = ?
            "#,
        )
        .bind(&activity.title)
        .bind(activity.date.to_rfc3339())
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.city)
        .bind(&activity.venue)
        .bind(activity.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        self.get_by_id(activity.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Deletes an activity by id. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
