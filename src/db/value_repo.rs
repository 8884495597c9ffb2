use sqlx::SqlitePool;

use crate::models::Value;

pub struct ValueRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ValueRow {
    id: i64,
    name: String,
}

impl ValueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Value>, sqlx::Error> {
        let rows: Vec<ValueRow> = sqlx::query_as("SELECT id, name FROM \"values\" ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Value {
                id: row.id,
                name: row.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_seeded_values() {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(temp_dir.path().join("test.db")).await.unwrap();
        let repo = ValueRepository::new(pool);

        let values = repo.list().await.unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].name, "Value 101");
        assert_eq!(values[2].name, "Value 103");
    }
}
