use crate::db::Database;
use crate::error::{AppError, AppResult};

/// Per-user favorited playlist identifiers; one row per user, whole-list
/// replacement on write.
pub struct FavoritesService<'a> {
    db: &'a Database,
}

impl<'a> FavoritesService<'a> {
    pub fn new(db: &'a Database) -> Self {
        FavoritesService { db }
    }

    /// Stored list for the user, oldest-first as supplied by the caller.
    /// Users without a row get an empty list, not an error.
    pub async fn get(&self, user_id: &str) -> AppResult<Vec<String>> {
        let pool = self.db.pool();
        let conn = pool.lock().await;
        let mut rows = conn
            .query("SELECT items FROM favorites WHERE user_id = ?", [user_id])
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let items_json: String = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
            let items = serde_json::from_str(&items_json)
                .map_err(|e| AppError::Database(format!("Corrupt favorites row: {}", e)))?;
            Ok(items)
        } else {
            Ok(Vec::new())
        }
    }

    /// Replace the user's whole list. Last write wins on concurrent calls.
    pub async fn set(&self, user_id: &str, items: &[String]) -> AppResult<()> {
        let items_json = serde_json::to_string(items)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let now = chrono::Utc::now().timestamp();

        let pool = self.db.pool();
        let conn = pool.lock().await;
        conn.execute(
            r#"
            INSERT INTO favorites (user_id, items, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id)
            DO UPDATE SET items = excluded.items, updated_at = excluded.updated_at
            "#,
            [user_id, &items_json, &now.to_string()],
        )
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
