use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Database {
    db: Arc<LibsqlDatabase>,
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Remote Turso database or local SQLite file, decided by the URL scheme
        let db = if database_url.starts_with("libsql://") || database_url.starts_with("https://") {
            let auth_token = std::env::var("TURSO_AUTH_TOKEN").unwrap_or_else(|_| "".to_string());

            Builder::new_remote(database_url.to_string(), auth_token)
                .build()
                .await?
        } else {
            Builder::new_local(database_url).build().await?
        };

        let conn = db.connect()?;

        Ok(Database {
            db: Arc::new(db),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        let migrations = vec![include_str!("../migrations/sqlite/001_initial.sql")];

        for (idx, migration_sql) in migrations.iter().enumerate() {
            tracing::info!("Running migration {}", idx + 1);

            for statement in Self::parse_sql_statements(migration_sql) {
                let trimmed = statement.trim();
                if trimmed.is_empty() || trimmed.starts_with("--") {
                    continue;
                }
                let conn = self.conn.lock().await;
                if let Err(e) = conn.execute(trimmed, ()).await {
                    let error_msg = e.to_string();
                    if error_msg.contains("already exists") {
                        tracing::debug!(
                            "Skipping non-fatal migration error in migration {}: {}",
                            idx + 1,
                            e
                        );
                    } else {
                        anyhow::bail!("migration {} failed: {}", idx + 1, e);
                    }
                }
            }
        }

        tracing::info!("All migrations completed");
        Ok(())
    }

    /// Split a migration file into individual statements.
    fn parse_sql_statements(sql: &str) -> Vec<String> {
        let mut statements = Vec::new();
        let mut current_statement = String::new();

        for line in sql.lines() {
            let trimmed_line = line.trim();

            if current_statement.is_empty()
                && (trimmed_line.is_empty() || trimmed_line.starts_with("--"))
            {
                continue;
            }

            current_statement.push_str(line);
            current_statement.push('\n');

            if trimmed_line.ends_with(';') {
                statements.push(current_statement.clone());
                current_statement.clear();
            }
        }

        if !current_statement.trim().is_empty() {
            statements.push(current_statement);
        }

        statements
    }

    pub fn pool(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sql_statements() {
        let sql = "-- comment\nCREATE TABLE a (x INTEGER);\n\nCREATE TABLE b (y INTEGER);\n";
        let statements = Database::parse_sql_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("CREATE TABLE a"));
        assert!(statements[1].contains("CREATE TABLE b"));
    }
}
