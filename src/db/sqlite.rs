use crate::db::models::{CommandEntry, ExecutionStatus};
use crate::db::schema::SQLITE_INIT;
use crate::error::NovaError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open (and create if missing) the database behind `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, NovaError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct HistoryStorage {
    pool: SqlitePool,
}

impl HistoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), NovaError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new entry. Returns the row id.
    pub async fn insert(
        &self,
        command: &str,
        status: ExecutionStatus,
        timestamp: DateTime<Utc>,
        context: Option<&Value>,
    ) -> Result<i64, NovaError> {
        let context_json = context.map(serde_json::to_string).transpose()?;
        let result = sqlx::query(
            r#"INSERT INTO command_history (command, timestamp, execution_status, context)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(command)
        .bind(timestamp.to_rfc3339())
        .bind(status.as_str())
        .bind(context_json)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Status and response in one statement. Returns false when the row is gone.
    pub async fn complete(
        &self,
        id: i64,
        status: ExecutionStatus,
        response: &str,
    ) -> Result<bool, NovaError> {
        let result = sqlx::query(
            "UPDATE command_history SET execution_status = ?, response = ? WHERE history_id = ?",
        )
        .bind(status.as_str())
        .bind(response)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    #[cfg(test)]
    pub async fn get_by_id(&self, id: i64) -> Result<CommandEntry, NovaError> {
        let row = sqlx::query(
            r#"SELECT history_id, command, response, timestamp, execution_status, context
               FROM command_history WHERE history_id = ?"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_model(row)
    }

    /// Newest first.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<CommandEntry>, NovaError> {
        let rows = sqlx::query(
            r#"SELECT history_id, command, response, timestamp, execution_status, context
               FROM command_history
               ORDER BY timestamp DESC, history_id DESC
               LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Substring match on command or response, newest first.
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<CommandEntry>, NovaError> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(
            r#"SELECT history_id, command, response, timestamp, execution_status, context
               FROM command_history
               WHERE command LIKE ? OR response LIKE ?
               ORDER BY timestamp DESC, history_id DESC
               LIMIT ?"#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Delete every entry. Returns the number of removed rows.
    pub async fn clear(&self) -> Result<u64, NovaError> {
        let result = sqlx::query("DELETE FROM command_history")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn row_to_model(row: SqliteRow) -> Result<CommandEntry, NovaError> {
        let id: i64 = row.try_get("history_id")?;
        let command: String = row.try_get("command")?;
        let response: Option<String> = row.try_get("response")?;
        let timestamp_str: String = row.try_get("timestamp")?;
        let status_str: String = row.try_get("execution_status")?;
        let context_json: Option<String> = row.try_get("context")?;

        let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);
        let execution_status = ExecutionStatus::from_str(&status_str)
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        // unreadable context is dropped rather than failing the whole row
        let context = context_json.and_then(|s| serde_json::from_str(&s).ok());

        Ok(CommandEntry {
            id,
            command,
            response,
            timestamp,
            execution_status,
            context,
        })
    }
}
