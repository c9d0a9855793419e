use crate::db::{CommandEntry, ExecutionStatus, HistoryStorage};
use crate::error::NovaError;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_LIMIT: u32 = 20;

/// Command log with a recording switch in front of the storage.
///
/// While recording is off new commands are not written, but rows that were
/// already opened can still be completed.
pub struct CommandHistory {
    storage: HistoryStorage,
    recording: bool,
}

impl CommandHistory {
    pub fn new(storage: HistoryStorage) -> Self {
        Self {
            storage,
            recording: true,
        }
    }

    pub fn storage(&self) -> &HistoryStorage {
        &self.storage
    }

    pub fn start_recording(&mut self) {
        self.recording = true;
        info!("command history recording started");
    }

    pub fn stop_recording(&mut self) {
        self.recording = false;
        info!("command history recording stopped");
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Open a history row. `None` when recording is off.
    pub async fn add_command(
        &self,
        command: &str,
        status: ExecutionStatus,
        context: Option<&Value>,
    ) -> Result<Option<i64>, NovaError> {
        if !self.recording {
            debug!(command, "recording off; command not stored");
            return Ok(None);
        }
        let id = self
            .storage
            .insert(command, status, Utc::now(), context)
            .await?;
        debug!(id, command, "command recorded");
        Ok(Some(id))
    }

    /// Store the final status and response of an opened row.
    pub async fn complete(
        &self,
        id: i64,
        status: ExecutionStatus,
        response: &str,
    ) -> Result<bool, NovaError> {
        self.storage.complete(id, status, response).await
    }

    pub async fn get_history(&self, limit: u32) -> Result<Vec<CommandEntry>, NovaError> {
        self.storage.list_recent(limit).await
    }

    pub async fn search_history(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<CommandEntry>, NovaError> {
        self.storage.search(term, limit).await
    }

    pub async fn clear_history(&self) -> Result<u64, NovaError> {
        let removed = self.storage.clear().await?;
        info!(removed, "command history cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect;

    async fn history() -> CommandHistory {
        let storage = HistoryStorage::new(connect("sqlite::memory:").await.unwrap());
        storage.init_schema().await.unwrap();
        CommandHistory::new(storage)
    }

    #[tokio::test]
    async fn stopped_recording_skips_new_rows() {
        let mut history = history().await;
        assert!(history.is_recording());

        let id = history
            .add_command("time", ExecutionStatus::Initiated, None)
            .await
            .unwrap()
            .expect("recording is on");

        history.stop_recording();
        assert_eq!(
            history
                .add_command("date", ExecutionStatus::Initiated, None)
                .await
                .unwrap(),
            None
        );
        // an open row still completes
        assert!(
            history
                .complete(id, ExecutionStatus::Completed, "The current time is 10:00")
                .await
                .unwrap()
        );

        let rows = history.get_history(DEFAULT_LIMIT).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].execution_status, ExecutionStatus::Completed);

        history.start_recording();
        assert!(
            history
                .add_command("date", ExecutionStatus::Initiated, None)
                .await
                .unwrap()
                .is_some()
        );
    }
}
