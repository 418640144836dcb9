use crate::main_helper::RelayConfig;
use crate::types::*;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only, line-delimited JSON log of completed chats.
///
/// Every record is written as one `write_all` while holding `write_lock`, so
/// concurrent appends never interleave within this process.
pub struct ChatLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ChatLog {
    pub fn new(config: &RelayConfig) -> Self {
        Self::at(config.chat_log_path.clone())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    /// Reads every record back. A missing file is an empty log.
    pub async fn entries(&self) -> Result<Vec<LogEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries: Vec<LogEntry> = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            entries.push(serde_json::from_str(line)?);
        }
        Ok(entries)
    }
}
