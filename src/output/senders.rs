use async_trait::async_trait;
use log::{debug, error};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::utils::error::GpsError;

#[async_trait]
pub trait ReportSender: Send + Sync {
    async fn send(&self, data: &str) -> Result<(), GpsError>;
    fn sender_type(&self) -> &str;
    fn destination(&self) -> &str;
}

pub struct ConsoleSender;

#[async_trait]
impl ReportSender for ConsoleSender {
    async fn send(&self, data: &str) -> Result<(), GpsError> {
        println!("{}", data);
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "console"
    }

    fn destination(&self) -> &str {
        "stdout"
    }
}

/// Appends one line per report; truncates first when `append` is false.
pub struct FileSender {
    file_path: String,
    append: bool,
}

impl FileSender {
    pub fn new<P: AsRef<Path>>(file_path: P, append: bool) -> Self {
        Self {
            file_path: file_path.as_ref().to_string_lossy().to_string(),
            append,
        }
    }

    /// Empties the file when this sender was created in truncate mode.
    pub async fn prepare(&self) -> Result<(), GpsError> {
        if !self.append {
            tokio::fs::write(&self.file_path, b"").await.map_err(|e| {
                error!("❌ Failed to truncate file {}: {}", self.file_path, e);
                GpsError::CommunicationError(format!("File write error: {}", e))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReportSender for FileSender {
    async fn send(&self, data: &str) -> Result<(), GpsError> {
        if data.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await
            .map_err(|e| {
                error!("❌ Failed to open file {}: {}", self.file_path, e);
                GpsError::CommunicationError(format!("File open error: {}", e))
            })?;

        file.write_all(format!("{}\n", data).as_bytes())
            .await
            .map_err(|e| {
                error!("❌ Failed to write to file {}: {}", self.file_path, e);
                GpsError::CommunicationError(format!("File write error: {}", e))
            })?;

        debug!("📝 Wrote {} bytes to {}", data.len() + 1, self.file_path);
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "file"
    }

    fn destination(&self) -> &str {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("nmea_fix_{}_{}.log", tag, std::process::id()))
    }

    #[tokio::test]
    async fn test_file_sender_appends_lines() {
        let path = temp_path("append");
        let sender = FileSender::new(&path, false);
        sender.prepare().await.unwrap();

        sender.send("first").await.unwrap();
        sender.send("").await.unwrap();
        sender.send("second").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        assert_eq!(content, "first\nsecond\n");
        assert_eq!(sender.sender_type(), "file");
    }

    #[tokio::test]
    async fn test_file_sender_reports_open_failure() {
        let dir = std::env::temp_dir();
        let sender = FileSender::new(&dir, true);
        assert!(matches!(
            sender.send("data").await,
            Err(GpsError::CommunicationError(_))
        ));
    }
}
