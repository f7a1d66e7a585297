//! Append-only audit log.
//!
//! One line per event: `<utc timestamp> | <ticket_id> | <LEVEL> | <message>`.

use helpdesk_core::AppResult;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed audit log for ticket events.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Append one event line; creates the file on first use.
    pub fn append(&self, ticket_id: &str, level: &str, message: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let line = format!(
            "{} | {} | {} | {}\n",
            chrono::Utc::now().to_rfc3339(),
            ticket_id,
            level,
            message
        );

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
