//! SQLite-backed session state.
//!
//! Persists what the original pipeline kept in session variables:
//! user profile fields and the per-user ticket history.

use helpdesk_core::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User profile captured during intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub name: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
}

/// A ticket in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub user_id: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Durable store for user profiles and ticket history.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open (or create) the session database at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Session(format!("Failed to create session directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Session(format!("Failed to open session database: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                name TEXT,
                department TEXT,
                location TEXT
            );

            -- tickets may precede the user's intake row, so no FK into users
            CREATE TABLE IF NOT EXISTS tickets (
                ticket_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                summary TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_user ON tickets(user_id);
            "#,
        )
        .map_err(|e| AppError::Session(format!("Failed to create tables: {}", e)))?;

        tracing::debug!("Opened session database at {:?}", db_path);
        Ok(Self { conn })
    }

    /// Save or update a user profile.
    pub fn save_user_info(&self, user: &UserInfo) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO users (user_id, name, department, location)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.user_id, user.name, user.department, user.location],
            )
            .map_err(|e| AppError::Session(format!("Failed to save user info: {}", e)))?;

        tracing::debug!("Saved user info for '{}'", user.user_id);
        Ok(())
    }

    /// Fetch a user profile, if known.
    pub fn get_user_info(&self, user_id: &str) -> AppResult<Option<UserInfo>> {
        self.conn
            .query_row(
                "SELECT user_id, name, department, location FROM users WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(UserInfo {
                        user_id: row.get(0)?,
                        name: row.get(1)?,
                        department: row.get(2)?,
                        location: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| AppError::Session(format!("Failed to read user info: {}", e)))
    }

    /// Append a ticket to a user's history.
    pub fn save_ticket(&self, ticket: &TicketRecord) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO tickets
                 (ticket_id, user_id, summary, status, priority, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    ticket.ticket_id,
                    ticket.user_id,
                    ticket.summary,
                    ticket.status,
                    ticket.priority,
                    ticket.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| AppError::Session(format!("Failed to save ticket: {}", e)))?;

        tracing::debug!(
            "Saved ticket '{}' for user '{}'",
            ticket.ticket_id,
            ticket.user_id
        );
        Ok(())
    }

    /// Update the status of a stored ticket. Returns false when the
    /// ticket is unknown.
    pub fn update_ticket_status(&self, ticket_id: &str, new_status: &str) -> AppResult<bool> {
        let updated = self
            .conn
            .execute(
                "UPDATE tickets SET status = ?2 WHERE ticket_id = ?1",
                params![ticket_id, new_status],
            )
            .map_err(|e| AppError::Session(format!("Failed to update ticket: {}", e)))?;

        Ok(updated > 0)
    }

    /// Fetch a ticket by id.
    pub fn get_ticket(&self, ticket_id: &str) -> AppResult<Option<TicketRecord>> {
        self.conn
            .query_row(
                "SELECT ticket_id, user_id, summary, status, priority, created_at
                 FROM tickets WHERE ticket_id = ?1",
                params![ticket_id],
                Self::row_to_ticket,
            )
            .optional()
            .map_err(|e| AppError::Session(format!("Failed to read ticket: {}", e)))
    }

    /// All tickets for a user, oldest first.
    pub fn get_user_tickets(&self, user_id: &str) -> AppResult<Vec<TicketRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT ticket_id, user_id, summary, status, priority, created_at
                 FROM tickets WHERE user_id = ?1 ORDER BY created_at ASC",
            )
            .map_err(|e| AppError::Session(format!("Failed to prepare query: {}", e)))?;

        let tickets = stmt
            .query_map(params![user_id], Self::row_to_ticket)
            .map_err(|e| AppError::Session(format!("Failed to query tickets: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Session(format!("Failed to read tickets: {}", e)))?;

        Ok(tickets)
    }

    fn row_to_ticket(row: &rusqlite::Row<'_>) -> rusqlite::Result<TicketRecord> {
        let created_at: String = row.get(5)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_timezone(&chrono::Utc);

        Ok(TicketRecord {
            ticket_id: row.get(0)?,
            user_id: row.get(1)?,
            summary: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> SessionStore {
        SessionStore::open(&dir.path().join("sessions.db")).unwrap()
    }

    fn sample_ticket(id: &str, user: &str) -> TicketRecord {
        TicketRecord {
            ticket_id: id.to_string(),
            user_id: user.to_string(),
            summary: "VPN fails after update".to_string(),
            status: "Open".to_string(),
            priority: "High".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_save_and_get_user_info() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let user = UserInfo {
            user_id: "u42".to_string(),
            name: Some("Dana".to_string()),
            department: Some("Finance".to_string()),
            location: None,
        };
        store.save_user_info(&user).unwrap();

        let loaded = store.get_user_info("u42").unwrap().unwrap();
        assert_eq!(loaded, user);
        assert!(store.get_user_info("missing").unwrap().is_none());
    }

    #[test]
    fn test_ticket_history_ordered() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.save_ticket(&sample_ticket("INC0000001", "u1")).unwrap();
        store.save_ticket(&sample_ticket("INC0000002", "u1")).unwrap();
        store.save_ticket(&sample_ticket("INC0000003", "u2")).unwrap();

        let tickets = store.get_user_tickets("u1").unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].ticket_id, "INC0000001");
    }

    #[test]
    fn test_ticket_saved_for_unregistered_user() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        // No users row for "ghost"; history must still be recorded
        store.save_ticket(&sample_ticket("INC0000009", "ghost")).unwrap();

        let tickets = store.get_user_tickets("ghost").unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].status, "Open");
    }

    #[test]
    fn test_update_ticket_status() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.save_ticket(&sample_ticket("INC0000001", "u1")).unwrap();

        assert!(store.update_ticket_status("INC0000001", "Resolved").unwrap());
        let ticket = store.get_ticket("INC0000001").unwrap().unwrap();
        assert_eq!(ticket.status, "Resolved");

        assert!(!store.update_ticket_status("INC9999999", "Resolved").unwrap());
    }
}
