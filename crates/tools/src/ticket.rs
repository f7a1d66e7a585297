//! Simulated ServiceNow ticket operations.
//!
//! Mirrors the ticket tools the agents call: create, update status,
//! check status. There is no real ITSM backend; ticket ids are minted
//! locally and history lives in the session store.

use crate::session::{SessionStore, TicketRecord};
use chrono::Utc;
use helpdesk_core::ToolResponse;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A freshly created ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub ticket_id: String,
    pub summary: String,
    pub priority: String,
    pub description: String,
    pub system: String,
}

/// Result of a status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub ticket_id: String,
    pub updated_status: String,
    pub timestamp: chrono::DateTime<Utc>,
}

/// Result of a status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketStatus {
    pub ticket_id: String,
    pub current_status: String,
}

/// Ticket operations, optionally backed by a session store for
/// per-user history.
pub struct TicketService {
    session: Option<SessionStore>,
}

impl TicketService {
    /// Create a service without session history.
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Create a service that records tickets in the session store.
    pub fn with_session(session: SessionStore) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Create a ticket in the simulated backend.
    ///
    /// When a session store is attached and a user id is given, the
    /// ticket is also saved to that user's history; a history failure
    /// does not fail the creation.
    pub fn create_ticket(
        &self,
        user_id: Option<&str>,
        summary: &str,
        priority: &str,
        description: &str,
    ) -> ToolResponse<CreatedTicket> {
        if summary.trim().is_empty() {
            return ToolResponse::error("summary must not be empty");
        }

        let ticket_id = mint_ticket_id();
        info!("Created ticket {} ({})", ticket_id, priority);

        if let (Some(session), Some(user_id)) = (self.session.as_ref(), user_id) {
            let record = TicketRecord {
                ticket_id: ticket_id.clone(),
                user_id: user_id.to_string(),
                summary: summary.to_string(),
                status: "Open".to_string(),
                priority: priority.to_string(),
                created_at: Utc::now(),
            };
            if let Err(e) = session.save_ticket(&record) {
                warn!("Failed to save ticket to user history: {}", e);
            }
        }

        ToolResponse::success(
            CreatedTicket {
                ticket_id,
                summary: summary.to_string(),
                priority: priority.to_string(),
                description: description.to_string(),
                system: "ServiceNow (simulated)".to_string(),
            },
            "Ticket created",
        )
    }

    /// Update a ticket's status.
    pub fn update_ticket_status(
        &self,
        ticket_id: &str,
        new_status: &str,
    ) -> ToolResponse<TicketUpdate> {
        info!("Updating ticket {} -> {}", ticket_id, new_status);

        if let Some(session) = self.session.as_ref() {
            match session.update_ticket_status(ticket_id, new_status) {
                Ok(false) => {
                    // Simulated backend accepts updates for tickets it
                    // never saw, matching the original tool
                    warn!("Ticket {} not in history; updating anyway", ticket_id);
                }
                Err(e) => return ToolResponse::error(e.to_string()),
                Ok(true) => {}
            }
        }

        ToolResponse::success(
            TicketUpdate {
                ticket_id: ticket_id.to_string(),
                updated_status: new_status.to_string(),
                timestamp: Utc::now(),
            },
            "Ticket status updated",
        )
    }

    /// Check a ticket's current status.
    ///
    /// Falls back to "In Progress" for tickets outside the history,
    /// matching the original simulated backend.
    pub fn check_ticket_status(&self, ticket_id: &str) -> ToolResponse<TicketStatus> {
        let known_status = self
            .session
            .as_ref()
            .and_then(|session| session.get_ticket(ticket_id).ok().flatten())
            .map(|record| record.status);

        ToolResponse::success(
            TicketStatus {
                ticket_id: ticket_id.to_string(),
                current_status: known_status.unwrap_or_else(|| "In Progress".to_string()),
            },
            "Ticket status retrieved",
        )
    }
}

impl Default for TicketService {
    fn default() -> Self {
        Self::new()
    }
}

/// Mint a ServiceNow-style incident id: "INC" + 7 uppercase hex chars.
fn mint_ticket_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("INC{}", hex[..7].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use tempfile::TempDir;

    #[test]
    fn test_ticket_id_format() {
        let id = mint_ticket_id();
        assert!(id.starts_with("INC"));
        assert_eq!(id.len(), 10);
        assert!(id[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_create_ticket_without_session() {
        let service = TicketService::new();
        let resp = service.create_ticket(None, "VPN down", "High", "VPN fails after update");

        assert!(resp.is_success());
        let data = resp.data.unwrap();
        assert_eq!(data.priority, "High");
        assert_eq!(data.system, "ServiceNow (simulated)");
    }

    #[test]
    fn test_create_ticket_rejects_empty_summary() {
        let service = TicketService::new();
        let resp = service.create_ticket(None, "  ", "Low", "whatever");
        assert!(!resp.is_success());
    }

    #[test]
    fn test_create_ticket_records_history() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir.path().join("sessions.db")).unwrap();
        let service = TicketService::with_session(store);

        let resp = service.create_ticket(Some("u1"), "printer offline", "Medium", "no toner");
        let ticket_id = resp.data.unwrap().ticket_id;

        let status = service.check_ticket_status(&ticket_id);
        assert_eq!(status.data.unwrap().current_status, "Open");
    }

    #[test]
    fn test_update_then_check_status() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir.path().join("sessions.db")).unwrap();
        let service = TicketService::with_session(store);

        let resp = service.create_ticket(Some("u1"), "email down", "High", "");
        let ticket_id = resp.data.unwrap().ticket_id;

        let update = service.update_ticket_status(&ticket_id, "Resolved");
        assert!(update.is_success());

        let status = service.check_ticket_status(&ticket_id);
        assert_eq!(status.data.unwrap().current_status, "Resolved");
    }

    #[test]
    fn test_unknown_ticket_defaults_in_progress() {
        let service = TicketService::new();
        let status = service.check_ticket_status("INC0000000");
        assert_eq!(status.data.unwrap().current_status, "In Progress");
    }
}
