//! Ticket command handler.

use clap::{Args, Subcommand};
use helpdesk_core::{config::AppConfig, AppResult};
use helpdesk_tools::{AuditLog, SessionStore, TicketService};

/// Ticket operations (simulated ServiceNow)
#[derive(Args, Debug)]
pub struct TicketCommand {
    #[command(subcommand)]
    pub action: TicketAction,
}

#[derive(Subcommand, Debug)]
pub enum TicketAction {
    /// Create a ticket
    Create(TicketCreateCommand),
    /// Check a ticket's status
    Status(TicketStatusCommand),
    /// Update a ticket's status
    Update(TicketUpdateCommand),
}

impl TicketCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let session = SessionStore::open(&config.session_db_path())?;
        let service = TicketService::with_session(session);
        let audit = AuditLog::new(&config.audit_log_path());

        match &self.action {
            TicketAction::Create(cmd) => cmd.execute(&service, &audit),
            TicketAction::Status(cmd) => cmd.execute(&service),
            TicketAction::Update(cmd) => cmd.execute(&service, &audit),
        }
    }
}

/// Create a ticket
#[derive(Args, Debug)]
pub struct TicketCreateCommand {
    /// Ticket summary
    pub summary: String,

    /// Priority (Low, Medium, High, Critical)
    #[arg(long, default_value = "Medium")]
    pub priority: String,

    /// Detailed description
    #[arg(long, default_value = "")]
    pub description: String,

    /// User id to record the ticket against
    #[arg(long)]
    pub user: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TicketCreateCommand {
    pub fn execute(&self, service: &TicketService, audit: &AuditLog) -> AppResult<()> {
        let response = service.create_ticket(
            self.user.as_deref(),
            &self.summary,
            &self.priority,
            &self.description,
        );

        if let Some(ticket) = response.data.as_ref() {
            audit.append(&ticket.ticket_id, "INFO", "ticket created")?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else if let Some(ticket) = response.data.as_ref() {
            println!("Created {} ({})", ticket.ticket_id, ticket.priority);
        } else {
            println!("Error: {}", response.message);
        }

        Ok(())
    }
}

/// Check ticket status
#[derive(Args, Debug)]
pub struct TicketStatusCommand {
    /// Ticket id (e.g., INC12AB34C)
    pub ticket_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TicketStatusCommand {
    pub fn execute(&self, service: &TicketService) -> AppResult<()> {
        let response = service.check_ticket_status(&self.ticket_id);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else if let Some(status) = response.data.as_ref() {
            println!("{}: {}", status.ticket_id, status.current_status);
        } else {
            println!("Error: {}", response.message);
        }

        Ok(())
    }
}

/// Update ticket status
#[derive(Args, Debug)]
pub struct TicketUpdateCommand {
    /// Ticket id
    pub ticket_id: String,

    /// New status (e.g., "In Progress", "Resolved")
    pub new_status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TicketUpdateCommand {
    pub fn execute(&self, service: &TicketService, audit: &AuditLog) -> AppResult<()> {
        let response = service.update_ticket_status(&self.ticket_id, &self.new_status);

        if response.is_success() {
            audit.append(
                &self.ticket_id,
                "INFO",
                &format!("status -> {}", self.new_status),
            )?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else if let Some(update) = response.data.as_ref() {
            println!("{} -> {}", update.ticket_id, update.updated_status);
        } else {
            println!("Error: {}", response.message);
        }

        Ok(())
    }
}
