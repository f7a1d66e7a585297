//! ITSM tool surface.
//!
//! Simulated ticket operations, per-user session state, and an
//! append-only audit log. Tool operations return structured responses
//! (`ToolResponse`) so calling agents can branch on the outcome.

pub mod audit;
pub mod session;
pub mod ticket;

// Re-export commonly used types
pub use audit::AuditLog;
pub use session::{SessionStore, TicketRecord, UserInfo};
pub use ticket::{CreatedTicket, TicketService, TicketStatus, TicketUpdate};
