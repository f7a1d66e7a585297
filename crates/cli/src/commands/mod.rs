//! Command handlers for the helpdesk CLI.

mod kb;
mod ticket;
mod user;

pub use kb::KbCommand;
pub use ticket::TicketCommand;
pub use user::UserCommand;
