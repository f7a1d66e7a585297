//! User session command handler.

use clap::{Args, Subcommand};
use helpdesk_core::{config::AppConfig, AppResult};
use helpdesk_tools::{SessionStore, UserInfo};

/// User session state
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Save user info
    Set(UserSetCommand),
    /// Show user info
    Show(UserShowCommand),
    /// List the user's tickets
    Tickets(UserTicketsCommand),
}

impl UserCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let store = SessionStore::open(&config.session_db_path())?;

        match &self.action {
            UserAction::Set(cmd) => cmd.execute(&store),
            UserAction::Show(cmd) => cmd.execute(&store),
            UserAction::Tickets(cmd) => cmd.execute(&store),
        }
    }
}

/// Save user info
#[derive(Args, Debug)]
pub struct UserSetCommand {
    /// User id
    pub user_id: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,
}

impl UserSetCommand {
    pub fn execute(&self, store: &SessionStore) -> AppResult<()> {
        let user = UserInfo {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
            location: self.location.clone(),
        };
        store.save_user_info(&user)?;
        println!("Saved user '{}'", self.user_id);
        Ok(())
    }
}

/// Show user info
#[derive(Args, Debug)]
pub struct UserShowCommand {
    /// User id
    pub user_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl UserShowCommand {
    pub fn execute(&self, store: &SessionStore) -> AppResult<()> {
        match store.get_user_info(&self.user_id)? {
            Some(user) if self.json => println!("{}", serde_json::to_string_pretty(&user)?),
            Some(user) => {
                println!("id:         {}", user.user_id);
                println!("name:       {}", user.name.unwrap_or_default());
                println!("department: {}", user.department.unwrap_or_default());
                println!("location:   {}", user.location.unwrap_or_default());
            }
            None => println!("Unknown user '{}'", self.user_id),
        }
        Ok(())
    }
}

/// List the user's tickets
#[derive(Args, Debug)]
pub struct UserTicketsCommand {
    /// User id
    pub user_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl UserTicketsCommand {
    pub fn execute(&self, store: &SessionStore) -> AppResult<()> {
        let tickets = store.get_user_tickets(&self.user_id)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&tickets)?);
            return Ok(());
        }

        if tickets.is_empty() {
            println!("No tickets for user '{}'", self.user_id);
            return Ok(());
        }

        for ticket in tickets {
            println!(
                "{}  {:<12} {:<8} {}",
                ticket.ticket_id, ticket.status, ticket.priority, ticket.summary
            );
        }

        Ok(())
    }
}
