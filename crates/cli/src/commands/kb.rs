//! Knowledge base command handler.

use clap::{Args, Subcommand};
use helpdesk_core::{config::AppConfig, AppError, AppResult};
use helpdesk_knowledge::{create_provider, KnowledgeBase, DEFAULT_TOP_K};

/// Knowledge base operations
#[derive(Args, Debug)]
pub struct KbCommand {
    #[command(subcommand)]
    pub action: KbAction,
}

#[derive(Subcommand, Debug)]
pub enum KbAction {
    /// Add a document to the knowledge base
    Add(KbAddCommand),
    /// Search the knowledge base
    Search(KbSearchCommand),
    /// Show knowledge base statistics
    Stats(KbStatsCommand),
}

impl KbCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let provider = create_provider(config)?;
        let kb = KnowledgeBase::open(&config.snapshot_path(), provider)?;

        match &self.action {
            KbAction::Add(cmd) => cmd.execute(&kb).await,
            KbAction::Search(cmd) => cmd.execute(&kb).await,
            KbAction::Stats(cmd) => cmd.execute(&kb).await,
        }
    }
}

/// Add a document
#[derive(Args, Debug)]
pub struct KbAddCommand {
    /// Document text
    pub text: String,

    /// Metadata as a JSON object
    #[arg(long, default_value = "{}")]
    pub metadata: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KbAddCommand {
    pub async fn execute(&self, kb: &KnowledgeBase) -> AppResult<()> {
        let metadata: serde_json::Value = serde_json::from_str(&self.metadata)
            .map_err(|e| AppError::InvalidDocument(format!("Invalid metadata JSON: {}", e)))?;

        let response = kb.add_document(&self.text, metadata).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else if response.is_success() {
            println!("{} ({} documents)", response.message, response.count);
        } else {
            println!("Error: {}", response.message);
        }

        Ok(())
    }
}

/// Search the knowledge base
#[derive(Args, Debug)]
pub struct KbSearchCommand {
    /// Query text
    pub query: String,

    /// Number of results to retrieve
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KbSearchCommand {
    pub async fn execute(&self, kb: &KnowledgeBase) -> AppResult<()> {
        let response = kb.search(&self.query, self.top_k).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }

        if !response.is_success() {
            println!("Error: {}", response.message);
            return Ok(());
        }

        if response.results.is_empty() {
            println!("{}", response.message);
            return Ok(());
        }

        for (i, hit) in response.results.iter().enumerate() {
            println!("{}. [{:.4}] {}", i + 1, hit.score, hit.text);
            if !hit.metadata.is_null() && hit.metadata != serde_json::json!({}) {
                println!("   metadata: {}", hit.metadata);
            }
        }

        Ok(())
    }
}

/// Show statistics
#[derive(Args, Debug)]
pub struct KbStatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KbStatsCommand {
    pub async fn execute(&self, kb: &KnowledgeBase) -> AppResult<()> {
        let stats = kb.stats().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Documents: {}", stats.documents);
            match stats.dimension {
                Some(dim) => println!("Dimension: {}", dim),
                None => println!("Dimension: (uninitialized)"),
            }
        }

        Ok(())
    }
}
