//! Configuration management for the helpdesk CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.helpdesk/config.yaml)
//!
//! The configuration is workspace-centric, with all persisted state
//! (knowledge snapshot, session database, audit log) stored under
//! `.helpdesk/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Known embedding providers.
pub const KNOWN_PROVIDERS: [&str; 2] = ["mock", "gemini"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .helpdesk/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Embedding provider ("mock" or "gemini")
    pub provider: String,

    /// Embedding model identifier
    pub model: String,

    /// API key for the remote embedding provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    embedding: Option<EmbeddingSection>,
    workspace: Option<WorkspaceSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            // Offline-first default; "gemini" requires GEMINI_API_KEY
            provider: "mock".to_string(),
            model: "text-embedding-004".to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `HELPDESK_WORKSPACE`: Override workspace path
    /// - `HELPDESK_CONFIG`: Path to config file
    /// - `HELPDESK_PROVIDER`: Embedding provider
    /// - `HELPDESK_MODEL`: Embedding model identifier
    /// - `GEMINI_API_KEY`: API key for the remote provider
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("HELPDESK_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("HELPDESK_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".helpdesk/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("HELPDESK_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("HELPDESK_MODEL") {
            config.model = model;
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.provider = provider;
            }
            if let Some(model) = embedding.model {
                result.model = model;
            }
            if let Some(env_var) = embedding.api_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.api_key = Some(key);
                }
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables
    /// and the config file.
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .helpdesk directory.
    pub fn helpdesk_dir(&self) -> PathBuf {
        self.workspace.join(".helpdesk")
    }

    /// Ensure the .helpdesk directory exists.
    pub fn ensure_helpdesk_dir(&self) -> AppResult<()> {
        let dir = self.helpdesk_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .helpdesk directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path to the knowledge-base snapshot artifact.
    pub fn snapshot_path(&self) -> PathBuf {
        self.helpdesk_dir().join("knowledge.json")
    }

    /// Path to the session database.
    pub fn session_db_path(&self) -> PathBuf {
        self.helpdesk_dir().join("sessions.db")
    }

    /// Path to the audit log.
    pub fn audit_log_path(&self) -> PathBuf {
        self.helpdesk_dir().join("system_logs.txt")
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.provider == "gemini" && self.api_key.is_none() {
            return Err(AppError::Config(
                "Provider 'gemini' requires GEMINI_API_KEY to be set".to_string(),
            ));
        }

        Ok(())
    }
}
