// ABOUTME: Configuration management for the milepost application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::workflow::{Actor, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YAML document holding the task records.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// JSONL file receiving transition events.
    #[serde(default = "default_audit_log")]
    pub audit_log: PathBuf,

    /// Default acting identity when --actor/--role are not passed.
    #[serde(default)]
    pub actor: ActorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorConfig {
    pub id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("milepost-tasks.yaml")
}

fn default_audit_log() -> PathBuf {
    PathBuf::from("milepost-audit.jsonl")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            audit_log: default_audit_log(),
            actor: ActorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("milepost.yaml"),
            PathBuf::from("milepost.yml"),
            PathBuf::from(".milepost.yaml"),
            PathBuf::from(".milepost.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".milepost").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Default path (may not exist)
        PathBuf::from("milepost.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(store) = std::env::var("MILEPOST_STORE") {
            self.store_path = PathBuf::from(store);
        }
        if let Ok(audit) = std::env::var("MILEPOST_AUDIT_LOG") {
            self.audit_log = PathBuf::from(audit);
        }
        if let Ok(actor) = std::env::var("MILEPOST_ACTOR") {
            self.actor.id = Some(actor);
        }
        if let Ok(role) = std::env::var("MILEPOST_ROLE") {
            self.actor.role = Some(role);
        }
        if let Ok(level) = std::env::var("MILEPOST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MILEPOST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Resolve the acting identity: CLI flags win over configuration.
    pub fn resolve_actor(&self, cli_actor: Option<&str>, cli_role: Option<&str>) -> Result<Actor> {
        let id = cli_actor
            .map(String::from)
            .or_else(|| self.actor.id.clone())
            .ok_or_else(|| {
                anyhow!("no acting identity; pass --actor or set MILEPOST_ACTOR")
            })?;

        let role_name = cli_role
            .map(String::from)
            .or_else(|| self.actor.role.clone())
            .ok_or_else(|| anyhow!("no acting role; pass --role or set MILEPOST_ROLE"))?;

        let role: Role = role_name
            .parse()
            .map_err(|e| anyhow!("invalid role: {}", e))?;

        Ok(Actor::new(id, role))
    }
}
