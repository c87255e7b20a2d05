//! Planning configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};

static DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Configuration at ~/.config/planning/config.toml
///
/// Every key can be overridden with a `PLANNING_`-prefixed environment
/// variable, e.g. `PLANNING_API_URL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Base URL of the planning API.
    pub api_url: String,

    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// File holding the bearer token, used when `api_token` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_file: Option<PathBuf>,

    pub request_timeout_secs: u64,

    /// Length of one calendar grid cell.
    pub slot_minutes: u32,

    /// Start with the assignee filter set to the first known employee.
    pub select_first_assignee: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        PlanningConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            api_token_file: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            select_first_assignee: false,
        }
    }
}

impl PlanningConfig {
    pub fn config_path() -> PlanningResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanningError::Config("Could not determine config directory".into()))?
            .join("planning");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user configuration, creating a commented default file first
    /// if none exists.
    pub fn load() -> PlanningResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path` (optional) layered under the
    /// `PLANNING_` environment.
    pub fn load_from(path: &Path) -> PlanningResult<Self> {
        Self::build(path, Some(Environment::with_prefix("PLANNING")))
    }

    /// Load configuration from `path` alone, ignoring the environment.
    pub fn load_file(path: &Path) -> PlanningResult<Self> {
        Self::build(path, None)
    }

    fn build(path: &Path, env: Option<Environment>) -> PlanningResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let config: PlanningConfig = builder
            .build()
            .map_err(|e| PlanningError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanningError::Config(e.to_string()))?;

        if config.slot_minutes == 0 || config.slot_minutes > 24 * 60 {
            return Err(PlanningError::Config(format!(
                "slot_minutes must be between 1 and 1440, got {}",
                config.slot_minutes
            )));
        }

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanningResult<()> {
        let contents = format!(
            "\
# planning configuration

# Planning API base URL:
# api_url = \"{}\"

# Bearer token, inline or read from a file:
# api_token = \"...\"
# api_token_file = \"~/.config/planning/token\"

# Seconds before an API request is abandoned:
# request_timeout_secs = {}

# Length of one calendar grid cell, in minutes:
# slot_minutes = {}

# Start filtered on the first employee:
# select_first_assignee = false
",
            DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_SLOT_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanningError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanningError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The bearer token, read from `api_token_file` when not set inline.
    pub fn token(&self) -> PlanningResult<Option<String>> {
        if let Some(token) = self.api_token.as_deref().map(str::trim)
            && !token.is_empty()
        {
            return Ok(Some(token.to_string()));
        }

        let Some(file) = &self.api_token_file else {
            return Ok(None);
        };

        let path = PathBuf::from(shellexpand::tilde(&file.to_string_lossy()).into_owned());
        let token = std::fs::read_to_string(&path).map_err(|e| {
            PlanningError::Config(format!("Could not read token file {}: {e}", path.display()))
        })?;

        let token = token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlanningConfig::load_file(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.slot_minutes, 30);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        PlanningConfig::create_default_config(&path).unwrap();
        let config = PlanningConfig::load_file(&path).unwrap();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert!(!config.select_first_assignee);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://erp.example.com/api\"\nslot_minutes = 15\nselect_first_assignee = true\n",
        )
        .unwrap();

        let config = PlanningConfig::load_file(&path).unwrap();

        assert_eq!(config.api_url, "https://erp.example.com/api");
        assert_eq!(config.slot_minutes, 15);
        assert!(config.select_first_assignee);
    }

    #[test]
    fn rejects_zero_slot_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "slot_minutes = 0\n").unwrap();

        assert!(matches!(
            PlanningConfig::load_file(&path),
            Err(PlanningError::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "slot_minutes = 15\napi_url = \"https://erp.example.com/api\"\n",
        )
        .unwrap();

        let vars = config::Map::from([("PLANNING_SLOT_MINUTES".to_string(), "60".to_string())]);
        let env = Environment::with_prefix("PLANNING").source(Some(vars));
        let config = PlanningConfig::build(&path, Some(env)).unwrap();

        assert_eq!(config.slot_minutes, 60);
        assert_eq!(config.api_url, "https://erp.example.com/api");
    }

    #[test]
    fn token_read_from_file_when_not_inline() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token");
        std::fs::write(&token_path, "s3cret\n").unwrap();

        let config = PlanningConfig {
            api_token_file: Some(token_path),
            ..Default::default()
        };
        assert_eq!(config.token().unwrap().as_deref(), Some("s3cret"));

        let inline = PlanningConfig {
            api_token: Some("inline".to_string()),
            ..config
        };
        assert_eq!(inline.token().unwrap().as_deref(), Some("inline"));
    }
}
