use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Models tried, in order, when the service cannot list its own.
pub const DEFAULT_FALLBACK_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama-3.1-70b-versatile",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
];

const LEGACY_YAML_FILE: &str = "config.yaml";
const LEGACY_YAML_KEY: &str = "GROQ_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,
    #[serde(default = "default_history")]
    pub history: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_fallback_models() -> Vec<String> {
    DEFAULT_FALLBACK_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_history() -> bool {
    true
}

impl Config {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
            fallback_models: default_fallback_models(),
            history: default_history(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Reads the `GROQ_API_KEY` entry of an old-style `config.yaml`.
    pub fn import_legacy_yaml(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let values: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid legacy config {:?}", path))?;
        Ok(values
            .get(LEGACY_YAML_KEY)
            .and_then(|key| key.as_str())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Self::with_api_key))
    }

    /// Environment variables win over the stored file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("SHELLMATE_API_KEY").or_else(|| lookup("GROQ_API_KEY")) {
            if !key.trim().is_empty() {
                debug!("API key taken from environment");
                self.api_key = key.trim().to_string();
            }
        }
        if let Some(url) = lookup("SHELLMATE_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!("No API key configured"));
        }
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("No base URL configured"));
        }
        Ok(())
    }

    /// Loads the config at `path`, creating it on first run.
    pub fn ensure_config_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let config = match Self::import_legacy_yaml(Path::new(LEGACY_YAML_FILE))? {
            Some(config) => {
                info!("Imported API key from {}", LEGACY_YAML_FILE);
                config
            }
            None => {
                let stdin = io::stdin();
                Self::prompt_for_key(&mut stdin.lock(), &mut io::stdout())?
            }
        };

        config.save(path)?;
        println!("Created config file at {:?}", path);
        Ok(config)
    }

    fn prompt_for_key<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Self> {
        write!(output, "Enter your API key: ")?;
        output.flush()?;

        let mut key = String::new();
        input.read_line(&mut key)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("An API key is required"));
        }
        Ok(Self::with_api_key(key))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "shellmate", "shellmate")
        .ok_or_else(|| anyhow!("Could not determine config directory"))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn get_history_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("history.txt"))
}
