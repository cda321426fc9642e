use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inspector: InspectorSettings,
    pub sequencer_step_delay_ms: u64,
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorSettings {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key
    /// itself never lands in the config file.
    pub api_key_env: String,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            endpoint:
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
                    .to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "PORTAL_BRIDGE_API_KEY".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inspector: InspectorSettings::default(),
            sequencer_step_delay_ms: 800,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        std::env::var_os("PORTAL_BRIDGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn exists() -> bool {
        Self::path().exists()
    }

    pub fn load() -> Result<Self> {
        let path = Self::path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config")
    }

    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path(), content)?;
        Ok(())
    }

    pub fn inspector_endpoint(&self) -> String {
        std::env::var("PORTAL_BRIDGE_AI_ENDPOINT")
            .unwrap_or_else(|_| self.inspector.endpoint.clone())
    }

    pub fn inspector_model(&self) -> String {
        std::env::var("PORTAL_BRIDGE_AI_MODEL")
            .unwrap_or_else(|_| self.inspector.model.clone())
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.inspector.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
