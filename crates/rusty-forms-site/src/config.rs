// File: src/config.rs
// Purpose: Configuration parsing from rusty-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "rusty-forms.toml";

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dev: DevConfig,

    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Development configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevConfig {
    #[serde(default = "default_false")]
    pub hot_reload: bool,
}

/// Static asset locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetsConfig {
    /// Output of `wasm-pack build crates/rusty-forms-wasm --target web`
    #[serde(default = "default_wasm_dir")]
    pub wasm_dir: String,
}

// Default values
fn default_name() -> String {
    "rusty-forms".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_false() -> bool {
    false
}

fn default_wasm_dir() -> String {
    "crates/rusty-forms-wasm/pkg".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            hot_reload: default_false(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            wasm_dir: default_wasm_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a file; a missing or empty file yields defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `rusty-forms.toml` in the current directory
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// `HOT_RELOAD` wins over the file when it parses as a bool
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(enabled) = std::env::var("HOT_RELOAD")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            self.dev.hot_reload = enabled;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
