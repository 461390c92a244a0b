//! Application settings.
//!
//! Settings are stored in `.menuboard.toml`. Every section is optional and a
//! missing file means "all defaults".
//!
//! # Configuration File Format
//!
//! ```toml
//! [assistant]
//! api_key = "${env:GEMINI_API_KEY}"
//! image_model = "gemini-2.5-flash-image"
//!
//! [share]
//! base_url = "https://menu.example.com/board"
//! max_url_len = 2500
//!
//! [store]
//! dir = ".menuboard"
//! quota_bytes = 5242880
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::share::DEFAULT_MAX_URL_LEN;
use crate::utils::replace_env_placeholders;

/// Default settings file name.
pub const SETTINGS_FILE: &str = ".menuboard.toml";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Generative-AI service.
    pub assistant: AssistantConfig,
    /// Share links.
    pub share: ShareConfig,
    /// Local library storage.
    pub store: StoreConfig,
}

/// Generative-AI service settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    /// API key. Supports `${env:VAR}` placeholders.
    pub api_key: Option<String>,
    /// API root, without the `/models/...` suffix.
    pub endpoint: String,
    /// Model used for item photos.
    pub image_model: String,
    /// Model used for copywriting and menu extraction.
    pub text_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            image_model: "gemini-2.5-flash-image".into(),
            text_model: "gemini-3-flash-preview".into(),
            timeout_secs: 120,
        }
    }
}

/// Share link settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ShareConfig {
    /// Page URL the token is appended to.
    pub base_url: String,
    /// URL length above which scannable artifacts fall back to `base_url`.
    pub max_url_len: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".into(),
            max_url_len: DEFAULT_MAX_URL_LEN,
        }
    }
}

/// Library storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding stored values. Relative paths are resolved against
    /// the settings file's directory.
    pub dir: PathBuf,
    /// Total bytes all stored values may occupy.
    pub quota_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".menuboard"),
            quota_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when the file does not exist.
    ///
    /// `${env:VAR}` placeholders in the API key are expanded, and
    /// [`API_KEY_ENV`] is used when no key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str::<Settings>(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            debug!("{} not found, using default settings", path.display());
            Settings::default()
        };

        if settings.store.dir.is_relative()
            && let Some(parent) = path.parent()
        {
            settings.store.dir = parent.join(&settings.store.dir);
        }

        settings.assistant.api_key = match settings.assistant.api_key.take() {
            Some(key) => Some(replace_env_placeholders(&key)),
            None => std::env::var(API_KEY_ENV).ok(),
        }
        .filter(|k| !k.is_empty());

        Ok(settings)
    }
}
