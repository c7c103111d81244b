//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::llm::ModelId;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Behavioural instruction seeded as the first history entry.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a thoughtful assistant. Respond to all input in 25 words and answer in Korean.";

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Connection settings shared by the transcription and chat backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the OpenAI-compatible API (no trailing `/v1`).
    pub base_url: String,
    /// API credential, passed through unchanged.  `None` or empty falls back
    /// to [`API_KEY_ENV`].
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// ResponderConfig
// ---------------------------------------------------------------------------

/// Settings for the chat model that answers each question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Model selected from the fixed set.
    pub model: ModelId,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f32,
    /// Instruction placed at the head of every conversation.
    pub system_prompt: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            temperature: 0.7,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriberConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-to-text backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    /// Transcription model name sent to the API.
    pub model: String,
    /// Optional ISO-639-1 hint; `None` lets the backend detect the language.
    pub language: Option<String>,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            model: "whisper-1".into(),
            language: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesizerConfig
// ---------------------------------------------------------------------------

/// Settings for the text-to-speech backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Spoken language of the synthesized reply.
    pub language: String,
    /// Base URL of the translate TTS service.
    pub base_url: String,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            language: "ko".into(),
            base_url: "https://translate.google.com".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// How the terminal front-end plays synthesized replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// External player executable (e.g. `"mpv"`).  `None` disables playback.
    pub command: Option<String>,
    /// Extra arguments placed before the audio file path.
    pub args: Vec<String>,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use voice_assistant::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("model = {}", config.responder.model);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub responder: ResponderConfig,
    pub transcriber: TranscriberConfig,
    pub synthesizer: SynthesizerConfig,
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Fill an unset or empty API key from [`API_KEY_ENV`].
    pub fn with_env_api_key(mut self) -> Self {
        let missing = self.api.api_key.as_deref().map_or(true, str::is_empty);
        if missing {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                if !key.is_empty() {
                    self.api.api_key = Some(key);
                }
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
