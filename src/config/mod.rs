//! Configuration module for the voice assistant.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each backend,
//! `AppPaths` for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    ApiConfig, AppConfig, PlaybackConfig, ResponderConfig, SynthesizerConfig,
    TranscriberConfig, API_KEY_ENV, DEFAULT_SYSTEM_PROMPT,
};
