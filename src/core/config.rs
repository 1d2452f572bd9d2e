//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.palaver/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PalaverConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub welcome_message: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// User-facing strings substituted for each failed-turn outcome. The
/// endpoint's own error text is never shown; these are the only words the
/// user ever sees for a failure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessagesConfig {
    pub no_reply: Option<String>,
    pub transport_error: Option<String>,
}

/// One suggestion chip: activating it submits `label` verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub icon: String,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Hello! I'm your AI assistant. How can I help you today?";
pub const DEFAULT_NO_REPLY_MESSAGE: &str =
    "I apologize, but I couldn't generate a response. Please try again.";
pub const DEFAULT_TRANSPORT_ERROR_MESSAGE: &str =
    "I apologize, but I encountered an error. Please try again.";

/// The stock suggestion chips shown above the input box.
pub fn default_suggestions() -> Vec<Suggestion> {
    [
        ("AI in daily life", "🤖"),
        ("Explain ML simply", "🧠"),
        ("Write a story", "📝"),
        ("Math help", "🔢"),
        ("Productivity tips", "⚡"),
    ]
    .into_iter()
    .map(|(label, icon)| Suggestion {
        label: label.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Per-outcome apology strings, resolved to concrete values.
#[derive(Debug, Clone)]
pub struct ReplyMessages {
    pub no_reply: String,
    pub transport_error: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub welcome_message: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub reply_messages: ReplyMessages,
    pub suggestions: Vec<Suggestion>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.palaver/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".palaver").join("config.toml"))
}

/// Load config from `~/.palaver/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PalaverConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PalaverConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PalaverConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PalaverConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PalaverConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Palaver Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gemini-pro"
# welcome_message = "Hello! I'm your AI assistant. How can I help you today?"

# [gemini]
# api_key = "AIza..."               # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1"

# [messages]
# no_reply = "I apologize, but I couldn't generate a response. Please try again."
# transport_error = "I apologize, but I encountered an error. Please try again."

# [[suggestions]]
# label = "AI in daily life"
# icon = "🤖"

# [[suggestions]]
# label = "Explain ML simply"
# icon = "🧠"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` is from the `--model` CLI flag (None = not specified).
pub fn resolve(config: &PalaverConfig, cli_model: Option<&str>) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PALAVER_MODEL").ok())
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config (never compiled in)
    let gemini_api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .or_else(|| config.gemini.api_key.clone());

    // Base URL: env → config → default
    let gemini_base_url = std::env::var("GEMINI_BASE_URL")
        .ok()
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    let welcome_message = config
        .general
        .welcome_message
        .clone()
        .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string());

    let reply_messages = ReplyMessages {
        no_reply: config
            .messages
            .no_reply
            .clone()
            .unwrap_or_else(|| DEFAULT_NO_REPLY_MESSAGE.to_string()),
        transport_error: config
            .messages
            .transport_error
            .clone()
            .unwrap_or_else(|| DEFAULT_TRANSPORT_ERROR_MESSAGE.to_string()),
    };

    let suggestions = if config.suggestions.is_empty() {
        default_suggestions()
    } else {
        config.suggestions.clone()
    };

    ResolvedConfig {
        model_name,
        welcome_message,
        gemini_api_key,
        gemini_base_url,
        reply_messages,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = PalaverConfig::default();
        assert!(config.general.model.is_none());
        assert!(config.suggestions.is_empty());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = PalaverConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(resolved.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert_eq!(resolved.reply_messages.no_reply, DEFAULT_NO_REPLY_MESSAGE);
        assert_eq!(
            resolved.reply_messages.transport_error,
            DEFAULT_TRANSPORT_ERROR_MESSAGE
        );
        assert_eq!(resolved.suggestions.len(), 5);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PalaverConfig {
            general: GeneralConfig {
                model: Some("my-model".to_string()),
                welcome_message: Some("Howdy.".to_string()),
            },
            gemini: GeminiConfig {
                api_key: Some("test-key".to_string()),
                base_url: Some("http://localhost:9999/v1".to_string()),
            },
            messages: MessagesConfig {
                no_reply: Some("Nothing came back.".to_string()),
                transport_error: Some("The wire broke.".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.welcome_message, "Howdy.");
        assert_eq!(resolved.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(resolved.gemini_base_url, "http://localhost:9999/v1");
        assert_eq!(resolved.reply_messages.no_reply, "Nothing came back.");
        assert_eq!(resolved.reply_messages.transport_error, "The wire broke.");
    }

    #[test]
    fn test_resolve_cli_model_wins() {
        let config = PalaverConfig {
            general: GeneralConfig {
                model: Some("file-model".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("cli-model"));
        assert_eq!(resolved.model_name, "cli-model");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
model = "gemini-pro"
welcome_message = "Hi!"

[gemini]
api_key = "AIza-test-123"
base_url = "http://192.168.1.100:8080/v1"

[messages]
no_reply = "No answer."

[[suggestions]]
label = "AI in daily life"
icon = "🤖"

[[suggestions]]
label = "Math help"
icon = "🔢"
"#;
        let config: PalaverConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("gemini-pro"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test-123"));
        assert_eq!(config.messages.no_reply.as_deref(), Some("No answer."));
        assert!(config.messages.transport_error.is_none());
        assert_eq!(config.suggestions.len(), 2);
        assert_eq!(config.suggestions[1].label, "Math help");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
model = "my-model"
"#;
        let config: PalaverConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("my-model"));
        assert!(config.general.welcome_message.is_none());
        assert!(config.gemini.api_key.is_none());
        assert!(config.suggestions.is_empty());
    }

    #[test]
    fn test_configured_suggestions_replace_defaults() {
        let config = PalaverConfig {
            suggestions: vec![Suggestion {
                label: "Only one".to_string(),
                icon: "1".to_string(),
            }],
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.suggestions.len(), 1);
        assert_eq!(resolved.suggestions[0].label, "Only one");
    }

    #[test]
    fn test_default_suggestions_match_original_set() {
        let defaults = default_suggestions();
        let labels: Vec<&str> = defaults.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "AI in daily life",
                "Explain ML simply",
                "Write a story",
                "Math help",
                "Productivity tips"
            ]
        );
    }
}
