//! Completion provider configuration.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible completion settings.
///
/// The API key is normally supplied through `OPENAI_API_KEY` rather than the
/// config file; see [`LlmConfig::apply_env`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key. Never serialized back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier. Defaults to "gpt-4o-mini".
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature. Defaults to 0.2.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Per-request timeout in seconds. Defaults to 60.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Overlay `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup("OPENAI_MODEL").filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> usize {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let c = LlmConfig::default();
        assert!(c.api_key.is_none());
        assert_eq!(c.model, "gpt-4o-mini");
        assert_eq!(c.base_url, "https://api.openai.com/v1");
        assert_eq!(c.max_tokens, 1024);
        assert_eq!(c.timeout_secs, 60);
    }

    #[test]
    fn env_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", ""),
        ]
        .into_iter()
        .collect();

        let mut c = LlmConfig::default();
        c.apply_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(c.api_key.as_deref(), Some("sk-test"));
        assert_eq!(c.model, "gpt-4o");
        // Empty values are ignored.
        assert_eq!(c.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn api_key_is_not_serialized() {
        let c = LlmConfig {
            api_key: Some("secret".into()),
            ..LlmConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("secret"));
    }
}
