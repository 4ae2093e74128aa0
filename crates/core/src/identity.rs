//! Identity — the assistant persona and system prompt.
//!
//! Resolution order (first hit wins):
//!
//! 1. **Config override** — `identity.system_prompt_override` in config.toml
//! 2. **Prompt file** — `~/.deskhand/PROMPT.md` (or a configured path)
//! 3. **Built-in default** — the HR/IT helpdesk persona
//!
//! The prompt file is optional; a missing file is silently skipped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The assistant's identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The assistant's name
    pub name: String,

    /// The resolved system prompt
    pub system_prompt: String,

    /// Where the prompt came from (for diagnostics)
    pub source: PromptSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSource {
    Builtin,
    File,
    Override,
}

/// Configuration for identity resolution.
#[derive(Debug, Clone, Default)]
pub struct IdentityPaths {
    /// Optional prompt file (e.g., ~/.deskhand/PROMPT.md)
    pub prompt_file: Option<PathBuf>,

    /// Optional system prompt override (skips file loading)
    pub system_prompt_override: Option<String>,
}

impl Identity {
    /// The built-in helpdesk persona.
    ///
    /// Mirrors the operational rules the engine enforces structurally: the
    /// model is told to reuse the session user's name instead of re-asking,
    /// and the argument enricher guarantees it even when the model forgets.
    fn builtin_system_prompt() -> String {
        concat!(
            "You are an HR and IT assistant for a technology company. ",
            "You help employees with benefits, vacation, leave, account provisioning, ",
            "and technical support. ",
            "Reason step by step: analyze the request, decide whether a tool is needed, ",
            "run it if so, and then produce a thoughtful, professional, concise answer. ",
            "Follow the AI transparency policy: say whether an answer came from reasoning ",
            "or from a tool. ",
            "If a tool requires a user field that was not provided, use the current ",
            "session user's name. ",
            "Never ask for the user's name again unless critical data is missing.",
        )
        .into()
    }

    /// Create the default identity when nothing is configured.
    pub fn default_identity() -> Self {
        Self {
            name: "Deskhand".into(),
            system_prompt: Self::builtin_system_prompt(),
            source: PromptSource::Builtin,
        }
    }

    /// Resolve the identity from the configured sources.
    pub fn load(paths: &IdentityPaths) -> Self {
        if let Some(override_prompt) = &paths.system_prompt_override {
            debug!("Using system prompt override, skipping file loading");
            return Self {
                system_prompt: override_prompt.clone(),
                source: PromptSource::Override,
                ..Self::default_identity()
            };
        }

        if let Some(path) = &paths.prompt_file {
            if let Some(content) = Self::read_file_safe(path) {
                if !content.trim().is_empty() {
                    debug!(file = %path.display(), "Loaded prompt file");
                    return Self {
                        system_prompt: content.trim().to_string(),
                        source: PromptSource::File,
                        ..Self::default_identity()
                    };
                }
            }
        }

        Self::default_identity()
    }

    /// Safely read a file, returning None on any error.
    fn read_file_safe(path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    /// Estimate the token count of the system prompt (rough: 4 chars ≈ 1 token).
    pub fn estimated_tokens(&self) -> usize {
        self.system_prompt.len() / 4
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::default_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_identity_has_persona() {
        let id = Identity::default();
        assert_eq!(id.name, "Deskhand");
        assert!(id.system_prompt.contains("HR and IT assistant"));
        assert_eq!(id.source, PromptSource::Builtin);
    }

    #[test]
    fn load_with_override_skips_files() {
        let paths = IdentityPaths {
            system_prompt_override: Some("Custom prompt".into()),
            ..Default::default()
        };
        let id = Identity::load(&paths);
        assert_eq!(id.system_prompt, "Custom prompt");
        assert_eq!(id.source, PromptSource::Override);
    }

    #[test]
    fn load_from_prompt_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("PROMPT.md");
        fs::write(&path, "You are a pirate helpdesk.\n").unwrap();

        let paths = IdentityPaths {
            prompt_file: Some(path),
            ..Default::default()
        };
        let id = Identity::load(&paths);
        assert_eq!(id.system_prompt, "You are a pirate helpdesk.");
        assert_eq!(id.source, PromptSource::File);
    }

    #[test]
    fn missing_prompt_file_falls_back() {
        let paths = IdentityPaths {
            prompt_file: Some(PathBuf::from("/nonexistent/PROMPT.md")),
            ..Default::default()
        };
        let id = Identity::load(&paths);
        assert_eq!(id.source, PromptSource::Builtin);
    }

    #[test]
    fn estimated_tokens_reasonable() {
        let id = Identity::default();
        let tokens = id.estimated_tokens();
        assert!(tokens > 10);
        assert!(tokens < 500);
    }
}
