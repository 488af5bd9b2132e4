//! Card content: everything the card says, plus the memory photo path.
//!
//! Defaults carry a complete card so the binary runs with no configuration;
//! a TOML overlay replaces only the fields it names.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("malformed card script: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid card script: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardScript {
    /// Name spelled out character by character during the intro.
    pub recipient: String,
    pub memory_caption: String,
    pub question: String,
    pub proposal_note: String,
    pub affirm_label: String,
    pub decline_label: String,
    pub success_title: String,
    pub success_note: String,
    /// Photo shown during the memory stage. Existence and format are not
    /// checked here; a broken path degrades to a placeholder at render time.
    pub image_path: PathBuf,
}

impl Default for CardScript {
    fn default() -> Self {
        Self {
            recipient: "Kittu".to_string(),
            memory_caption: "You light up my world...".to_string(),
            question: "Will you be my Valentine?".to_string(),
            proposal_note: "Walking through life with you is my favorite adventure.".to_string(),
            affirm_label: "Yes! \u{2764}".to_string(),
            decline_label: "No".to_string(),
            success_title: "Yay! I Love You! \u{2764}".to_string(),
            success_note: "See you on the 14th!".to_string(),
            image_path: PathBuf::from("memory.jpeg"),
        }
    }
}

/// Overlay parsed from `card.toml`; unset fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptOverlay {
    pub recipient: Option<String>,
    pub memory_caption: Option<String>,
    pub question: Option<String>,
    pub proposal_note: Option<String>,
    pub affirm_label: Option<String>,
    pub decline_label: Option<String>,
    pub success_title: Option<String>,
    pub success_note: Option<String>,
    pub image_path: Option<PathBuf>,
}

impl CardScript {
    pub fn apply_overlay(&mut self, overlay: ScriptOverlay) {
        let ScriptOverlay {
            recipient,
            memory_caption,
            question,
            proposal_note,
            affirm_label,
            decline_label,
            success_title,
            success_note,
            image_path,
        } = overlay;
        if let Some(v) = recipient {
            self.recipient = v;
        }
        if let Some(v) = memory_caption {
            self.memory_caption = v;
        }
        if let Some(v) = question {
            self.question = v;
        }
        if let Some(v) = proposal_note {
            self.proposal_note = v;
        }
        if let Some(v) = affirm_label {
            self.affirm_label = v;
        }
        if let Some(v) = decline_label {
            self.decline_label = v;
        }
        if let Some(v) = success_title {
            self.success_title = v;
        }
        if let Some(v) = success_note {
            self.success_note = v;
        }
        if let Some(v) = image_path {
            self.image_path = v;
        }
    }

    /// Defaults overlaid with `raw`, validated.
    pub fn from_toml_str(raw: &str) -> Result<Self, ScriptError> {
        let overlay: ScriptOverlay = toml::from_str(raw)?;
        let mut script = Self::default();
        script.apply_overlay(overlay);
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.recipient.trim().is_empty() {
            return Err(ScriptError::Invalid("recipient must not be empty".into()));
        }
        if self.recipient.chars().count() > 24 {
            return Err(ScriptError::Invalid(
                "recipient must be at most 24 characters".into(),
            ));
        }
        if self.affirm_label.trim().is_empty() || self.decline_label.trim().is_empty() {
            return Err(ScriptError::Invalid(
                "proposal control labels must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Characters animated one by one during the intro.
    pub fn intro_chars(&self) -> Vec<char> {
        self.recipient.chars().collect()
    }
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
