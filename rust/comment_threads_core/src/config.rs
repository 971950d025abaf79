//! Controller configuration, read from JSON.

use serde::Deserialize;

use crate::error::CommentError;
use crate::thread::CollapsibleState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub id: String,
    pub label: String,
    /// Author name attached to replies.
    pub default_author: String,
    pub expand_new_threads: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            id: "SampleCommentController".to_string(),
            label: "Sample Comments".to_string(),
            default_author: "Anonymous".to_string(),
            expand_new_threads: true,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, CommentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn initial_state(&self) -> CollapsibleState {
        if self.expand_new_threads {
            CollapsibleState::Expanded
        } else {
            CollapsibleState::Collapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = ControllerConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ControllerConfig::default());
        assert_eq!(cfg.default_author, "Anonymous");
        assert_eq!(cfg.initial_state(), CollapsibleState::Expanded);
    }

    #[test]
    fn partial_override() {
        let cfg = ControllerConfig::from_json(r#"{"default_author":"Reviewer","expand_new_threads":false}"#).unwrap();
        assert_eq!(cfg.default_author, "Reviewer");
        assert_eq!(cfg.label, "Sample Comments");
        assert_eq!(cfg.initial_state(), CollapsibleState::Collapsed);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = ControllerConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, CommentError::Config(_)));
        assert!(!err.is_missing_target());
    }
}
