//! Settings documents: the JSON files profile fragments are read from.
//!
//! A document may be a single bare profile object, an array of profile
//! objects, `{"profiles": [...]}`, or
//! `{"profiles": {"defaults": {...}, "list": [...]}}`. Only the object forms
//! with a `profiles` key carry [`LoaderOptions`] at their top level.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const PROFILES_KEY: &str = "profiles";
const DEFAULTS_KEY: &str = "defaults";
const LIST_KEY: &str = "list";

/// Errors for settings documents that cannot be split into fragments
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    UnexpectedShape(String),
}

/// Options read from the top level of the user settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Dynamic fragments whose `source` is listed here are skipped
    #[serde(default)]
    pub disabled_profile_sources: Vec<String>,

    /// Whether `profiles.defaults` becomes the implicit last parent of every profile
    #[serde(default = "default_apply_profile_defaults")]
    pub apply_profile_defaults: bool,
}

fn default_apply_profile_defaults() -> bool {
    true
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            disabled_profile_sources: Vec::new(),
            apply_profile_defaults: default_apply_profile_defaults(),
        }
    }
}

impl LoaderOptions {
    pub fn is_source_disabled(&self, source: &str) -> bool {
        self.disabled_profile_sources.iter().any(|s| s == source)
    }
}

/// One settings document split into its parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    /// Top-level options, if the document had any
    pub options: Option<LoaderOptions>,

    /// The `profiles.defaults` object
    pub defaults: Option<Value>,

    /// Profile fragments in document order
    pub profiles: Vec<Value>,
}

impl SettingsDocument {
    /// Parse document text
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Split an already parsed document
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Array(profiles) => Ok(Self {
                profiles,
                ..Self::default()
            }),
            Value::Object(mut map) => {
                let Some(profiles) = map.remove(PROFILES_KEY) else {
                    return Ok(Self {
                        profiles: vec![Value::Object(map)],
                        ..Self::default()
                    });
                };
                let options = serde_json::from_value(Value::Object(map))?;
                let (defaults, profiles) = split_profiles(profiles)?;
                Ok(Self {
                    options: Some(options),
                    defaults,
                    profiles,
                })
            }
            other => Err(DocumentError::UnexpectedShape(format!(
                "expected an object or an array, found {other}"
            ))),
        }
    }

    /// Read and parse a document from disk
    pub fn load_file(path: &Path) -> Result<Self> {
        crate::debug_info!("SETTINGS", "Loading settings document {:?}", path);
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        if contents.trim().is_empty() {
            crate::debug_info!("SETTINGS", "Settings document {:?} is empty", path);
            return Ok(Self::default());
        }

        let document = Self::parse(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;
        crate::debug_info!(
            "SETTINGS",
            "Parsed {} profile fragments from {:?}",
            document.profiles.len(),
            path
        );
        Ok(document)
    }
}

fn split_profiles(profiles: Value) -> Result<(Option<Value>, Vec<Value>), DocumentError> {
    match profiles {
        Value::Array(list) => Ok((None, list)),
        Value::Object(mut map) => {
            let defaults = map.remove(DEFAULTS_KEY);
            let list = match map.remove(LIST_KEY) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(list)) => list,
                Some(other) => {
                    return Err(DocumentError::UnexpectedShape(format!(
                        "'profiles.list' must be an array, found {other}"
                    )));
                }
            };
            Ok((defaults, list))
        }
        other => Err(DocumentError::UnexpectedShape(format!(
            "'profiles' must be an array or an object, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_profile_object() {
        let doc = SettingsDocument::parse(r#"{"name": "Solo"}"#).unwrap();
        assert_eq!(doc.profiles, vec![json!({"name": "Solo"})]);
        assert!(doc.options.is_none());
        assert!(doc.defaults.is_none());
    }

    #[test]
    fn test_profile_array() {
        let doc = SettingsDocument::parse(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(doc.profiles.len(), 2);
    }

    #[test]
    fn test_profiles_list_with_options() {
        let doc = SettingsDocument::parse(
            r#"{
                "disabledProfileSources": ["Ext1"],
                "applyProfileDefaults": false,
                "profiles": [{"name": "A"}]
            }"#,
        )
        .unwrap();
        let options = doc.options.unwrap();
        assert_eq!(options.disabled_profile_sources, vec!["Ext1"]);
        assert!(!options.apply_profile_defaults);
        assert!(options.is_source_disabled("Ext1"));
        assert!(!options.is_source_disabled("Ext2"));
    }

    #[test]
    fn test_profiles_object_with_defaults() {
        let doc = SettingsDocument::parse(
            r#"{"profiles": {"defaults": {"fontSize": 14}, "list": [{"name": "A"}]}}"#,
        )
        .unwrap();
        assert_eq!(doc.defaults, Some(json!({"fontSize": 14})));
        assert_eq!(doc.profiles, vec![json!({"name": "A"})]);
        assert_eq!(doc.options, Some(LoaderOptions::default()));
    }

    #[test]
    fn test_options_default_when_absent() {
        let options: LoaderOptions = serde_json::from_str("{}").unwrap();
        assert!(options.apply_profile_defaults);
        assert!(options.disabled_profile_sources.is_empty());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            SettingsDocument::parse("42"),
            Err(DocumentError::UnexpectedShape(_))
        ));
        assert!(matches!(
            SettingsDocument::parse(r#"{"profiles": "nope"}"#),
            Err(DocumentError::UnexpectedShape(_))
        ));
        assert!(matches!(
            SettingsDocument::parse(r#"{"profiles": {"list": {}}}"#),
            Err(DocumentError::UnexpectedShape(_))
        ));
        assert!(matches!(
            SettingsDocument::parse("{not json"),
            Err(DocumentError::InvalidJson(_))
        ));
    }
}
