//! Settings snapshots built from layered profile fragments.
//!
//! - [`document`]: settings document shapes and [`LoaderOptions`]
//! - [`loader`]: phase-ordered [`SettingsLoader`] and [`LoadWarning`]
//! - [`store`]: [`SettingsStore`], which publishes snapshots to readers

pub mod document;
pub mod loader;
pub mod store;

pub use document::{DocumentError, LoaderOptions, SettingsDocument};
pub use loader::{LoadPhase, LoadWarning, SettingsLoader, WarningStage};
pub use store::SettingsStore;

use layerterm_config::ProfileCollection;
use layerterm_config::profile_types::keys;
use serde_json::{Map, Value};

/// One fully loaded and wired set of profiles
#[derive(Debug, Default)]
pub struct Settings {
    profiles: ProfileCollection,
    options: LoaderOptions,
    warnings: Vec<LoadWarning>,
}

impl Settings {
    pub fn new(
        profiles: ProfileCollection,
        options: LoaderOptions,
        warnings: Vec<LoadWarning>,
    ) -> Self {
        Self {
            profiles,
            options,
            warnings,
        }
    }

    pub fn profiles(&self) -> &ProfileCollection {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut ProfileCollection {
        &mut self.profiles
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Fragments skipped and parents left unwired during the load
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Stubs for every generated or fragment profile that none of
    /// `user_docs` layers onto yet.
    ///
    /// Appending these to the user's profile list lets the user hide or
    /// rename a dynamic profile without copying its settings.
    pub fn dynamic_profile_stubs(&self, user_docs: &[Value]) -> Vec<Value> {
        self.profiles
            .profiles_ordered()
            .into_iter()
            .map(|resolved| resolved.profile())
            .filter(|profile| profile.origin().is_dynamic())
            .filter(|profile| !user_docs.iter().any(|doc| profile.should_layer(doc)))
            .map(|profile| profile.generate_stub())
            .collect()
    }

    /// Settings document holding the options, the base defaults and the
    /// sparse form of every profile.
    pub fn to_document(&self) -> Value {
        let mut profiles = Map::new();
        if let Some(base) = self
            .profiles
            .base_defaults()
            .and_then(|node| self.profiles.get(node))
        {
            let mut defaults = base.to_json();
            if let Value::Object(map) = &mut defaults {
                map.remove(keys::GUID);
            }
            profiles.insert("defaults".to_string(), defaults);
        }
        profiles.insert(
            "list".to_string(),
            Value::Array(self.profiles.to_json_fragments()),
        );

        let mut document = match serde_json::to_value(&self.options) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        document.insert("profiles".to_string(), Value::Object(profiles));
        Value::Object(document)
    }

    /// Independent copy for editing; shared parents stay shared in the copy.
    pub fn clone_for_editing(&self) -> Settings {
        Settings {
            profiles: self.profiles.clone_for_editing(),
            options: self.options.clone(),
            warnings: self.warnings.clone(),
        }
    }
}
