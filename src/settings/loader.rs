//! Phase-ordered settings loading.
//!
//! Fragments are collected per discovery phase and applied in phase order
//! (defaults, then user, then dynamic), keeping insertion order inside each
//! phase. A fragment that fails to parse or layer is skipped and reported as
//! a [`LoadWarning`]; nothing here aborts the whole load.

use std::fmt;

use layerterm_config::profile_types::{ProfileCollection, ProfileOrigin, keys};
use layerterm_config::{ProfileError, is_dynamic_profile_object};
use serde_json::Value;
use thiserror::Error;

use super::Settings;
use super::document::{LoaderOptions, SettingsDocument};

/// Discovery phase a fragment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadPhase {
    /// Built-in profiles shipped with the application
    Defaults,
    /// Fragments from the user's settings file
    User,
    /// Fragments discovered at runtime (generators and extensions)
    Dynamic,
}

impl LoadPhase {
    /// Origin given to a profile first created by `doc` in this phase
    pub fn origin_for(self, doc: &Value) -> ProfileOrigin {
        match self {
            LoadPhase::Defaults => ProfileOrigin::BuiltIn,
            LoadPhase::User => ProfileOrigin::Custom,
            LoadPhase::Dynamic if is_dynamic_profile_object(doc) => ProfileOrigin::Generated,
            LoadPhase::Dynamic => ProfileOrigin::Fragment,
        }
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadPhase::Defaults => "defaults",
            LoadPhase::User => "user",
            LoadPhase::Dynamic => "dynamic",
        })
    }
}

/// Where in a load a warning was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningStage {
    /// While applying a fragment of this phase
    Fragment(LoadPhase),
    /// While applying a `profiles.defaults` object of this phase
    BaseDefaults(LoadPhase),
    /// While wiring parents after every fragment was applied
    Wiring,
}

impl fmt::Display for WarningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningStage::Fragment(phase) => write!(f, "{phase}"),
            WarningStage::BaseDefaults(phase) => write!(f, "{phase} profile defaults"),
            WarningStage::Wiring => f.write_str("wiring"),
        }
    }
}

/// A non-fatal problem found while loading
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{stage} #{index}: {error}")]
pub struct LoadWarning {
    pub stage: WarningStage,
    /// Index within the stage's phase, or display position for wiring warnings
    pub index: usize,
    pub error: ProfileError,
}

/// Collects fragments and builds a [`Settings`] snapshot
#[derive(Debug, Default)]
pub struct SettingsLoader {
    options: LoaderOptions,
    base_defaults: Vec<(LoadPhase, Value)>,
    fragments: Vec<(LoadPhase, Value)>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoaderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LoaderOptions) {
        self.options = options;
    }

    /// Queue one profile fragment
    pub fn add_fragment(&mut self, phase: LoadPhase, doc: Value) -> &mut Self {
        self.fragments.push((phase, doc));
        self
    }

    /// Queue several fragments of the same phase
    pub fn add_fragments(
        &mut self,
        phase: LoadPhase,
        docs: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.fragments
            .extend(docs.into_iter().map(|doc| (phase, doc)));
        self
    }

    /// Queue an object for the implicit base-defaults parent
    pub fn add_base_defaults(&mut self, phase: LoadPhase, doc: Value) -> &mut Self {
        self.base_defaults.push((phase, doc));
        self
    }

    /// Queue every part of a settings document.
    ///
    /// Options are only taken from user documents.
    pub fn add_document(&mut self, phase: LoadPhase, document: SettingsDocument) -> &mut Self {
        if phase == LoadPhase::User
            && let Some(options) = document.options
        {
            self.options = options;
        }
        if let Some(defaults) = document.defaults {
            self.base_defaults.push((phase, defaults));
        }
        self.add_fragments(phase, document.profiles)
    }

    /// Apply everything queued and wire the inheritance graph.
    pub fn load(self) -> Settings {
        let SettingsLoader {
            options,
            mut base_defaults,
            mut fragments,
        } = self;
        let mut profiles = ProfileCollection::new();
        let mut warnings = Vec::new();

        // Stable: insertion order is kept inside a phase
        base_defaults.sort_by_key(|(phase, _)| *phase);
        fragments.sort_by_key(|(phase, _)| *phase);

        let mut current_phase = None;
        let mut index = 0;
        for (phase, doc) in &base_defaults {
            if current_phase != Some(*phase) {
                current_phase = Some(*phase);
                index = 0;
            }
            if let Err(error) = profiles.set_base_defaults(doc) {
                log::warn!("Skipping {phase} profile defaults #{index}: {error}");
                warnings.push(LoadWarning {
                    stage: WarningStage::BaseDefaults(*phase),
                    index,
                    error,
                });
            }
            index += 1;
        }

        current_phase = None;
        index = 0;
        for (phase, doc) in &fragments {
            if current_phase != Some(*phase) {
                current_phase = Some(*phase);
                index = 0;
                crate::debug_log!("SETTINGS", "Applying {} fragments", phase);
            }
            apply_fragment(&mut profiles, &options, *phase, index, doc, &mut warnings);
            index += 1;
        }

        for error in profiles.wire_parents(options.apply_profile_defaults) {
            let index = match &error {
                ProfileError::UnresolvedParent { profile, .. } => profiles
                    .ids()
                    .position(|node| profiles.get(node).is_some_and(|p| p.guid() == *profile))
                    .unwrap_or_default(),
                _ => 0,
            };
            warnings.push(LoadWarning {
                stage: WarningStage::Wiring,
                index,
                error,
            });
        }

        crate::debug_info!(
            "SETTINGS",
            "Loaded {} profiles with {} warnings",
            profiles.len(),
            warnings.len()
        );
        Settings::new(profiles, options, warnings)
    }
}

fn apply_fragment(
    profiles: &mut ProfileCollection,
    options: &LoaderOptions,
    phase: LoadPhase,
    index: usize,
    doc: &Value,
    warnings: &mut Vec<LoadWarning>,
) {
    if phase == LoadPhase::Dynamic
        && let Some(source) = doc.get(keys::SOURCE).and_then(Value::as_str)
        && options.is_source_disabled(source)
    {
        log::debug!("Skipping {phase} fragment #{index}: source '{source}' is disabled");
        return;
    }

    match profiles.layer_fragment(doc, phase.origin_for(doc)) {
        Ok(node) => {
            crate::debug_trace!("SETTINGS", "{} fragment #{} -> node {}", phase, index, node.index());
        }
        Err(error) => {
            log::warn!("Skipping {phase} fragment #{index}: {error}");
            warnings.push(LoadWarning {
                stage: WarningStage::Fragment(phase),
                index,
                error,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phase_origins() {
        let generated = json!({"name": "Foo", "source": "Ext1"});
        let plain = json!({"name": "Foo"});
        assert_eq!(LoadPhase::Defaults.origin_for(&plain), ProfileOrigin::BuiltIn);
        assert_eq!(LoadPhase::User.origin_for(&generated), ProfileOrigin::Custom);
        assert_eq!(LoadPhase::Dynamic.origin_for(&generated), ProfileOrigin::Generated);
        assert_eq!(LoadPhase::Dynamic.origin_for(&plain), ProfileOrigin::Fragment);
    }

    #[test]
    fn test_phases_apply_in_order() {
        let mut loader = SettingsLoader::new();
        loader
            .add_fragment(LoadPhase::Dynamic, json!({"name": "Foo", "source": "Ext1", "fontSize": 20}))
            .add_fragment(LoadPhase::User, json!({"name": "Foo", "source": "Ext1", "fontSize": 11}))
            .add_fragment(LoadPhase::Defaults, json!({"name": "Foo", "source": "Ext1", "fontSize": 9}));
        let settings = loader.load();

        assert_eq!(settings.profiles().len(), 1);
        let profile = settings.profiles().find_by_name("Foo").unwrap();
        assert_eq!(profile.font_size(), 20);
        assert_eq!(profile.origin(), ProfileOrigin::BuiltIn);
        assert!(settings.warnings().is_empty());
    }

    #[test]
    fn test_user_fragment_hides_generated_profile() {
        let mut loader = SettingsLoader::new();
        loader.add_fragment(LoadPhase::User, json!({"name": "Foo", "source": "Ext1", "hidden": true}));
        loader.add_fragment(LoadPhase::Dynamic, json!({"name": "Foo", "source": "Ext1"}));
        let settings = loader.load();

        assert_eq!(settings.profiles().len(), 1);
        assert!(settings.profiles().visible_profiles().is_empty());
        let profile = settings.profiles().find_by_name("Foo").unwrap();
        assert_eq!(profile.origin(), ProfileOrigin::Custom);
    }

    #[test]
    fn test_bad_fragment_becomes_warning() {
        let mut loader = SettingsLoader::new();
        loader.add_fragments(
            LoadPhase::User,
            vec![
                json!({"name": "Good"}),
                json!({"name": "Bad", "fontSize": "huge"}),
                json!("not an object"),
            ],
        );
        let settings = loader.load();

        assert_eq!(settings.profiles().len(), 1);
        let indices: Vec<usize> = settings.warnings().iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(settings.warnings()[0].error.field(), Some("fontSize"));
        assert!(matches!(
            settings.warnings()[1].error,
            ProfileError::MalformedDocument { .. }
        ));
    }

    #[test]
    fn test_disabled_source_is_skipped() {
        let options = LoaderOptions {
            disabled_profile_sources: vec!["Ext1".to_string()],
            ..LoaderOptions::default()
        };
        let mut loader = SettingsLoader::with_options(options);
        loader
            .add_fragment(LoadPhase::Dynamic, json!({"name": "Foo", "source": "Ext1"}))
            .add_fragment(LoadPhase::Dynamic, json!({"name": "Bar", "source": "Ext2"}));
        let settings = loader.load();

        assert_eq!(settings.profiles().len(), 1);
        assert!(settings.profiles().find_by_name("Bar").is_some());
        assert!(settings.warnings().is_empty());
    }

    #[test]
    fn test_unresolved_parent_warning() {
        let mut loader = SettingsLoader::new();
        loader.add_fragments(
            LoadPhase::User,
            vec![
                json!({"name": "First"}),
                json!({"name": "Child", "parents": ["{00000000-0000-4000-8000-0000000000ff}"]}),
            ],
        );
        let settings = loader.load();

        assert_eq!(settings.warnings().len(), 1);
        let warning = &settings.warnings()[0];
        assert_eq!(warning.stage, WarningStage::Wiring);
        assert_eq!(warning.index, 1);
        assert!(matches!(warning.error, ProfileError::UnresolvedParent { .. }));
    }

    #[test]
    fn test_document_options_and_defaults() {
        let document = SettingsDocument::parse(
            r#"{
                "applyProfileDefaults": true,
                "profiles": {
                    "defaults": {"fontFace": "Fira Code"},
                    "list": [{"name": "A"}, {"name": "B", "fontFace": "Hack"}]
                }
            }"#,
        )
        .unwrap();
        let mut loader = SettingsLoader::new();
        loader.add_document(LoadPhase::User, document);
        let settings = loader.load();

        let a = settings.profiles().find_by_name("A").unwrap();
        let b = settings.profiles().find_by_name("B").unwrap();
        assert_eq!(a.font_face(), "Fira Code");
        assert_eq!(b.font_face(), "Hack");
    }

    #[test]
    fn test_warning_display() {
        let warning = LoadWarning {
            stage: WarningStage::Fragment(LoadPhase::User),
            index: 3,
            error: ProfileError::malformed("expected a profile object"),
        };
        assert!(warning.to_string().starts_with("user #3: "));
    }

    #[test]
    fn test_profile_defaults_follow_phase_order() {
        let user = SettingsDocument::parse(
            r#"{"profiles": {"defaults": {"fontSize": 20}, "list": [{"name": "A"}]}}"#,
        )
        .unwrap();
        let built_in =
            SettingsDocument::parse(r#"{"profiles": {"defaults": {"fontSize": 10}}}"#).unwrap();

        let mut loader = SettingsLoader::new();
        loader
            .add_document(LoadPhase::User, user)
            .add_document(LoadPhase::Defaults, built_in);
        let settings = loader.load();

        assert_eq!(settings.profiles().find_by_name("A").unwrap().font_size(), 20);
    }

    #[test]
    fn test_profile_defaults_keep_insertion_order_within_phase() {
        let mut loader = SettingsLoader::new();
        loader
            .add_base_defaults(LoadPhase::Dynamic, json!({"fontSize": 30}))
            .add_base_defaults(LoadPhase::User, json!({"fontSize": 14, "fontFace": "Hack"}))
            .add_base_defaults(LoadPhase::User, json!({"fontSize": 16}))
            .add_fragment(LoadPhase::User, json!({"name": "A"}));
        let settings = loader.load();

        let a = settings.profiles().find_by_name("A").unwrap();
        assert_eq!(a.font_size(), 30);
        assert_eq!(a.font_face(), "Hack");
    }

    #[test]
    fn test_bad_profile_defaults_warning_stage() {
        let mut loader = SettingsLoader::new();
        loader
            .add_base_defaults(LoadPhase::User, json!({"fontSize": 12}))
            .add_base_defaults(LoadPhase::User, json!({"fontSize": 0}));
        let settings = loader.load();

        assert_eq!(settings.warnings().len(), 1);
        let warning = &settings.warnings()[0];
        assert_eq!(warning.stage, WarningStage::BaseDefaults(LoadPhase::User));
        assert_eq!(warning.index, 1);
        assert!(warning.to_string().starts_with("user profile defaults #1: "));
    }

    #[test]
    fn test_wiring_is_not_a_discovery_phase() {
        assert!(LoadPhase::Defaults < LoadPhase::User);
        assert!(LoadPhase::User < LoadPhase::Dynamic);
        assert_eq!(WarningStage::Wiring.to_string(), "wiring");
        assert_eq!(WarningStage::Fragment(LoadPhase::Dynamic).to_string(), "dynamic");
    }
}
