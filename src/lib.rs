// Library exports for testing and potential library use
//
// The profile model itself lives in the `layerterm-config` crate. This crate
// adds phase-ordered loading of settings documents, snapshot publication and
// the command-line front end.
//
// Concurrency: loading and editing happen on one owning thread. Finished
// snapshots are published through `settings::SettingsStore` (arc-swap) and
// are never mutated afterwards, so readers need no locks. The only mutex is
// the `parking_lot::Mutex` guarding the debug log file.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod settings;

pub use layerterm_config as config;
pub use settings::{
    LoadPhase, LoadWarning, LoaderOptions, Settings, SettingsDocument, SettingsLoader,
    SettingsStore, WarningStage,
};
