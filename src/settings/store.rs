//! Lock-free publication of settings snapshots.
//!
//! Readers take an `Arc<Settings>` and keep reading it for as long as they
//! like. The single writer builds a complete new snapshot off to the side and
//! swaps it in; a published snapshot is never mutated.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::Settings;

/// Holds the current settings snapshot
#[derive(Debug)]
pub struct SettingsStore {
    current: ArcSwap<Settings>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: ArcSwap::from_pointee(settings),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.load_full()
    }

    /// Replace the current snapshot, returning the previous one
    pub fn publish(&self, settings: Settings) -> Arc<Settings> {
        crate::debug_info!(
            "SETTINGS",
            "Publishing settings snapshot with {} profiles",
            settings.profiles().len()
        );
        self.current.swap(Arc::new(settings))
    }

    /// Clone the current snapshot, let `edit` change the copy, then publish it.
    pub fn edit<F>(&self, edit: F) -> Arc<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut copy = self.current.load().clone_for_editing();
        edit(&mut copy);
        self.publish(copy);
        self.snapshot()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
