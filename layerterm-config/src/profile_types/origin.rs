//! Runtime origin tracking.
//!
//! Records which discovery phase produced a profile's base definition. This is
//! never written to settings files; it exists only while the settings are
//! loaded.

/// Where a profile's base definition came from (runtime-only, not persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileOrigin {
    /// Authored by the user
    #[default]
    Custom,
    /// Shipped with the application defaults
    BuiltIn,
    /// Contributed by a dynamic profile generator (fragment carries a `source`)
    Generated,
    /// Contributed by a dynamic fragment without a `source`
    Fragment,
}

impl ProfileOrigin {
    /// Returns true if this profile is re-discovered on every load rather than
    /// authored by the user or shipped as a default
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ProfileOrigin::Generated | ProfileOrigin::Fragment)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileOrigin::Custom => "Custom",
            ProfileOrigin::BuiltIn => "Built-in",
            ProfileOrigin::Generated => "Generated",
            ProfileOrigin::Fragment => "Fragment",
        }
    }
}
