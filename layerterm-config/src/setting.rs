//! Sparse per-field overrides.
//!
//! A [`Setting`] is either unset (inherit from parents, then the hard default)
//! or explicitly set. "Set to zero/false/empty" is a distinct state from
//! "unset", so no sentinel values are ever needed.

/// A single optional override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// Not set at this layer; resolution continues to the parents.
    #[default]
    Unset,
    /// Explicitly set at this layer.
    Set(T),
}

impl<T> Setting<T> {
    /// The explicit value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Setting::Set(value) => Some(value),
            Setting::Unset => None,
        }
    }

    /// Override the value. Later calls win.
    pub fn set(&mut self, value: T) {
        *self = Setting::Set(value);
    }

    /// Return to the unset (inherit) state.
    pub fn clear(&mut self) {
        *self = Setting::Unset;
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Setting::Set(_))
    }

    /// Move the explicit value out, leaving the setting unset.
    pub fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Setting::Set(value) => Some(value),
            Setting::Unset => None,
        }
    }
}

impl<T: Clone> Setting<T> {
    /// The explicit value, or `default` when unset.
    pub fn get_or(&self, default: T) -> T {
        self.get().cloned().unwrap_or(default)
    }
}

impl<T> From<Option<T>> for Setting<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Setting::Set(value),
            None => Setting::Unset,
        }
    }
}
