//! Typed error variants for the layerterm-config crate.
//!
//! Every fallible operation of the profile model returns [`ProfileError`].
//! None of these are fatal: the caller decides whether to skip the offending
//! fragment, fall back to defaults, or abort the whole load.

use thiserror::Error;

use crate::profile_types::ProfileId;

/// Errors produced while parsing, layering or wiring profiles.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    /// The document is not a JSON object where one is required, or it cannot
    /// be routed unambiguously to a single profile.
    #[error("malformed profile document: {context}")]
    MalformedDocument {
        /// What was wrong with the document.
        context: String,
    },

    /// A recognized field is present but cannot be coerced to its type.
    #[error("invalid value for field '{field}' ({value}): {reason}")]
    InvalidFieldValue {
        /// JSON key of the offending field.
        field: String,
        /// The offending value, rendered as compact JSON.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A layering step tried to replace an already-assigned identity.
    #[error("identity conflict: profile {existing} cannot be re-layered as {incoming}")]
    IdentityConflict {
        existing: ProfileId,
        incoming: ProfileId,
    },

    /// A declared parent does not name any known profile.
    #[error("profile {profile} declares unknown parent {parent}")]
    UnresolvedParent {
        profile: ProfileId,
        parent: ProfileId,
    },
}

impl ProfileError {
    /// Creates a malformed document error.
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedDocument {
            context: context.into(),
        }
    }

    /// Creates an invalid field error, rendering `value` as compact JSON.
    pub fn invalid_field(
        field: impl Into<String>,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the field this error is about, when it concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidFieldValue { field, .. } => Some(field),
            _ => None,
        }
    }
}
