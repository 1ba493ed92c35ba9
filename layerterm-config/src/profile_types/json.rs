//! JSON codec for profiles.
//!
//! Profiles are assembled from sparse fragments: every fragment only records
//! the fields someone explicitly set, and serialization writes back exactly
//! those fields. Inherited and defaulted values never appear in the output,
//! which keeps repeated load/save cycles stable.

use serde_json::{Map, Value};

use super::keys;
use super::profile::{Profile, ProfileFragment};
use crate::error::ProfileError;
use crate::identity::{self, explicit_guid, generate_guid, identity_pair};

fn as_object(doc: &Value) -> Result<&Map<String, Value>, ProfileError> {
    doc.as_object().ok_or_else(|| {
        ProfileError::malformed(format!(
            "expected a profile object, found {}",
            json_kind(doc)
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True if `doc` came from a dynamic profile generator rather than the user,
/// which is signalled by a `source` tag.
pub fn is_dynamic_profile_object(doc: &Value) -> bool {
    doc.get(keys::SOURCE).is_some_and(|source| !source.is_null())
}

impl Profile {
    /// Build a new profile from a single fragment.
    ///
    /// The identifier comes from the fragment's `guid`, or is generated from
    /// its `name` and `source` when absent.
    pub fn from_json(doc: &Value) -> Result<Self, ProfileError> {
        let map = as_object(doc)?;
        let (name, source) = identity_pair(doc);
        let mut profile = Profile::blank(generate_guid(name, source));
        if let Some(guid) = explicit_guid(doc) {
            profile.guid.set(guid);
        }
        profile.layer_fragment(ProfileFragment::parse(map)?)?;
        Ok(profile)
    }

    /// Decide whether `doc` describes this same logical profile.
    ///
    /// With a `guid`, it must equal this profile's identifier. Without one,
    /// the identifier generated from the fragment's name and source must equal
    /// it, so a user fragment can refine a generated profile without knowing
    /// its id. When both sides carry a non-empty `source`, they must agree.
    pub fn should_layer(&self, doc: &Value) -> bool {
        if !doc.is_object() {
            return false;
        }
        match explicit_guid(doc) {
            Some(guid) => {
                if guid != self.guid() {
                    return false;
                }
            }
            None => {
                let (name, source) = identity_pair(doc);
                if generate_guid(name, source) != self.guid() {
                    return false;
                }
            }
        }

        let Some(other_source) = doc.get(keys::SOURCE).and_then(Value::as_str) else {
            return true;
        };
        match (self.own_source().is_empty(), other_source.is_empty()) {
            (false, false) => other_source == self.own_source(),
            (true, true) => true,
            _ => false,
        }
    }

    /// Apply every recognized field of `doc` on top of this profile.
    ///
    /// The fragment is validated as a whole first; on any error nothing is
    /// changed. A `guid` that differs from this profile's identifier is an
    /// [`ProfileError::IdentityConflict`].
    pub fn layer_json(&mut self, doc: &Value) -> Result<(), ProfileError> {
        let map = as_object(doc)?;
        self.layer_fragment(ProfileFragment::parse(map)?)
    }

    fn layer_fragment(&mut self, fragment: ProfileFragment) -> Result<(), ProfileError> {
        if let Some(incoming) = fragment.guid
            && incoming != self.guid()
        {
            return Err(ProfileError::IdentityConflict {
                existing: self.guid(),
                incoming,
            });
        }
        self.apply(fragment);
        Ok(())
    }

    /// Serialize the identifier plus every explicitly set field.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            keys::GUID.to_string(),
            Value::String(identity::format_guid(&self.guid())),
        );
        if let Some(parents) = self.parents.get() {
            map.insert(
                keys::PARENTS.to_string(),
                Value::Array(
                    parents
                        .iter()
                        .map(|guid| Value::String(identity::format_guid(guid)))
                        .collect(),
                ),
            );
        }
        self.write_settings(&mut map);
        Value::Object(map)
    }

    /// The smallest fragment that re-identifies this profile: identifier,
    /// name, source (when present) and hidden flag.
    pub fn generate_stub(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            keys::GUID.to_string(),
            Value::String(identity::format_guid(&self.guid())),
        );
        map.insert(
            keys::NAME.to_string(),
            Value::String(self.own_name().to_string()),
        );
        if !self.own_source().is_empty() {
            map.insert(
                keys::SOURCE.to_string(),
                Value::String(self.own_source().to_string()),
            );
        }
        map.insert(keys::HIDDEN.to_string(), Value::Bool(self.own_hidden()));
        Value::Object(map)
    }
}
