//! Profile configuration engine for the layerterm terminal.
//!
//! This crate models terminal profiles as sparse layers of settings. It
//! includes:
//!
//! - `Setting<T>` overrides that distinguish "unset" from any stored value
//! - An arena-backed inheritance graph with cycle-safe resolution
//! - Stable identifiers generated from a profile's name and source
//! - JSON layering of profile fragments with atomic validation
//! - A profile collection that routes fragments and wires parents
//! - Path expansion for starting directories and background images

pub mod defaults;
pub mod error;
pub mod identity;
pub mod inheritance;
pub mod paths;
pub mod profile_types;
pub mod setting;

pub use error::ProfileError;
pub use identity::{RUNTIME_GENERATED_PROFILE_NAMESPACE, format_guid, generate_guid, parse_guid};
pub use inheritance::{CloneMap, InheritanceGraph, NodeId};
pub use paths::expand_path;
pub use profile_types::{
    Color, Profile, ProfileCollection, ProfileId, ProfileOrigin, ResolvedProfile,
    is_dynamic_profile_object,
};
pub use setting::Setting;
