//! Profile types and collection for terminal session configurations.
//!
//! ## Sub-modules
//!
//! - [`keys`]: JSON key names of the profile schema
//! - [`origin`]: Runtime `ProfileOrigin` enum, which tracks how a profile entered the collection
//! - [`values`]: Typed setting values and their JSON conversions
//! - [`profile`]: Core `Profile` struct, one sparse layer of settings
//! - [`resolved`]: `ResolvedProfile`, a view reading effective values through inheritance
//! - [`json`]: Parsing, layering and sparse serialization of profile fragments
//! - [`collection`]: `ProfileCollection`, which routes fragments and wires parents

pub mod collection;
pub mod json;
pub mod keys;
pub mod origin;
pub mod profile;
pub mod resolved;
pub mod values;

pub use collection::ProfileCollection;
pub use json::is_dynamic_profile_object;
pub use origin::ProfileOrigin;
pub use profile::{Profile, ProfileId};
pub use resolved::{DESKTOP_WALLPAPER, ResolvedProfile};
pub use values::{
    BackgroundImageAlignment, BackgroundImageStretchMode, BellStyle, CloseOnExitMode, Color,
    CursorShape, JsonSetting, ScrollbarState, TextAntialiasingMode,
};
