//! Core `Profile` struct: identity plus one sparse override per setting.
//!
//! The schema is declared once in [`profile_settings!`], which expands to the
//! struct itself, the staged fragment used while parsing JSON, the sparse
//! serializer, and the resolving accessors on [`ResolvedProfile`].

use serde_json::{Map, Value};

use super::keys;
use super::origin::ProfileOrigin;
use super::resolved::ResolvedProfile;
use super::values::{
    BackgroundImageAlignment, BackgroundImageStretchMode, BellStyle, CloseOnExitMode, Color,
    CursorShape, JsonSetting, ScrollbarState, TextAntialiasingMode,
};
use crate::defaults;
use crate::error::ProfileError;
use crate::identity::{self, generate_guid};
use crate::setting::Setting;

/// Unique identifier for a profile
pub type ProfileId = uuid::Uuid;

macro_rules! profile_settings {
    ($(
        $(#[$meta:meta])*
        $field:ident: $ty:ty = $default:expr, $key:expr $(, check = $check:expr)?;
    )*) => {
        /// A terminal session profile.
        ///
        /// Every setting is a [`Setting`]: unset means "inherit from the parent
        /// profiles, then the hard default". Read effective values through
        /// [`ResolvedProfile`], never by unwrapping a setting directly.
        #[derive(Debug, Clone, PartialEq)]
        pub struct Profile {
            /// Explicit identifier, if one was ever layered
            pub(crate) guid: Setting<ProfileId>,
            /// Identifier derived from name and source when the profile was created
            pub(crate) generated_guid: ProfileId,
            pub(crate) origin: ProfileOrigin,
            /// Declared parent profiles, wired into the graph by identifier
            pub parents: Setting<Vec<ProfileId>>,
            $( $(#[$meta])* pub $field: Setting<$ty>, )*
        }

        impl Profile {
            /// JSON keys of every inheritable setting, in schema order.
            pub const SETTING_KEYS: &'static [&'static str] = &[$($key),*];

            pub(crate) fn blank(generated_guid: ProfileId) -> Self {
                Self {
                    guid: Setting::Unset,
                    generated_guid,
                    origin: ProfileOrigin::default(),
                    parents: Setting::Unset,
                    $( $field: Setting::Unset, )*
                }
            }

            pub(crate) fn apply(&mut self, fragment: ProfileFragment) {
                if let Some(guid) = fragment.guid {
                    self.guid.set(guid);
                }
                if let Some(parents) = fragment.parents {
                    self.parents.set(parents);
                }
                $(
                    if let Some(value) = fragment.$field {
                        self.$field.set(value);
                    }
                )*
            }

            pub(crate) fn write_settings(&self, map: &mut Map<String, Value>) {
                $(
                    if let Some(value) = self.$field.get() {
                        map.insert($key.to_string(), value.to_json());
                    }
                )*
            }

            /// Number of settings explicitly set on this layer.
            pub fn explicit_setting_count(&self) -> usize {
                [$( self.$field.is_set() ),*].into_iter().filter(|set| *set).count()
            }
        }

        /// A parsed and validated JSON fragment, staged before it touches a profile.
        #[derive(Debug, Default)]
        pub(crate) struct ProfileFragment {
            pub(crate) guid: Option<ProfileId>,
            pub(crate) parents: Option<Vec<ProfileId>>,
            $( pub(crate) $field: Option<$ty>, )*
        }

        impl ProfileFragment {
            /// Parse every recognized key of `map`. Unknown keys are ignored.
            pub(crate) fn parse(map: &Map<String, Value>) -> Result<Self, ProfileError> {
                let mut fragment = Self::default();
                if let Some(value) = map.get(keys::GUID) {
                    fragment.guid = Some(parse_guid_value(keys::GUID, value)?);
                }
                if let Some(value) = map.get(keys::PARENTS) {
                    fragment.parents = Some(parse_parents(value)?);
                }
                $(
                    if let Some(value) = map.get($key).filter(|value| !is_absent($key, value)) {
                        let parsed = <$ty as JsonSetting>::from_json($key, value)?;
                        $(
                            ($check)(&parsed)
                                .map_err(|reason| ProfileError::invalid_field($key, value, reason))?;
                        )?
                        fragment.$field = Some(parsed);
                    }
                )*
                Ok(fragment)
            }
        }

        impl ResolvedProfile<'_> {
            $(
                $(#[$meta])*
                pub fn $field(&self) -> $ty {
                    self.graph
                        .resolve(self.node, |profile| profile.$field.get())
                        .cloned()
                        .unwrap_or_else(|| $default)
                }
            )*

            /// Identifier plus the effective value of every setting.
            pub fn to_effective_json(&self) -> Value {
                let mut map = Map::new();
                map.insert(
                    keys::GUID.to_string(),
                    Value::String(identity::format_guid(&self.guid())),
                );
                $( map.insert($key.to_string(), self.$field().to_json()); )*
                Value::Object(map)
            }
        }
    };
}

profile_settings! {
    /// Display name
    name: String = defaults::NAME.to_string(), keys::NAME;
    /// Tag naming the generator or extension that produced this profile
    source: String = String::new(), keys::SOURCE;
    /// Hidden profiles are kept but not offered in menus
    hidden: bool = false, keys::HIDDEN;
    /// Connection provider for sessions that are not a local process; nil for none
    connection_type: ProfileId = ProfileId::nil(), keys::CONNECTION_TYPE;
    icon: String = defaults::icon(), keys::ICON;
    close_on_exit: CloseOnExitMode = CloseOnExitMode::default(), keys::CLOSE_ON_EXIT;
    tab_title: String = String::new(), keys::TAB_TITLE;
    tab_color: Option<Color> = None, keys::TAB_COLOR;
    suppress_application_title: bool = false, keys::SUPPRESS_APPLICATION_TITLE;

    use_acrylic: bool = false, keys::USE_ACRYLIC;
    acrylic_opacity: f64 = defaults::acrylic_opacity(), keys::ACRYLIC_OPACITY,
        check = |v: &f64| within(*v, 0.0, 1.0);
    scrollbar_state: ScrollbarState = ScrollbarState::default(), keys::SCROLLBAR_STATE;

    font_face: String = defaults::font_face(), keys::FONT_FACE;
    /// Font size in points
    font_size: i32 = defaults::font_size(), keys::FONT_SIZE,
        check = |v: &i32| within(*v, 1, 128);
    font_weight: u16 = defaults::font_weight(), keys::FONT_WEIGHT,
        check = |v: &u16| within(*v, 1, 999);
    padding: String = defaults::padding(), keys::PADDING;

    /// Command line launched in new sessions
    commandline: String = defaults::commandline(), keys::COMMANDLINE;
    /// Unexpanded starting directory; see [`ResolvedProfile::evaluated_starting_directory`]
    starting_directory: String = String::new(), keys::STARTING_DIRECTORY;

    background_image: String = String::new(), keys::BACKGROUND_IMAGE;
    background_image_opacity: f64 = defaults::background_image_opacity(),
        keys::BACKGROUND_IMAGE_OPACITY, check = |v: &f64| within(*v, 0.0, 1.0);
    background_image_stretch_mode: BackgroundImageStretchMode =
        BackgroundImageStretchMode::default(), keys::BACKGROUND_IMAGE_STRETCH_MODE;
    background_image_alignment: BackgroundImageAlignment =
        BackgroundImageAlignment::default(), keys::BACKGROUND_IMAGE_ALIGNMENT;

    antialiasing_mode: TextAntialiasingMode = TextAntialiasingMode::default(),
        keys::ANTIALIASING_MODE;
    retro_terminal_effect: bool = false, keys::RETRO_TERMINAL_EFFECT;
    pixel_shader_path: String = String::new(), keys::PIXEL_SHADER_PATH;
    /// Redraw the whole viewport every frame
    force_full_repaint_rendering: bool = false, keys::FORCE_FULL_REPAINT_RENDERING;
    software_rendering: bool = false, keys::SOFTWARE_RENDERING;

    color_scheme: String = defaults::color_scheme(), keys::COLOR_SCHEME;
    /// Overrides the color scheme foreground (`null` clears an inherited override)
    foreground: Option<Color> = None, keys::FOREGROUND;
    background: Option<Color> = None, keys::BACKGROUND;
    selection_background: Option<Color> = None, keys::SELECTION_BACKGROUND;
    cursor_color: Option<Color> = None, keys::CURSOR_COLOR;

    /// Scrollback lines kept per session
    history_size: i32 = defaults::history_size(), keys::HISTORY_SIZE,
        check = |v: &i32| within(*v, 0, i32::MAX);
    snap_on_input: bool = true, keys::SNAP_ON_INPUT;
    alt_gr_aliasing: bool = true, keys::ALT_GR_ALIASING;
    cursor_shape: CursorShape = CursorShape::default(), keys::CURSOR_SHAPE;
    /// Vintage cursor height as a percentage of the cell
    cursor_height: u32 = defaults::cursor_height(), keys::CURSOR_HEIGHT,
        check = |v: &u32| within(*v, 1, 100);
    bell_style: BellStyle = BellStyle::default(), keys::BELL_STYLE;
}

/// `"source": null` reads as no source at all.
fn is_absent(key: &str, value: &Value) -> bool {
    key == keys::SOURCE && value.is_null()
}

fn within<T: PartialOrd + std::fmt::Display>(value: T, min: T, max: T) -> Result<(), String> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(format!("must be between {min} and {max}"))
    }
}

fn parse_guid_value(key: &str, value: &Value) -> Result<ProfileId, ProfileError> {
    value
        .as_str()
        .and_then(identity::parse_guid)
        .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a guid string"))
}

/// `parents` is an array of guid strings; a single string is accepted too.
fn parse_parents(value: &Value) -> Result<Vec<ProfileId>, ProfileError> {
    match value {
        Value::String(_) => Ok(vec![parse_guid_value(keys::PARENTS, value)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| parse_guid_value(keys::PARENTS, item))
            .collect(),
        _ => Err(ProfileError::invalid_field(
            keys::PARENTS,
            value,
            "expected a guid string or an array of them",
        )),
    }
}

impl Profile {
    /// Create an empty profile identified by the default name and no source.
    pub fn new() -> Self {
        Self::blank(generate_guid(defaults::NAME, ""))
    }

    /// Create an empty profile with an explicit identifier.
    pub fn with_guid(guid: ProfileId) -> Self {
        let mut profile = Self::new();
        profile.guid.set(guid);
        profile
    }

    /// Create an empty profile whose generated identifier belongs to `(name, source)`.
    ///
    /// `name` and `source` are set explicitly so the profile re-identifies
    /// itself after a round trip through JSON.
    pub fn generated(name: impl Into<String>, source: impl Into<String>) -> Self {
        let name = name.into();
        let source = source.into();
        let mut profile = Self::blank(generate_guid(&name, &source));
        profile.name.set(name);
        if !source.is_empty() {
            profile.source.set(source);
        }
        profile
    }

    /// The effective identifier: explicit if one was layered, generated otherwise.
    ///
    /// Fixed for the lifetime of the profile.
    pub fn guid(&self) -> ProfileId {
        self.guid.get().copied().unwrap_or(self.generated_guid)
    }

    pub fn has_explicit_guid(&self) -> bool {
        self.guid.is_set()
    }

    /// The identifier derived from name and source when this profile was created.
    pub fn generated_guid(&self) -> ProfileId {
        self.generated_guid
    }

    pub fn origin(&self) -> ProfileOrigin {
        self.origin
    }

    pub fn set_origin(&mut self, origin: ProfileOrigin) {
        self.origin = origin;
    }

    /// This layer's own name, or the default name. Parents are not consulted.
    pub fn own_name(&self) -> &str {
        self.name.get().map(String::as_str).unwrap_or(defaults::NAME)
    }

    /// This layer's own source tag, or the empty string.
    pub fn own_source(&self) -> &str {
        self.source.get().map(String::as_str).unwrap_or_default()
    }

    /// This layer's own hidden flag, or false.
    pub fn own_hidden(&self) -> bool {
        self.hidden.get().copied().unwrap_or(false)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.own_name())
    }
}
