//! Value types stored in profile settings and their JSON coercion rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ProfileError;

/// Conversion between a setting's Rust type and its JSON representation.
///
/// `from_json` must reject anything that does not fit the type exactly: wrong
/// JSON kind, numbers out of range for the target integer, unparseable
/// structured strings.
pub trait JsonSetting: Sized {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError>;
    fn to_json(&self) -> Value;
}

impl JsonSetting for String {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a string"))
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl JsonSetting for bool {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        value
            .as_bool()
            .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a boolean"))
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl JsonSetting for f64 {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        value
            .as_f64()
            .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a number"))
    }

    fn to_json(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

macro_rules! integer_setting {
    ($($ty:ty),* $(,)?) => {
        $(
            impl JsonSetting for $ty {
                fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
                    let wide = value
                        .as_i64()
                        .ok_or_else(|| ProfileError::invalid_field(key, value, "expected an integer"))?;
                    <$ty>::try_from(wide).map_err(|_| {
                        ProfileError::invalid_field(
                            key,
                            value,
                            format!("out of range for {}", stringify!($ty)),
                        )
                    })
                }

                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

integer_setting!(i32, u32, u16);

/// A color in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#RRGGBB` or the `#RGB` shorthand.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl JsonSetting for Color {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        value
            .as_str()
            .and_then(Color::from_hex)
            .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a \"#RRGGBB\" color"))
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Nullable color: JSON `null` explicitly clears a color a parent may set.
impl JsonSetting for Option<Color> {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        if value.is_null() {
            return Ok(None);
        }
        Color::from_json(key, value).map(Some)
    }

    fn to_json(&self) -> Value {
        self.as_ref().map(Color::to_json).unwrap_or(Value::Null)
    }
}

/// Identifiers are written braced and accepted braced or bare.
impl JsonSetting for uuid::Uuid {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        value
            .as_str()
            .and_then(crate::identity::parse_guid)
            .ok_or_else(|| ProfileError::invalid_field(key, value, "expected a guid string"))
    }

    fn to_json(&self) -> Value {
        Value::String(crate::identity::format_guid(self))
    }
}

/// Enumerations are stored as their camelCase variant names.
macro_rules! enum_setting {
    ($($ty:ty),* $(,)?) => {
        $(
            impl JsonSetting for $ty {
                fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
                    serde_json::from_value(value.clone())
                        .map_err(|e| ProfileError::invalid_field(key, value, e.to_string()))
                }

                fn to_json(&self) -> Value {
                    serde_json::to_value(self).unwrap_or(Value::Null)
                }
            }
        )*
    };
}

enum_setting!(
    ScrollbarState,
    BackgroundImageStretchMode,
    BackgroundImageAlignment,
    TextAntialiasingMode,
    CursorShape,
    BellStyle,
);

/// What happens to a tab when its process exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CloseOnExitMode {
    /// Keep the tab open
    Never,
    /// Close only if the process exited successfully
    #[default]
    Graceful,
    /// Always close
    Always,
}

/// Older settings files use `true`/`false` here; they map to `graceful`/`never`.
impl JsonSetting for CloseOnExitMode {
    fn from_json(key: &str, value: &Value) -> Result<Self, ProfileError> {
        match value {
            Value::Bool(true) => Ok(CloseOnExitMode::Graceful),
            Value::Bool(false) => Ok(CloseOnExitMode::Never),
            _ => serde_json::from_value(value.clone())
                .map_err(|e| ProfileError::invalid_field(key, value, e.to_string())),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScrollbarState {
    #[default]
    Visible,
    Hidden,
}

/// How the background image is scaled to the pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImageStretchMode {
    /// Original size
    None,
    /// Stretch to fill, ignoring aspect ratio
    Fill,
    /// Fit inside, keeping aspect ratio
    Uniform,
    /// Cover the whole pane, keeping aspect ratio
    #[default]
    UniformToFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImageAlignment {
    #[default]
    Center,
    Left,
    Top,
    Right,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextAntialiasingMode {
    #[default]
    Grayscale,
    Cleartype,
    Aliased,
}

/// Cursor shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CursorShape {
    /// Vertical bar at cell start
    #[default]
    Bar,
    /// Partial-height block, see `cursorHeight`
    Vintage,
    Underscore,
    FilledBox,
    EmptyBox,
    DoubleUnderscore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BellStyle {
    None,
    #[default]
    Audible,
    Visual,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_hex_forms() {
        assert_eq!(Color::from_hex("#0C0C0C"), Some(Color::new(12, 12, 12)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::new(255, 255, 255)));
        assert_eq!(Color::from_hex("0C0C0C"), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::new(1, 171, 255).to_string(), "#01ABFF");
    }

    #[test]
    fn test_nullable_color() {
        assert_eq!(Option::<Color>::from_json("tabColor", &Value::Null), Ok(None));
        assert_eq!(
            Option::<Color>::from_json("tabColor", &json!("#FF0000")),
            Ok(Some(Color::new(255, 0, 0)))
        );
        assert!(Option::<Color>::from_json("tabColor", &json!(12)).is_err());
        assert_eq!(None::<Color>.to_json(), Value::Null);
    }

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(i32::from_json("fontSize", &json!(14)), Ok(14));
        assert!(i32::from_json("fontSize", &json!(1_099_511_627_776_i64)).is_err());
        assert!(u32::from_json("cursorHeight", &json!(-1)).is_err());
        assert!(u16::from_json("fontWeight", &json!(12.5)).is_err());
        assert!(i32::from_json("fontSize", &json!("12")).is_err());
    }

    #[test]
    fn test_wrong_kinds_rejected() {
        let err = bool::from_json("hidden", &json!("yes")).unwrap_err();
        assert_eq!(err.field(), Some("hidden"));
        assert!(String::from_json("name", &json!(3)).is_err());
        assert!(f64::from_json("acrylicOpacity", &json!(null)).is_err());
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(
            CursorShape::from_json("cursorShape", &json!("filledBox")),
            Ok(CursorShape::FilledBox)
        );
        assert_eq!(
            BackgroundImageAlignment::BottomRight.to_json(),
            json!("bottomRight")
        );
        assert!(BellStyle::from_json("bellStyle", &json!("loud")).is_err());
    }

    #[test]
    fn test_close_on_exit_accepts_legacy_bools() {
        assert_eq!(
            CloseOnExitMode::from_json("closeOnExit", &json!(true)),
            Ok(CloseOnExitMode::Graceful)
        );
        assert_eq!(
            CloseOnExitMode::from_json("closeOnExit", &json!(false)),
            Ok(CloseOnExitMode::Never)
        );
        assert_eq!(
            CloseOnExitMode::from_json("closeOnExit", &json!("always")),
            Ok(CloseOnExitMode::Always)
        );
        assert_eq!(CloseOnExitMode::Never.to_json(), json!("never"));
    }

    #[test]
    fn test_guid_setting() {
        let text = "{f65ddb7e-706b-4499-8a50-40313caf510a}";
        let guid = uuid::Uuid::from_json("connectionType", &json!(text)).unwrap();
        assert_eq!(guid.to_json(), json!(text));
        assert_eq!(
            uuid::Uuid::from_json("connectionType", &json!("f65ddb7e-706b-4499-8a50-40313caf510a"))
                .unwrap(),
            guid
        );
        let err = uuid::Uuid::from_json("connectionType", &json!("nope")).unwrap_err();
        assert_eq!(err.field(), Some("connectionType"));
    }
}
