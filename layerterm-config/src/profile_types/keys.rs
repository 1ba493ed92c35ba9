//! JSON keys of a profile fragment.

pub const GUID: &str = "guid";
pub const NAME: &str = "name";
pub const SOURCE: &str = "source";
pub const HIDDEN: &str = "hidden";
pub const PARENTS: &str = "parents";

pub const ICON: &str = "icon";
pub const CLOSE_ON_EXIT: &str = "closeOnExit";
pub const TAB_TITLE: &str = "tabTitle";
pub const TAB_COLOR: &str = "tabColor";
pub const SUPPRESS_APPLICATION_TITLE: &str = "suppressApplicationTitle";

pub const USE_ACRYLIC: &str = "useAcrylic";
pub const ACRYLIC_OPACITY: &str = "acrylicOpacity";
pub const SCROLLBAR_STATE: &str = "scrollbarState";

pub const FONT_FACE: &str = "fontFace";
pub const FONT_SIZE: &str = "fontSize";
pub const FONT_WEIGHT: &str = "fontWeight";
pub const PADDING: &str = "padding";

pub const COMMANDLINE: &str = "commandline";
pub const STARTING_DIRECTORY: &str = "startingDirectory";

pub const BACKGROUND_IMAGE: &str = "backgroundImage";
pub const BACKGROUND_IMAGE_OPACITY: &str = "backgroundImageOpacity";
pub const BACKGROUND_IMAGE_STRETCH_MODE: &str = "backgroundImageStretchMode";
pub const BACKGROUND_IMAGE_ALIGNMENT: &str = "backgroundImageAlignment";

pub const ANTIALIASING_MODE: &str = "antialiasingMode";
pub const RETRO_TERMINAL_EFFECT: &str = "retroTerminalEffect";
pub const PIXEL_SHADER_PATH: &str = "pixelShaderPath";

pub const COLOR_SCHEME: &str = "colorScheme";
pub const FOREGROUND: &str = "foreground";
pub const BACKGROUND: &str = "background";
pub const SELECTION_BACKGROUND: &str = "selectionBackground";
pub const CURSOR_COLOR: &str = "cursorColor";

pub const HISTORY_SIZE: &str = "historySize";
pub const SNAP_ON_INPUT: &str = "snapOnInput";
pub const ALT_GR_ALIASING: &str = "altGrAliasing";
pub const CURSOR_SHAPE: &str = "cursorShape";
pub const CURSOR_HEIGHT: &str = "cursorHeight";
pub const BELL_STYLE: &str = "bellStyle";

pub const CONNECTION_TYPE: &str = "connectionType";
pub const FORCE_FULL_REPAINT_RENDERING: &str = "experimental.rendering.forceFullRepaint";
pub const SOFTWARE_RENDERING: &str = "experimental.rendering.software";
