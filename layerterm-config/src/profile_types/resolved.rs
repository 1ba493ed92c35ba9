//! Read-only view resolving a profile's settings through its parents.

use super::origin::ProfileOrigin;
use super::profile::{Profile, ProfileId};
use crate::inheritance::{InheritanceGraph, NodeId};
use crate::paths;

/// Special background image value meaning "use the desktop wallpaper".
pub const DESKTOP_WALLPAPER: &str = "desktopWallpaper";

/// A profile together with the graph its parents live in.
///
/// Each setting accessor returns the first explicit value found on the
/// profile, then its parents in declaration order, then the hard default.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProfile<'a> {
    pub(crate) graph: &'a InheritanceGraph<Profile>,
    pub(crate) node: NodeId,
    profile: &'a Profile,
}

impl<'a> ResolvedProfile<'a> {
    /// View `node` of `graph`, or `None` if the node does not exist.
    pub fn new(graph: &'a InheritanceGraph<Profile>, node: NodeId) -> Option<Self> {
        let profile = graph.get(node)?;
        Some(Self {
            graph,
            node,
            profile,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The profile's own layer, without inherited values.
    pub fn profile(&self) -> &'a Profile {
        self.profile
    }

    pub fn guid(&self) -> ProfileId {
        self.profile.guid()
    }

    pub fn origin(&self) -> ProfileOrigin {
        self.profile.origin()
    }

    /// Wired parents, in declaration order.
    pub fn parents(&self) -> Vec<ResolvedProfile<'a>> {
        self.graph
            .parents(self.node)
            .iter()
            .filter_map(|parent| ResolvedProfile::new(self.graph, *parent))
            .collect()
    }

    /// Get the display label (icon + name if icon exists)
    pub fn display_label(&self) -> String {
        let icon = self.icon();
        if icon.is_empty() {
            self.name()
        } else {
            format!("{} {}", icon, self.name())
        }
    }

    /// The starting directory with variables and `~` expanded.
    /// An empty directory means the user's home directory.
    pub fn evaluated_starting_directory(&self) -> String {
        let directory = self.starting_directory();
        if directory.trim().is_empty() {
            return paths::home_dir_string();
        }
        paths::expand_path(&directory)
    }

    /// The background image path with variables and `~` expanded.
    /// The desktop wallpaper marker and the empty string are returned as-is.
    pub fn expanded_background_image_path(&self) -> String {
        let path = self.background_image();
        if path.is_empty() || path == DESKTOP_WALLPAPER {
            return path;
        }
        paths::expand_path(&path)
    }
}
