//! Profile collection: the single owner of every profile in a settings load.
//!
//! Provides `ProfileCollection`, which routes JSON fragments to the profile
//! they describe (or creates a new one), keeps the identifier index and the
//! display order, wires declared parents into the inheritance graph, and
//! clones the whole graph for isolated editing.

use std::collections::HashMap;

use serde_json::Value;

use super::origin::ProfileOrigin;
use super::profile::{Profile, ProfileId};
use super::resolved::ResolvedProfile;
use crate::error::ProfileError;
use crate::identity::{explicit_guid, format_guid};
use crate::inheritance::{CloneMap, InheritanceGraph, NodeId};

/// Owns every profile of one settings load
#[derive(Debug, Default)]
pub struct ProfileCollection {
    /// All profiles, plus the optional base defaults object
    graph: InheritanceGraph<Profile>,

    /// Listed profiles indexed by identifier
    by_guid: HashMap<ProfileId, NodeId>,

    /// Listed profiles in display order (discovery order)
    order: Vec<NodeId>,

    /// Object every listed profile inherits from last, if configured
    base_defaults: Option<NodeId>,
}

impl ProfileCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listed profiles (the base defaults object is not counted)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no listed profiles
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The underlying inheritance graph
    pub fn graph(&self) -> &InheritanceGraph<Profile> {
        &self.graph
    }

    /// Listed node ids in display order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Add a fully built profile at the end of the display order
    pub fn add(&mut self, profile: Profile) -> Result<NodeId, ProfileError> {
        let guid = profile.guid();
        if self.by_guid.contains_key(&guid) {
            return Err(ProfileError::malformed(format!(
                "a profile with guid {} already exists",
                format_guid(&guid)
            )));
        }
        let node = self.graph.insert(profile);
        self.by_guid.insert(guid, node);
        self.order.push(node);
        Ok(node)
    }

    /// Find the existing profile `doc` should be layered onto.
    ///
    /// An explicit guid is matched against the identifier index first and
    /// wins outright. Without one, every profile is asked whether the
    /// fragment's name and source identify it; more than one positive answer
    /// is ambiguous and rejected rather than guessed.
    pub fn find_layer_target(&self, doc: &Value) -> Result<Option<NodeId>, ProfileError> {
        if let Some(guid) = explicit_guid(doc) {
            let Some(node) = self.by_guid.get(&guid).copied() else {
                return Ok(None);
            };
            return match self.graph.get(node) {
                Some(existing) if existing.should_layer(doc) => Ok(Some(node)),
                Some(existing) => Err(ProfileError::malformed(format!(
                    "guid {} already belongs to profile '{}' from a different source",
                    format_guid(&guid),
                    existing.own_name()
                ))),
                None => Ok(None),
            };
        }

        let mut candidates = self.order.iter().copied().filter(|node| {
            self.graph
                .get(*node)
                .is_some_and(|profile| profile.should_layer(doc))
        });
        let first = candidates.next();
        if first.is_some() && candidates.next().is_some() {
            return Err(ProfileError::malformed(
                "fragment without a guid matches more than one profile by name and source",
            ));
        }
        Ok(first)
    }

    /// Apply one fragment: layer it onto the profile it describes, or create
    /// a new profile with the given origin.
    ///
    /// On error the collection is unchanged.
    pub fn layer_fragment(
        &mut self,
        doc: &Value,
        origin: ProfileOrigin,
    ) -> Result<NodeId, ProfileError> {
        match self.find_layer_target(doc)? {
            Some(node) => {
                let Some(profile) = self.graph.get_mut(node) else {
                    return Err(ProfileError::malformed("layer target vanished"));
                };
                profile.layer_json(doc)?;
                log::debug!(
                    "Layered fragment onto profile '{}' {}",
                    profile.own_name(),
                    format_guid(&profile.guid())
                );
                Ok(node)
            }
            None => {
                let mut profile = Profile::from_json(doc)?;
                profile.set_origin(origin);
                log::debug!(
                    "Created {} profile '{}' {}",
                    origin.display_name(),
                    profile.own_name(),
                    format_guid(&profile.guid())
                );
                self.add(profile)
            }
        }
    }

    /// Create or extend the base defaults object every listed profile
    /// inherits from after its declared parents.
    pub fn set_base_defaults(&mut self, doc: &Value) -> Result<NodeId, ProfileError> {
        match self.base_defaults {
            Some(node) => {
                if let Some(base) = self.graph.get_mut(node) {
                    base.layer_json(doc)?;
                }
                Ok(node)
            }
            None => {
                let mut base = Profile::from_json(doc)?;
                base.set_origin(ProfileOrigin::BuiltIn);
                let node = self.graph.insert(base);
                self.base_defaults = Some(node);
                Ok(node)
            }
        }
    }

    pub fn base_defaults(&self) -> Option<NodeId> {
        self.base_defaults
    }

    /// Turn every profile's declared `parents` into graph links.
    ///
    /// A profile naming any unknown parent is left with no parents at all
    /// (one error per unknown parent is returned) instead of being half
    /// wired. With `apply_base` set, the base defaults object is appended as
    /// the last parent of every successfully wired profile. Cycles are wired
    /// as declared and logged; resolution tolerates them.
    pub fn wire_parents(&mut self, apply_base: bool) -> Vec<ProfileError> {
        let mut errors = Vec::new();
        let base = if apply_base { self.base_defaults } else { None };

        for node in self.order.clone() {
            let Some(profile) = self.graph.get(node) else {
                continue;
            };
            let guid = profile.guid();
            let declared = profile.parents.get().cloned().unwrap_or_default();

            let mut parents = Vec::with_capacity(declared.len() + 1);
            let mut unresolved = false;
            for parent in declared {
                match self.by_guid.get(&parent) {
                    Some(parent_node) => parents.push(*parent_node),
                    None => {
                        log::warn!(
                            "Parent profile {} not found for profile {}",
                            format_guid(&parent),
                            format_guid(&guid)
                        );
                        errors.push(ProfileError::UnresolvedParent {
                            profile: guid,
                            parent,
                        });
                        unresolved = true;
                    }
                }
            }

            if unresolved {
                self.graph.clear_parents(node);
                continue;
            }
            if let Some(base) = base
                && !parents.contains(&base)
            {
                parents.push(base);
            }
            self.graph.set_parents(node, parents);
        }

        for node in &self.order {
            if self.graph.is_on_cycle(*node)
                && let Some(profile) = self.graph.get(*node)
            {
                log::warn!(
                    "Circular profile inheritance detected at {}",
                    format_guid(&profile.guid())
                );
            }
        }
        errors
    }

    /// Get a profile's own layer by node
    pub fn get(&self, node: NodeId) -> Option<&Profile> {
        self.graph.get(node)
    }

    /// Get a mutable reference to a profile's own layer by node
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Profile> {
        self.graph.get_mut(node)
    }

    pub fn node_for(&self, guid: &ProfileId) -> Option<NodeId> {
        self.by_guid.get(guid).copied()
    }

    /// Get a profile's own layer by identifier
    pub fn get_by_guid(&self, guid: &ProfileId) -> Option<&Profile> {
        self.node_for(guid).and_then(|node| self.graph.get(node))
    }

    /// Resolving view of one node
    pub fn resolved(&self, node: NodeId) -> Option<ResolvedProfile<'_>> {
        ResolvedProfile::new(&self.graph, node)
    }

    pub fn resolved_by_guid(&self, guid: &ProfileId) -> Option<ResolvedProfile<'_>> {
        self.node_for(guid).and_then(|node| self.resolved(node))
    }

    /// Get all listed profiles in display order
    pub fn profiles_ordered(&self) -> Vec<ResolvedProfile<'_>> {
        self.order
            .iter()
            .filter_map(|node| self.resolved(*node))
            .collect()
    }

    /// Listed profiles whose resolved `hidden` flag is false
    pub fn visible_profiles(&self) -> Vec<ResolvedProfile<'_>> {
        self.profiles_ordered()
            .into_iter()
            .filter(|profile| !profile.hidden())
            .collect()
    }

    /// Find a profile by resolved name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<ResolvedProfile<'_>> {
        let lower = name.to_lowercase();
        self.profiles_ordered()
            .into_iter()
            .find(|p| p.name().to_lowercase() == lower)
    }

    /// Check if a profile has a specific ancestor in its inheritance chain
    pub fn has_ancestor(&self, guid: &ProfileId, ancestor: &ProfileId) -> bool {
        match (self.node_for(guid), self.node_for(ancestor)) {
            (Some(node), Some(ancestor)) => self.graph.has_ancestor(node, ancestor),
            _ => false,
        }
    }

    /// Get profiles that can be parents for a given profile
    /// (excludes the profile itself and any profiles that would create a cycle)
    pub fn valid_parents_for(&self, guid: &ProfileId) -> Vec<ResolvedProfile<'_>> {
        self.profiles_ordered()
            .into_iter()
            .filter(|p| p.guid() != *guid && !self.has_ancestor(&p.guid(), guid))
            .collect()
    }

    /// Sparse JSON of every listed profile, in display order
    pub fn to_json_fragments(&self) -> Vec<Value> {
        self.order
            .iter()
            .filter_map(|node| self.graph.get(*node))
            .map(Profile::to_json)
            .collect()
    }

    /// Independent copy of the whole collection for isolated editing.
    ///
    /// All profiles are cloned through one shared visited map, so a parent
    /// shared by several children is still a single shared object in the copy.
    pub fn clone_for_editing(&self) -> ProfileCollection {
        let mut copy = ProfileCollection::new();
        let mut visited = CloneMap::new();

        copy.base_defaults = self
            .base_defaults
            .and_then(|base| self.graph.clone_graph(base, &mut copy.graph, &mut visited));
        for node in &self.order {
            let Some(cloned) = self.graph.clone_graph(*node, &mut copy.graph, &mut visited) else {
                continue;
            };
            if let Some(profile) = copy.graph.get(cloned) {
                copy.by_guid.insert(profile.guid(), cloned);
            }
            copy.order.push(cloned);
        }
        copy
    }
}
