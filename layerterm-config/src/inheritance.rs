//! Inheritance capability shared by every layered configuration object.
//!
//! Objects live in an [`InheritanceGraph`] arena and refer to their parents by
//! [`NodeId`]. Nothing owns its parents; the graph owns every node. A node may
//! have any number of parents, the same parent may be shared by many children,
//! and the parent relation may even contain cycles. Every traversal here keeps
//! a visited set, so resolution and cloning always terminate.

use std::collections::{HashMap, HashSet};

/// Identity of a node inside one [`InheritanceGraph`].
///
/// Two ids are equal only if they name the same object; equal settings do not
/// make equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Maps an original node to the clone produced for it by [`InheritanceGraph::clone_graph`].
pub type CloneMap = HashMap<NodeId, NodeId>;

#[derive(Debug)]
struct Node<S> {
    settings: S,
    parents: Vec<NodeId>,
}

/// Arena of settings objects plus their ordered parent lists.
#[derive(Debug)]
pub struct InheritanceGraph<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Default for InheritanceGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> InheritanceGraph<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node with no parents.
    pub fn insert(&mut self, settings: S) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            settings,
            parents: Vec::new(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// All node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> Option<&S> {
        self.nodes.get(id.0).map(|node| &node.settings)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut S> {
        self.nodes.get_mut(id.0).map(|node| &mut node.settings)
    }

    /// Declared parents of `id`, in declaration order.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.parents.as_slice())
            .unwrap_or(&[])
    }

    /// Append `parent` to the parent list of `child`.
    ///
    /// Returns false (and changes nothing) if either node is unknown.
    /// Cycles are accepted; traversals tolerate them.
    pub fn add_parent(&mut self, child: NodeId, parent: NodeId) -> bool {
        if !self.contains(parent) {
            return false;
        }
        match self.nodes.get_mut(child.0) {
            Some(node) => {
                node.parents.push(parent);
                true
            }
            None => false,
        }
    }

    /// Replace the whole parent list of `child`.
    ///
    /// Returns false (and changes nothing) if `child` or any parent is unknown.
    pub fn set_parents(&mut self, child: NodeId, parents: Vec<NodeId>) -> bool {
        if parents.iter().any(|p| !self.contains(*p)) {
            return false;
        }
        match self.nodes.get_mut(child.0) {
            Some(node) => {
                node.parents = parents;
                true
            }
            None => false,
        }
    }

    pub fn clear_parents(&mut self, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parents.clear();
        }
    }

    /// Find the first value `pick` returns, looking at `id` itself and then
    /// its parents depth-first in declaration order.
    ///
    /// Each object is inspected at most once. A branch that leads back to an
    /// already inspected object is abandoned, so this terminates on cycles.
    /// Returns `None` when no object on the chain sets the value; the caller
    /// then falls back to the hard default.
    pub fn resolve<'a, V, F>(&'a self, id: NodeId, pick: F) -> Option<&'a V>
    where
        V: ?Sized,
        F: Fn(&'a S) -> Option<&'a V>,
    {
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            if let Some(value) = pick(&node.settings) {
                return Some(value);
            }
            stack.extend(node.parents.iter().rev());
        }
        None
    }

    /// Every object reachable through the parent relation of `id`, in the same
    /// order [`resolve`](Self::resolve) inspects them. `id` itself is excluded
    /// unless it sits on a cycle.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.parents(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            order.push(current);
            stack.extend(node.parents.iter().rev());
        }
        order
    }

    /// True if `ancestor` is reachable from `id` through parent links.
    pub fn has_ancestor(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// True if `id` can reach itself through parent links.
    pub fn is_on_cycle(&self, id: NodeId) -> bool {
        self.has_ancestor(id, id)
    }
}

impl<S: Clone> InheritanceGraph<S> {
    /// Deep copy of one object's own settings. Parent links are not copied.
    pub fn copy_settings(&self, id: NodeId) -> Option<S> {
        self.get(id).cloned()
    }

    /// Clone `root` and everything reachable from it into `target`.
    ///
    /// Every distinct original object is cloned exactly once: `visited` maps
    /// originals to their clones, and an object found there is reused instead
    /// of being copied again. Passing the same `visited` map to several calls
    /// therefore keeps shared ancestors shared across all the clones, and a
    /// cycle in the original becomes the same cycle among the clones.
    ///
    /// Parent links to ids unknown to this graph are dropped. Returns `None`
    /// if `root` itself is unknown.
    pub fn clone_graph(
        &self,
        root: NodeId,
        target: &mut InheritanceGraph<S>,
        visited: &mut CloneMap,
    ) -> Option<NodeId> {
        if let Some(existing) = visited.get(&root) {
            return Some(*existing);
        }

        // Copy nodes first, then link them once every clone exists.
        let mut created = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if visited.contains_key(&current) {
                continue;
            }
            let Some(settings) = self.copy_settings(current) else {
                continue;
            };
            let shell = target.insert(settings);
            visited.insert(current, shell);
            created.push((current, shell));
            stack.extend(self.parents(current).iter().rev());
        }

        for (original, shell) in created {
            let cloned_parents = self
                .parents(original)
                .iter()
                .filter_map(|parent| visited.get(parent).copied())
                .collect();
            target.nodes[shell.0].parents = cloned_parents;
        }
        visited.get(&root).copied()
    }
}
