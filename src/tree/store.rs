use super::id::generate_unique_node_id;
use super::node::{find_node_and_ancestors, find_node_mut, Forest, Node, NodeMatch};

pub const NEW_ROOT_NAME: &str = "New Root Node";
pub const DEFAULT_ROOT_NAME: &str = "Root Node";
const NEW_CHILD_PREFIX: &str = "New Child";

/// Smallest `New Child {k}` (k >= 1) that none of `siblings` is named.
pub fn next_child_name(siblings: &[Node]) -> String {
    let mut index = 1;
    loop {
        let candidate = format!("{NEW_CHILD_PREFIX} {index}");
        if !siblings.iter().any(|child| child.name == candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Append a fresh root named "New Root Node".
pub fn create_root(forest: &[Node]) -> Forest {
    let mut next = forest.to_vec();
    next.push(Node::root(generate_unique_node_id(), NEW_ROOT_NAME));
    next
}

/// Append an auto-named child under `target_id`. Unknown ids leave the forest as is.
pub fn add_child(forest: &[Node], target_id: &str) -> Forest {
    let mut next = forest.to_vec();
    if let Some(target) = find_node_mut(&mut next, target_id) {
        let name = next_child_name(&target.children);
        target.children.push(Node::child(generate_unique_node_id(), name));
    }
    next
}

/// Set the name of `target_id`. Empty names are rejected; sibling uniqueness
/// is not checked here, unlike [`add_child`].
pub fn rename(forest: &[Node], target_id: &str, new_name: &str) -> Forest {
    let mut next = forest.to_vec();
    if new_name.is_empty() {
        return next;
    }
    if let Some(target) = find_node_mut(&mut next, target_id) {
        target.name = new_name.to_string();
    }
    next
}

/// Remove `target_id` and its subtree, either from the root list or from its parent.
pub fn delete_node(forest: &[Node], target_id: &str) -> Forest {
    if forest.iter().any(|root| root.id == target_id) {
        return forest
            .iter()
            .filter(|root| root.id != target_id)
            .cloned()
            .collect();
    }

    let mut next = forest.to_vec();
    let parent_id = find_node_and_ancestors(forest, target_id)
        .and_then(|found| found.parent().map(|parent| parent.id.clone()));

    if let Some(parent_id) = parent_id {
        if let Some(parent) = find_node_mut(&mut next, &parent_id) {
            parent.children.retain(|child| child.id != target_id);
        }
    }
    next
}

/// Owner of the forest. Every mutation computes a new forest from the current
/// one and swaps it in; nothing else writes to the nodes.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    forest: Forest,
}

impl TreeStore {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    /// Store holding a single root, the state the application starts in
    pub fn with_root(name: &str) -> Self {
        Self::new(vec![Node::root(generate_unique_node_id(), name)])
    }

    pub fn forest(&self) -> &[Node] {
        &self.forest
    }

    pub fn find(&self, target_id: &str) -> Option<NodeMatch<'_>> {
        find_node_and_ancestors(&self.forest, target_id)
    }

    pub fn contains(&self, target_id: &str) -> bool {
        self.find(target_id).is_some()
    }

    pub fn root_count(&self) -> usize {
        self.forest.len()
    }

    pub fn node_count(&self) -> usize {
        self.forest.iter().map(Node::subtree_size).sum()
    }

    /// Returns the id of the new root.
    pub fn create_root(&mut self) -> String {
        self.replace(create_root(&self.forest));
        let id = self
            .forest
            .last()
            .map(|root| root.id.clone())
            .unwrap_or_default();
        log::info!("Created root node {id}");
        id
    }

    /// Returns the id of the new child, or `None` when `target_id` is unknown.
    pub fn add_child(&mut self, target_id: &str) -> Option<String> {
        self.replace(add_child(&self.forest, target_id));
        let child = self
            .find(target_id)
            .and_then(|found| found.node.children.last())
            .map(|child| (child.id.clone(), child.name.clone()));

        match child {
            Some((id, name)) => {
                log::info!("Added child '{name}' ({id}) under {target_id}");
                Some(id)
            }
            None => {
                log::debug!("Add child ignored, node {target_id} not found");
                None
            }
        }
    }

    /// Returns whether the forest changed.
    pub fn rename(&mut self, target_id: &str, new_name: &str) -> bool {
        let changed = self.replace(rename(&self.forest, target_id, new_name));
        if changed {
            log::info!("Renamed {target_id} to '{new_name}'");
        } else {
            log::debug!("Rename of {target_id} to '{new_name}' left the tree unchanged");
        }
        changed
    }

    /// Returns whether a node was removed.
    pub fn delete_node(&mut self, target_id: &str) -> bool {
        let changed = self.replace(delete_node(&self.forest, target_id));
        if changed {
            log::info!("Deleted node {target_id}");
        } else {
            log::debug!("Delete ignored, node {target_id} not found");
        }
        changed
    }

    fn replace(&mut self, next: Forest) -> bool {
        let changed = next != self.forest;
        self.forest = next;
        changed
    }
}
