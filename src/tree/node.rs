/// A single entry in the tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub children: Vec<Node>,
    pub is_root_node: bool,
}

/// Ordered sequence of root nodes; the whole state of the tree view.
pub type Forest = Vec<Node>;

impl Node {
    pub fn root(id: String, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            is_root_node: true,
        }
    }

    pub fn child(id: String, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            is_root_node: false,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }
}

/// Result of a successful search: the node itself plus the chain of nodes
/// leading to it, outermost first.
#[derive(Debug)]
pub struct NodeMatch<'a> {
    pub node: &'a Node,
    pub ancestors: Vec<&'a Node>,
}

impl<'a> NodeMatch<'a> {
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }
}

/// Depth-first pre-order search for `target_id`. The first match wins.
pub fn find_node_and_ancestors<'a>(nodes: &'a [Node], target_id: &str) -> Option<NodeMatch<'a>> {
    let mut ancestors = Vec::new();
    search(nodes, target_id, &mut ancestors).map(|node| NodeMatch { node, ancestors })
}

fn search<'a>(nodes: &'a [Node], target_id: &str, ancestors: &mut Vec<&'a Node>) -> Option<&'a Node> {
    for node in nodes {
        if node.id == target_id {
            return Some(node);
        }
        ancestors.push(node);
        if let Some(found) = search(&node.children, target_id, ancestors) {
            return Some(found);
        }
        ancestors.pop();
    }
    None
}

/// Mutable counterpart of [`find_node_and_ancestors`], same visiting order.
pub(crate) fn find_node_mut<'a>(nodes: &'a mut [Node], target_id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id == target_id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, target_id) {
            return Some(found);
        }
    }
    None
}
