//! Arena-backed mutable document tree.

use crate::node::{ElementData, NodeData, NodeId};

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Ordered tree of elements and text, rooted at a document node.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Structural edits
/// (append, insert, detach) only rewire parent/child links, so a handle taken
/// by one pass still names the same node in later passes.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub(crate) fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match &mut self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the node is an element with the given tag name.
    #[must_use]
    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.name == name)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    pub(crate) fn create(&mut self, data: NodeData) -> NodeId {
        self.push(data)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `node` immediately after `sibling`, detaching it first.
    ///
    /// Does nothing when `sibling` has no parent.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) {
        let Some(parent) = self.parent(sibling) else {
            return;
        };
        self.detach(node);
        let index = self.index_in_parent(sibling).map_or(0, |i| i + 1);
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, node);
    }

    /// Remove a node from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// The node immediately following `id` under the same parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Element siblings after `id`, in order, skipping text and comments.
    #[must_use]
    pub fn following_elements(&self, id: NodeId) -> Vec<NodeId> {
        let (Some(parent), Some(index)) = (self.parent(id), self.index_in_parent(id)) else {
            return Vec::new();
        };
        self.children(parent)[index + 1..]
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
            .collect()
    }

    /// Concatenated text of the node and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Document | NodeData::Element(_) => {
                for &child in &self.nodes[id.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Elements in document order matching a predicate.
    pub fn find_elements<F>(&self, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(&mut predicate))
            .collect()
    }

    /// First element with the given tag name, in document order.
    #[must_use]
    pub fn first_element(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.is_element(id, name))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
