//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only detaches it, so a stale
//! `NodeId` keeps pointing at the same (now disconnected) node.

use crate::{
    DomError, DomResult, ElementData, Node, NodeData, NodeId, SelectorList, ShadowRootData,
    ShadowRootMode,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data for `id`
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Lowercased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Parent of a node (NONE for roots and detached nodes)
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Check for an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<Option<String>> {
        let element = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        Ok(element.attrs.set_attribute(name, value))
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)?
            .attrs
            .remove_named_item(name)
            .map(|attr| attr.value)
    }

    /// Add or remove a presence-boolean attribute
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: bool) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        element.attrs.toggle_attribute(name, Some(force));
        Ok(())
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(text)) => {
                text.clear();
                text.push_str(content);
                Ok(())
            }
            Some(_) => Err(DomError::InvalidNodeType),
            None => Err(DomError::NotFound),
        }
    }

    /// Concatenated text of all descendant text nodes (light tree only)
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(text) = self.get(node).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Child IDs collected into a vector
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Descendants of `root` in document order, excluding `root`.
    /// Does not enter shadow roots.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.child_ids(id).into_iter().rev());
        }
        out
    }

    /// Whether `ancestor` is `node` or one of its inclusive ancestors
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }

    /// Like [`Self::contains`], but a shadow root's parent is its host
    fn shadow_including_contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) if n.parent.is_valid() => n.parent,
                Some(n) => n.as_shadow_root().map_or(NodeId::NONE, |s| s.host),
                None => NodeId::NONE,
            };
        }
        false
    }

    /// Whether a node is attached to the document, crossing shadow boundaries
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == NodeId::ROOT {
                return true;
            }
            let Some(node) = self.get(current) else {
                return false;
            };
            current = if node.parent.is_valid() {
                node.parent
            } else if let Some(shadow) = node.as_shadow_root() {
                shadow.host
            } else {
                return false;
            };
        }
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        let child_node = self.get(child).ok_or(DomError::NotFound)?;
        if matches!(parent_node.data, NodeData::Text(_)) {
            return Err(DomError::HierarchyRequest);
        }
        if matches!(child_node.data, NodeData::Document | NodeData::ShadowRoot(_)) {
            return Err(DomError::HierarchyRequest);
        }
        if self.shadow_including_contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Unlink a node from its parent (no-op if detached)
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Append a child node, moving it if already attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != parent {
                return Err(DomError::NotAChild);
            }
            if reference == child {
                return Ok(child);
            }
        }
        self.detach(child);

        let (prev, next) = match reference {
            Some(reference) => (
                self.get(reference).map_or(NodeId::NONE, |n| n.prev_sibling),
                reference,
            ),
            None => (
                self.get(parent).map_or(NodeId::NONE, |n| n.last_child),
                NodeId::NONE,
            ),
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = child;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = child;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = child;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = child;
        }
        Ok(child)
    }

    /// Remove a child node from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    /// Replace `old` with `new` under `parent`
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> DomResult<NodeId> {
        if self.parent(old) != parent {
            return Err(DomError::NotAChild);
        }
        if new == old {
            return Ok(old);
        }
        self.check_insert(parent, new)?;
        let next = self.get(old).map_or(NodeId::NONE, |n| n.next_sibling);
        self.detach(old);
        if next == new {
            return Ok(old);
        }
        self.insert_before(parent, new, next.is_valid().then_some(next))?;
        Ok(old)
    }

    // ------------------------------------------------------------------
    // Shadow DOM
    // ------------------------------------------------------------------

    /// Attach a shadow root to an element
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> DomResult<NodeId> {
        let element = self.element(host).ok_or(DomError::InvalidNodeType)?;
        if element.shadow_root.is_some() {
            return Err(DomError::NotSupported("element already hosts a shadow root"));
        }
        let shadow = self.push(Node::shadow_root(ShadowRootData::new(host, mode)));
        if let Some(element) = self.element_mut(host) {
            element.shadow_root = Some(shadow);
        }
        tracing::trace!(?host, ?shadow, "attached shadow root");
        Ok(shadow)
    }

    /// Shadow root hosted by an element
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element(host)?.shadow_root
    }

    /// Shadow root hosted by an element, hidden when the root is closed
    pub fn open_shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let shadow = self.shadow_root(host)?;
        let data = self.get(shadow)?.as_shadow_root()?;
        (data.mode == ShadowRootMode::Open).then_some(shadow)
    }

    /// Host of a shadow root
    pub fn shadow_host(&self, shadow: NodeId) -> Option<NodeId> {
        self.get(shadow)?.as_shadow_root().map(|s| s.host)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check if an element matches a selector list
    pub fn matches(&self, id: NodeId, selectors: &SelectorList) -> bool {
        self.element(id).is_some_and(|e| selectors.matches(e))
    }

    /// First descendant of `root` matching `selectors`, in document order
    pub fn query_selector(&self, root: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.matches(id, selectors))
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("p");
        let b = tree.create_element("span");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();
        (tree, div, a, b)
    }

    #[test]
    fn test_append_and_siblings() {
        let (tree, div, a, b) = sample();
        assert_eq!(tree.child_ids(div), vec![a, b]);
        assert_eq!(tree.get(a).unwrap().next_sibling, b);
        assert_eq!(tree.get(b).unwrap().prev_sibling, a);
        assert_eq!(tree.get(div).unwrap().last_child, b);
    }

    #[test]
    fn test_insert_before_and_remove() {
        let (mut tree, div, a, b) = sample();
        let c = tree.create_element("em");
        tree.insert_before(div, c, Some(b)).unwrap();
        assert_eq!(tree.child_ids(div), vec![a, c, b]);

        tree.remove_child(div, a).unwrap();
        assert_eq!(tree.child_ids(div), vec![c, b]);
        assert!(!tree.is_connected(a));
        assert_eq!(tree.remove_child(div, a), Err(DomError::NotAChild));
    }

    #[test]
    fn test_replace_child() {
        let (mut tree, div, a, b) = sample();
        let c = tree.create_element("em");
        tree.replace_child(div, c, a).unwrap();
        assert_eq!(tree.child_ids(div), vec![c, b]);
        let d = tree.create_element("i");
        tree.replace_child(div, d, b).unwrap();
        assert_eq!(tree.child_ids(div), vec![c, d]);
    }

    #[test]
    fn test_hierarchy_errors() {
        let (mut tree, div, a, _) = sample();
        assert_eq!(tree.append_child(a, div), Err(DomError::HierarchyRequest));
        let text = tree.create_text("x");
        assert_eq!(tree.append_child(text, a), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (mut tree, div, a, b) = sample();
        let inner = tree.create_element("b");
        tree.append_child(a, inner).unwrap();
        assert_eq!(tree.descendants(div), vec![a, inner, b]);
    }

    #[test]
    fn test_shadow_connectivity() {
        let (mut tree, div, _, _) = sample();
        let shadow = tree.attach_shadow(div, ShadowRootMode::Open).unwrap();
        let inner = tree.create_element("button");
        tree.append_child(shadow, inner).unwrap();

        assert!(tree.is_connected(inner));
        assert_eq!(tree.shadow_host(shadow), Some(div));
        assert!(!tree.descendants(div).contains(&inner));
        assert!(tree.attach_shadow(div, ShadowRootMode::Open).is_err());

        tree.detach(div);
        assert!(!tree.is_connected(inner));
    }

    #[test]
    fn test_host_cannot_enter_own_shadow() {
        let (mut tree, div, a, _) = sample();
        let shadow = tree.attach_shadow(a, ShadowRootMode::Open).unwrap();
        let slot = tree.create_element("slot");
        tree.append_child(shadow, slot).unwrap();

        assert_eq!(tree.append_child(shadow, a), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(slot, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.parent(a), div);
        assert!(tree.is_connected(slot));
    }

    #[test]
    fn test_closed_shadow_hidden_from_open_lookup() {
        let (mut tree, _, a, b) = sample();
        let open = tree.attach_shadow(a, ShadowRootMode::Open).unwrap();
        let closed = tree.attach_shadow(b, ShadowRootMode::Closed).unwrap();

        assert_eq!(tree.open_shadow_root(a), Some(open));
        assert_eq!(tree.open_shadow_root(b), None);
        assert_eq!(tree.shadow_root(b), Some(closed));
    }

    #[test]
    fn test_text_content() {
        let (mut tree, div, a, b) = sample();
        let t1 = tree.create_text("Hello, ");
        let t2 = tree.create_text("World");
        tree.append_child(a, t1).unwrap();
        tree.append_child(b, t2).unwrap();
        assert_eq!(tree.text_content(div), "Hello, World");
        tree.set_text(t2, "fOS").unwrap();
        assert_eq!(tree.text_content(div), "Hello, fOS");
    }
}
