//! Focus Memory
//!
//! Remembers which element held focus before a component grabbed it, so
//! focus can be handed back later. The stored handle never keeps a node
//! alive and goes stale once the node is detached or can no longer focus.

use fos_dom::{Document, NodeId};

/// Non-owning reference to a previously focused element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusHandle(NodeId);

impl FocusHandle {
    pub fn new(node: NodeId) -> Self {
        Self(node)
    }

    /// The referenced node, valid or not
    pub fn node(self) -> NodeId {
        self.0
    }

    /// The node if it is still connected and focusable
    pub fn resolve(self, doc: &Document) -> Option<NodeId> {
        doc.is_focusable(self.0).then_some(self.0)
    }
}

/// Per-component record of the element focused before it opened
#[derive(Debug, Default)]
pub struct FocusMemory {
    previous: Option<FocusHandle>,
}

impl FocusMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the document's active element (or its absence)
    pub fn capture(&mut self, doc: &Document) {
        self.previous = doc.active_element().map(FocusHandle::new);
    }

    /// The recorded handle
    pub fn previous(&self) -> Option<FocusHandle> {
        self.previous
    }

    /// Forget the recorded element
    pub fn clear(&mut self) {
        self.previous = None;
    }

    /// Focus the recorded element again. Stale or missing handles leave
    /// focus untouched and return `false`.
    pub fn restore(&self, doc: &mut Document) -> bool {
        match self.previous.and_then(|handle| handle.resolve(doc)) {
            Some(node) => doc.focus(node),
            None => {
                tracing::trace!("no focus to restore");
                false
            }
        }
    }
}
