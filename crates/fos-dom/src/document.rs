//! Document - High-level document API
//!
//! Owns the tree, the focused element and the custom element registry.

use crate::{CustomElementRegistry, DomEvent, DomTree, NodeId};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Currently focused element
    focused: Option<NodeId>,
    /// Focus/blur events not yet taken
    events: Vec<DomEvent>,
    custom_elements: CustomElementRegistry,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created elements under the document node cannot violate
        // the hierarchy rules.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            body_element: body,
            focused: None,
            events: Vec::new(),
            custom_elements: CustomElementRegistry::new(),
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The custom element registry
    pub fn custom_elements(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }

    /// The custom element registry, mutably
    pub fn custom_elements_mut(&mut self) -> &mut CustomElementRegistry {
        &mut self.custom_elements
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// The focused element, dropped once it is no longer connected
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.tree.is_connected(id))
    }

    /// Whether `focus()` on this element would take effect
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let Some(element) = self.tree.element(id) else {
            return false;
        };
        if element.has_attr("disabled") || !self.tree.is_connected(id) {
            return false;
        }
        element.tab_index_attr().is_some() || element.is_natively_focusable()
    }

    /// Move focus to an element. Returns `false` (and changes nothing) when
    /// the element cannot take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            tracing::trace!(?id, "focus ignored, element not focusable");
            return false;
        }
        let previous = self.active_element();
        if previous == Some(id) {
            return true;
        }
        if let Some(previous) = previous {
            self.events.push(DomEvent::blur(previous, Some(id)));
        }
        self.focused = Some(id);
        self.events.push(DomEvent::focus(id, previous));
        true
    }

    /// Drop focus from the focused element, if any
    pub fn blur(&mut self) {
        if let Some(previous) = self.active_element() {
            self.events.push(DomEvent::blur(previous, None));
        }
        self.focused = None;
    }

    /// Take the focus/blur events recorded so far
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
