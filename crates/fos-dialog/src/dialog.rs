//! `<media-dialog>` element
//!
//! A modal overlay that grabs focus when shown and hands it back when
//! closed. Closed and open are the only states; `open` is a presence
//! attribute on the host.

use std::sync::LazyLock;

use fos_a11y::{find_focusable_within, FocusMemory};
use fos_dom::{
    Compound, CustomElementDefinition, CustomElementRegistry, Document, DomResult, NodeId,
    SelectorList, ShadowRootMode,
};

use crate::style;

/// Registered tag name
pub const DIALOG_TAG: &str = "media-dialog";

/// Attributes routed to [`MediaDialog::attribute_changed_callback`]
pub const OBSERVED_ATTRIBUTES: &[&str] = &["open"];

/// Role applied on connect when none is declared
pub const DEFAULT_ROLE: &str = "dialog";

static AUTOFOCUS: LazyLock<SelectorList> = LazyLock::new(|| {
    SelectorList::from_compounds([Compound::any()
        .with_attr("autofocus")
        .not(Compound::any().with_attr("disabled"))])
});

/// Register `<media-dialog>`. Repeat calls are no-ops and return `false`.
pub fn define(registry: &mut CustomElementRegistry) -> bool {
    define_as(registry, DIALOG_TAG)
}

/// Register the dialog behavior under another tag name
pub fn define_as(registry: &mut CustomElementRegistry, tag: &str) -> bool {
    registry.define_once(CustomElementDefinition::new(tag).observe(OBSERVED_ATTRIBUTES))
}

/// Dialog element instance
#[derive(Debug)]
pub struct MediaDialog {
    node: NodeId,
    focus: FocusMemory,
}

impl MediaDialog {
    /// Create a detached `<media-dialog>`
    pub fn create(doc: &mut Document) -> DomResult<Self> {
        define(doc.custom_elements_mut());
        let node = doc.tree.create_element(DIALOG_TAG);
        Self::upgrade(doc, node)
    }

    /// Give an existing element dialog behavior, stamping the shadow
    /// template unless one is already attached.
    pub fn upgrade(doc: &mut Document, node: NodeId) -> DomResult<Self> {
        if doc.tree.shadow_root(node).is_none() {
            let shadow = doc.tree.attach_shadow(node, ShadowRootMode::Open)?;
            style::stamp_template(&mut doc.tree, shadow)?;
        }
        Ok(Self {
            node,
            focus: FocusMemory::new(),
        })
    }

    /// The host element
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the host carries `open`
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.tree.has_attribute(self.node, "open")
    }

    /// The element focused before the dialog last opened
    pub fn previously_focused(&self) -> Option<NodeId> {
        self.focus.previous().map(|handle| handle.node())
    }

    /// Open the dialog and move focus into it
    pub fn show(&mut self, doc: &mut Document) {
        tracing::debug!(node = ?self.node, "show dialog");
        if doc.tree.toggle_attribute(self.node, "open", true).is_err() {
            return;
        }
        self.acquire_focus(doc);
    }

    /// Close the dialog and return focus to where it was
    pub fn close(&mut self, doc: &mut Document) {
        tracing::debug!(node = ?self.node, "close dialog");
        doc.tree.remove_attribute(self.node, "open");
        self.focus.restore(doc);
    }

    /// Lifecycle hook for insertion into a document
    pub fn connected_callback(&mut self, doc: &mut Document) {
        if !doc.tree.has_attribute(self.node, "role") {
            let _ = doc.tree.set_attribute(self.node, "role", DEFAULT_ROLE);
        }
        if self.is_open(doc) {
            tracing::debug!(node = ?self.node, "dialog connected open");
            self.acquire_focus(doc);
        }
    }

    /// Lifecycle hook for changes made to `open` from outside `show`/`close`
    pub fn attribute_changed_callback(
        &mut self,
        doc: &mut Document,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if name != "open" {
            return;
        }
        match (old, new) {
            (None, Some(_)) => self.acquire_focus(doc),
            (Some(_), None) => {
                self.focus.restore(doc);
            }
            _ => {}
        }
    }

    /// Pick the element to focus: an enabled `[autofocus]` descendant, the
    /// dialog itself when it has a non-negative tab index, then the first
    /// focusable descendant.
    pub fn focus_target(&self, doc: &Document) -> Option<NodeId> {
        let tree = doc.tree();
        if let Some(target) = tree.query_selector(self.node, &AUTOFOCUS) {
            tracing::trace!(?target, "focus target from autofocus");
            return Some(target);
        }
        if tree.element(self.node).is_some_and(|e| e.tab_index() >= 0) {
            return Some(self.node);
        }
        find_focusable_within(tree, self.node)
    }

    fn acquire_focus(&mut self, doc: &mut Document) {
        let target = self.focus_target(doc);
        self.focus.capture(doc);
        doc.blur();
        match target {
            Some(target) => {
                if !doc.focus(target) {
                    tracing::trace!(?target, "focus target refused focus");
                }
            }
            None => tracing::trace!(node = ?self.node, "dialog has nothing to focus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted_dialog() -> (Document, MediaDialog) {
        let mut doc = Document::new();
        let dialog = MediaDialog::create(&mut doc).unwrap();
        let body = doc.body();
        doc.tree.append_child(body, dialog.node()).unwrap();
        (doc, dialog)
    }

    fn append(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
        let id = doc.tree.create_element(tag);
        doc.tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_create_stamps_shadow_template() {
        let (doc, dialog) = mounted_dialog();
        let shadow = doc.tree.shadow_root(dialog.node()).unwrap();
        let tags: Vec<_> = doc
            .tree
            .child_ids(shadow)
            .into_iter()
            .filter_map(|id| doc.tree.tag_name(id).map(str::to_string))
            .collect();
        assert_eq!(tags, vec!["style", "div"]);
        assert!(doc.custom_elements().is_defined(DIALOG_TAG));
    }

    #[test]
    fn test_connected_defaults_role() {
        let (mut doc, mut dialog) = mounted_dialog();
        dialog.connected_callback(&mut doc);
        assert_eq!(doc.tree.get_attribute(dialog.node(), "role"), Some("dialog"));

        let (mut doc, mut dialog) = mounted_dialog();
        doc.tree.set_attribute(dialog.node(), "role", "alertdialog").unwrap();
        dialog.connected_callback(&mut doc);
        assert_eq!(doc.tree.get_attribute(dialog.node(), "role"), Some("alertdialog"));
    }

    #[test]
    fn test_autofocus_preferred() {
        let (mut doc, mut dialog) = mounted_dialog();
        append(&mut doc, dialog.node(), "button");
        let field = append(&mut doc, dialog.node(), "input");
        doc.tree.set_attribute(field, "autofocus", "").unwrap();

        dialog.show(&mut doc);
        assert_eq!(doc.active_element(), Some(field));
    }

    #[test]
    fn test_disabled_autofocus_ignored() {
        let (mut doc, mut dialog) = mounted_dialog();
        let button = append(&mut doc, dialog.node(), "button");
        let field = append(&mut doc, dialog.node(), "input");
        doc.tree.set_attribute(field, "autofocus", "").unwrap();
        doc.tree.set_attribute(field, "disabled", "").unwrap();

        dialog.show(&mut doc);
        assert_eq!(doc.active_element(), Some(button));
    }

    #[test]
    fn test_focusable_host_takes_focus() {
        let (mut doc, mut dialog) = mounted_dialog();
        doc.tree.set_attribute(dialog.node(), "tabindex", "0").unwrap();
        append(&mut doc, dialog.node(), "button");

        dialog.show(&mut doc);
        assert_eq!(doc.active_element(), Some(dialog.node()));
    }

    #[test]
    fn test_show_with_nothing_focusable_blurs() {
        let (mut doc, mut dialog) = mounted_dialog();
        let body = doc.body();
        let outside = append(&mut doc, body, "button");
        append(&mut doc, dialog.node(), "p");
        doc.focus(outside);

        dialog.show(&mut doc);
        assert!(dialog.is_open(&doc));
        assert_eq!(doc.active_element(), None);
        assert_eq!(dialog.previously_focused(), Some(outside));
    }

    #[test]
    fn test_attribute_changed_open_and_close() {
        let (mut doc, mut dialog) = mounted_dialog();
        let body = doc.body();
        let outside = append(&mut doc, body, "button");
        let inside = append(&mut doc, dialog.node(), "button");
        doc.focus(outside);

        doc.tree.set_attribute(dialog.node(), "open", "").unwrap();
        dialog.attribute_changed_callback(&mut doc, "open", None, Some(""));
        assert_eq!(doc.active_element(), Some(inside));

        doc.tree.remove_attribute(dialog.node(), "open");
        dialog.attribute_changed_callback(&mut doc, "open", Some(""), None);
        assert_eq!(doc.active_element(), Some(outside));

        dialog.attribute_changed_callback(&mut doc, "role", None, Some("dialog"));
        assert_eq!(doc.active_element(), Some(outside));
    }

    #[test]
    fn test_define_is_idempotent() {
        let mut registry = CustomElementRegistry::new();
        assert!(define(&mut registry));
        assert!(!define(&mut registry));
        assert!(define_as(&mut registry, "mxp-dialog"));
        assert!(registry.get("mxp-dialog").unwrap().observes("open"));
    }
}
