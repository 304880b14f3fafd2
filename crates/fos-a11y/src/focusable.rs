//! Focusable Element Discovery
//!
//! Best-effort search for the first element that can take focus inside a
//! subtree, descending into shadow roots when the light tree has none.
//! Elements focusable only through other means are not found.

use std::sync::LazyLock;

use fos_dom::{Compound, DomTree, NodeId, SelectorList};

/// Form controls that take focus when enabled
pub const FOCUSABLE_TAGS: &[&str] = &["button", "input", "keygen", "select", "textarea"];

static FOCUSABLE: LazyLock<SelectorList> = LazyLock::new(|| {
    let enabled = || Compound::any().with_attr("disabled");
    let mut compounds: Vec<Compound> = FOCUSABLE_TAGS
        .iter()
        .map(|tag| Compound::tag(tag).not(enabled()))
        .collect();
    // Non-numeric tabindex values slip through; the list is a heuristic.
    compounds.push(
        Compound::any()
            .with_attr("tabindex")
            .not(enabled())
            .not(Compound::any().with_attr_value("tabindex", "")),
    );
    SelectorList::from_compounds(compounds)
});

/// The combined focusable selector:
/// `button:not([disabled]), ..., [tabindex]:not([disabled]):not([tabindex=""])`
pub fn focusable_selector() -> &'static SelectorList {
    &FOCUSABLE
}

/// Find the first focusable element within `root` (an element or a shadow
/// root).
///
/// The light tree is queried first, in document order. When nothing
/// matches, every descendant hosting an open shadow root is searched
/// recursively, again in document order, stopping at the first hit.
/// Closed shadow roots are opaque and never searched.
pub fn find_focusable_within(tree: &DomTree, root: NodeId) -> Option<NodeId> {
    if let Some(target) = tree.query_selector(root, focusable_selector()) {
        return Some(target);
    }

    tree.descendants(root)
        .into_iter()
        .filter_map(|host| tree.open_shadow_root(host))
        .find_map(|shadow| {
            tracing::trace!(?shadow, "searching shadow root for focus target");
            find_focusable_within(tree, shadow)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::ShadowRootMode;

    fn append(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
        let id = tree.create_element(tag);
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_selector_text() {
        assert_eq!(
            focusable_selector().to_string(),
            "button:not([disabled]), input:not([disabled]), keygen:not([disabled]), \
             select:not([disabled]), textarea:not([disabled]), \
             [tabindex]:not([disabled]):not([tabindex=\"\"])"
        );
    }

    #[test]
    fn test_finds_single_button() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let p = append(&mut tree, root, "p");
        let button = append(&mut tree, p, "button");

        assert_eq!(find_focusable_within(&tree, root), Some(button));
    }

    #[test]
    fn test_document_order_wins() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let section = append(&mut tree, root, "section");
        let tabbable = append(&mut tree, section, "span");
        tree.set_attribute(tabbable, "tabindex", "0").unwrap();
        append(&mut tree, root, "button");

        assert_eq!(find_focusable_within(&tree, root), Some(tabbable));
    }

    #[test]
    fn test_skips_disabled_and_empty_tabindex() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let disabled = append(&mut tree, root, "button");
        tree.set_attribute(disabled, "disabled", "").unwrap();
        let empty = append(&mut tree, root, "div");
        tree.set_attribute(empty, "tabindex", "").unwrap();

        assert_eq!(find_focusable_within(&tree, root), None);

        let input = append(&mut tree, root, "input");
        assert_eq!(find_focusable_within(&tree, root), Some(input));
    }

    #[test]
    fn test_root_itself_is_not_a_candidate() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "button");
        assert_eq!(find_focusable_within(&tree, root), None);
    }

    #[test]
    fn test_descends_into_nested_shadow_roots() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let outer_host = append(&mut tree, root, "media-theme");
        let outer_shadow = tree.attach_shadow(outer_host, ShadowRootMode::Open).unwrap();
        let inner_host = append(&mut tree, outer_shadow, "media-control-bar");
        let inner_shadow = tree.attach_shadow(inner_host, ShadowRootMode::Open).unwrap();
        let play = append(&mut tree, inner_shadow, "button");

        assert_eq!(find_focusable_within(&tree, root), Some(play));
    }

    #[test]
    fn test_light_tree_preferred_over_shadow() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let host = append(&mut tree, root, "mux-video");
        let shadow = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        append(&mut tree, shadow, "button");
        let light = append(&mut tree, root, "select");

        assert_eq!(find_focusable_within(&tree, root), Some(light));
    }

    #[test]
    fn test_shadow_hosts_searched_in_document_order() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let empty_host = append(&mut tree, root, "x-empty");
        let empty_shadow = tree.attach_shadow(empty_host, ShadowRootMode::Open).unwrap();
        append(&mut tree, empty_shadow, "p");
        let first_host = append(&mut tree, root, "x-first");
        let first_shadow = tree.attach_shadow(first_host, ShadowRootMode::Open).unwrap();
        let first = append(&mut tree, first_shadow, "textarea");
        let second_host = append(&mut tree, root, "x-second");
        let second_shadow = tree.attach_shadow(second_host, ShadowRootMode::Open).unwrap();
        append(&mut tree, second_shadow, "button");

        assert_eq!(find_focusable_within(&tree, root), Some(first));
    }

    #[test]
    fn test_nothing_focusable_anywhere() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let host = append(&mut tree, root, "x-host");
        let shadow = tree.attach_shadow(host, ShadowRootMode::Closed).unwrap();
        let nested = append(&mut tree, shadow, "x-nested");
        let nested_shadow = tree.attach_shadow(nested, ShadowRootMode::Open).unwrap();
        append(&mut tree, nested_shadow, "span");
        append(&mut tree, root, "p");

        assert_eq!(find_focusable_within(&tree, root), None);
    }

    #[test]
    fn test_closed_shadow_root_not_searched() {
        let mut tree = DomTree::new();
        let root = append(&mut tree, NodeId::ROOT, "div");
        let closed_host = append(&mut tree, root, "x-closed");
        let closed = tree.attach_shadow(closed_host, ShadowRootMode::Closed).unwrap();
        append(&mut tree, closed, "button");

        assert_eq!(find_focusable_within(&tree, root), None);

        let open_host = append(&mut tree, root, "x-open");
        let open = tree.attach_shadow(open_host, ShadowRootMode::Open).unwrap();
        let reachable = append(&mut tree, open, "input");
        assert_eq!(find_focusable_within(&tree, root), Some(reachable));
    }
}
