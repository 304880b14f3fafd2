//! Renderer
//!
//! Reconciles a container's children against a [`VNode`] tree in place.
//! Nodes are matched by position: same tag keeps the node and patches its
//! attributes, anything else is replaced. Only attributes a previous render
//! set are ever removed, so attributes added by the elements themselves
//! (a dialog's `role`, for instance) survive re-renders.

use fos_dom::{DomResult, DomTree, NodeId};

use crate::vdom::VNode;

/// One attribute write made by a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub node: NodeId,
    pub name: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// What a render changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Every created element, parents before children
    pub inserted: Vec<NodeId>,
    /// Roots of the subtrees taken out of the tree
    pub removed: Vec<NodeId>,
    /// Attribute writes on nodes that were kept
    pub attributes: Vec<AttributeChange>,
    /// Text nodes whose content changed
    pub texts: Vec<NodeId>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.removed.is_empty()
            && self.attributes.is_empty()
            && self.texts.is_empty()
    }
}

/// Record of a committed node
#[derive(Debug, Clone)]
struct Rendered {
    node: NodeId,
    /// `None` for text nodes
    tag: Option<String>,
    /// Attribute names this render owns
    attrs: Vec<String>,
    children: Vec<Rendered>,
}

/// Render target holding what was committed last time
#[derive(Debug)]
pub struct RenderRoot {
    container: NodeId,
    committed: Option<Vec<Rendered>>,
}

impl RenderRoot {
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            committed: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Top-level nodes of the last render
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.committed
            .iter()
            .flatten()
            .map(|r| r.node)
            .collect()
    }

    /// Make the container's children match `content`.
    ///
    /// The first render clears whatever the container held before.
    pub fn render(&mut self, tree: &mut DomTree, content: &VNode) -> DomResult<Patch> {
        let mut patch = Patch::default();
        let mut committed = match self.committed.take() {
            Some(committed) => committed,
            None => {
                for child in tree.child_ids(self.container) {
                    tree.remove_child(self.container, child)?;
                    patch.removed.push(child);
                }
                Vec::new()
            }
        };
        reconcile_children(
            tree,
            self.container,
            &mut committed,
            std::slice::from_ref(content),
            &mut patch,
        )?;
        self.committed = Some(committed);

        tracing::trace!(
            inserted = patch.inserted.len(),
            removed = patch.removed.len(),
            attributes = patch.attributes.len(),
            "render committed"
        );
        Ok(patch)
    }
}

fn reconcile_children(
    tree: &mut DomTree,
    parent: NodeId,
    old: &mut Vec<Rendered>,
    new: &[VNode],
    patch: &mut Patch,
) -> DomResult<()> {
    for (index, vnode) in new.iter().enumerate() {
        if index >= old.len() {
            let built = build(tree, vnode, patch)?;
            tree.append_child(parent, built.node)?;
            old.push(built);
            continue;
        }

        let current = &mut old[index];
        if current.tag.as_deref() == vnode.tag() {
            update(tree, current, vnode, patch)?;
        } else {
            let built = build(tree, vnode, patch)?;
            tree.replace_child(parent, built.node, current.node)?;
            patch.removed.push(current.node);
            *current = built;
        }
    }

    for stale in old.drain(new.len()..) {
        tree.remove_child(parent, stale.node)?;
        patch.removed.push(stale.node);
    }
    Ok(())
}

fn update(
    tree: &mut DomTree,
    current: &mut Rendered,
    vnode: &VNode,
    patch: &mut Patch,
) -> DomResult<()> {
    match vnode {
        VNode::Text(content) => {
            if tree.text_content(current.node) != *content {
                tree.set_text(current.node, content)?;
                patch.texts.push(current.node);
            }
        }
        VNode::Element {
            attrs, children, ..
        } => {
            let node = current.node;
            for (name, value) in attrs {
                let old = tree.get_attribute(node, name).map(str::to_string);
                if old.as_deref() != Some(value.as_str()) {
                    tree.set_attribute(node, name, value)?;
                    patch.attributes.push(AttributeChange {
                        node,
                        name: name.clone(),
                        old,
                        new: Some(value.clone()),
                    });
                }
            }
            for name in &current.attrs {
                if attrs.iter().any(|(n, _)| n == name) {
                    continue;
                }
                if let Some(old) = tree.remove_attribute(node, name) {
                    patch.attributes.push(AttributeChange {
                        node,
                        name: name.clone(),
                        old: Some(old),
                        new: None,
                    });
                }
            }
            current.attrs = attrs.iter().map(|(n, _)| n.clone()).collect();
            reconcile_children(tree, node, &mut current.children, children, patch)?;
        }
    }
    Ok(())
}

fn build(tree: &mut DomTree, vnode: &VNode, patch: &mut Patch) -> DomResult<Rendered> {
    match vnode {
        VNode::Text(content) => Ok(Rendered {
            node: tree.create_text(content),
            tag: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }),
        VNode::Element {
            tag,
            attrs,
            children,
        } => {
            let node = tree.create_element(tag);
            for (name, value) in attrs {
                tree.set_attribute(node, name, value)?;
            }
            patch.inserted.push(node);
            let mut rendered_children = Vec::with_capacity(children.len());
            for child in children {
                let built = build(tree, child, patch)?;
                tree.append_child(node, built.node)?;
                rendered_children.push(built);
            }
            Ok(Rendered {
                node,
                tag: Some(tag.clone()),
                attrs: attrs.iter().map(|(n, _)| n.clone()).collect(),
                children: rendered_children,
            })
        }
    }
}
