//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the media components: elements, text,
//! shadow roots, a small selector engine, focus state and the custom
//! element registry.

mod attributes;
mod custom_elements;
mod document;
mod dom_events;
mod node;
mod operations;
mod selector;
mod serialize;
mod shadow;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use custom_elements::{CustomElementDefinition, CustomElementError, CustomElementRegistry};
pub use document::Document;
pub use dom_events::{DomEvent, DomEventType};
pub use node::{ElementData, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use selector::{AttrSelector, Compound, SelectorError, SelectorList};
pub use serialize::{inner_html, outer_html};
pub use shadow::{ShadowRootData, ShadowRootMode};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
