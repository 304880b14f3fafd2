//! Virtual nodes
//!
//! A detached description of markup. Templates build these; the renderer
//! turns them into real nodes.

/// Virtual node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Element {
        tag: String,
        /// Attributes in emission order
        attrs: Vec<(String, String)>,
        children: Vec<VNode>,
    },
    Text(String),
}

/// Start an element
pub fn h(tag: &str) -> VNode {
    VNode::Element {
        tag: tag.to_ascii_lowercase(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// Text node
pub fn text(content: impl Into<String>) -> VNode {
    VNode::Text(content.into())
}

impl VNode {
    /// Set an attribute, replacing an earlier value of the same name
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let VNode::Element { attrs, .. } = &mut self {
            let name = name.to_ascii_lowercase();
            let value = value.into();
            match attrs.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name, value)),
            }
        }
        self
    }

    /// Presence attribute, emitted as `name=""` when `present`
    pub fn bool_attr(self, name: &str, present: bool) -> Self {
        if present { self.attr(name, "") } else { self }
    }

    /// Attribute emitted only when a value is given
    pub fn attr_opt<S: Into<String>>(self, name: &str, value: Option<S>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn child(mut self, child: VNode) -> Self {
        if let VNode::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, more: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element { children, .. } = &mut self {
            children.extend(more);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text(_) => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            VNode::Text(_) => None,
        }
    }

    /// Child nodes (empty for text)
    pub fn child_nodes(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let node = h("DIV")
            .attr("id", "a")
            .bool_attr("hidden", true)
            .bool_attr("open", false)
            .attr_opt("title", None::<String>)
            .attr("id", "b")
            .child(text("hi"));
        assert_eq!(node.tag(), Some("div"));
        assert_eq!(node.get_attr("id"), Some("b"));
        assert_eq!(node.get_attr("hidden"), Some(""));
        assert_eq!(node.get_attr("open"), None);
        assert_eq!(node.child_nodes(), &[VNode::Text("hi".into())]);
    }
}
