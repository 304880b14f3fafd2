//! DOM Events
//!
//! Focus change notifications recorded by the document.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventType {
    /// Element received focus
    Focus,
    /// Element lost focus
    Blur,
}

impl DomEventType {
    /// Event name as seen by listeners
    pub fn name(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }
}

/// DOM event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    /// The other side of the focus change, if any
    pub related_target: Option<NodeId>,
}

impl DomEvent {
    /// Create focus event
    pub fn focus(target: NodeId, related_target: Option<NodeId>) -> Self {
        Self {
            event_type: DomEventType::Focus,
            target,
            related_target,
        }
    }

    /// Create blur event
    pub fn blur(target: NodeId, related_target: Option<NodeId>) -> Self {
        Self {
            event_type: DomEventType::Blur,
            target,
            related_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_event() {
        let event = DomEvent::focus(NodeId(5), Some(NodeId(1)));
        assert_eq!(event.event_type, DomEventType::Focus);
        assert_eq!(event.event_type.name(), "focus");
        assert_eq!(event.related_target, Some(NodeId(1)));
    }
}
