//! Shadow DOM
//!
//! Shadow roots are ordinary arena nodes whose parent link is empty; the
//! host is reachable through `ShadowRootData::host` instead.

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow root payload
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    pub host: NodeId,
    pub mode: ShadowRootMode,
}

impl ShadowRootData {
    /// Create shadow root data for `host`
    pub fn new(host: NodeId, mode: ShadowRootMode) -> Self {
        Self { host, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_root_data() {
        let shadow = ShadowRootData::new(NodeId(1), ShadowRootMode::Closed);
        assert_eq!(shadow.host, NodeId(1));
        assert_eq!(shadow.mode, ShadowRootMode::Closed);
    }
}
