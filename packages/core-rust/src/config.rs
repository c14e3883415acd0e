//! Node-level configuration consumed by the marshalling facade.

use crate::scoped::NodeNameSource;

/// Node-level configuration for the marshalling subsystem.
///
/// Carries the logical node name that scoped marshalling operations install
/// while they run. Richer runtime configuration (cluster membership,
/// storage, networking) lives with the components that own it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Logical name of this node. `None` for the default, unnamed node of a
    /// single-node deployment.
    pub node_name: Option<String>,
}

impl NodeConfig {
    /// Creates a configuration for a named node.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        NodeConfig {
            node_name: Some(name.into()),
        }
    }
}

impl NodeNameSource for NodeConfig {
    fn node_name(&self) -> Option<&str> {
        self.node_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_unnamed_node() {
        let cfg = NodeConfig::default();
        assert_eq!(cfg.node_name(), None);
    }

    #[test]
    fn named_config_exposes_its_name() {
        let cfg = NodeConfig::named("node-7");
        assert_eq!(cfg.node_name(), Some("node-7"));
    }
}
