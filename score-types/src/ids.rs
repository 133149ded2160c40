//! Radio endpoint addresses for the two scoring units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipe addresses for the two nodes sharing a scoreboard link.
pub const PIPES: [NodeAddress; 2] = [
    NodeAddress::new(0xF0F0_F0F0_E1),
    NodeAddress::new(0xF0F0_F0F0_D2),
];

/// A fixed point-to-point endpoint address.
///
/// Only the low 40 bits are used on air.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress(u64);

impl NodeAddress {
    /// Create an address from its raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#012X}", self.0)
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeAddress({})", self)
    }
}

/// Which end of the link a unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Writes on `PIPES[0]`.
    #[default]
    Primary,
    /// Writes on `PIPES[1]`.
    Secondary,
}

impl NodeRole {
    /// This node's own address.
    pub fn address(self) -> NodeAddress {
        match self {
            NodeRole::Primary => PIPES[0],
            NodeRole::Secondary => PIPES[1],
        }
    }

    /// The role on the other end of the link.
    pub fn peer(self) -> NodeRole {
        match self {
            NodeRole::Primary => NodeRole::Secondary,
            NodeRole::Secondary => NodeRole::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_distinct_pipes() {
        assert_eq!(NodeRole::Primary.address(), PIPES[0]);
        assert_eq!(NodeRole::Secondary.address(), PIPES[1]);
        assert_ne!(PIPES[0], PIPES[1]);
    }

    #[test]
    fn peer_is_symmetric() {
        assert_eq!(NodeRole::Primary.peer(), NodeRole::Secondary);
        assert_eq!(NodeRole::Primary.peer().peer(), NodeRole::Primary);
        assert_eq!(
            NodeRole::Secondary.peer().address(),
            NodeRole::Primary.address()
        );
    }

    #[test]
    fn address_display_is_hex() {
        assert_eq!(PIPES[0].to_string(), "0xF0F0F0F0E1");
        assert_eq!(PIPES[1].to_string(), "0xF0F0F0F0D2");
    }

    #[test]
    fn role_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            role: NodeRole,
        }
        let w: Wrapper = serde_json::from_str(r#"{"role":"secondary"}"#).unwrap();
        assert_eq!(w.role, NodeRole::Secondary);
    }
}
