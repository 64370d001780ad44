//! Resolved durability requirement
//!
//! Resolved once when an adapter instance initializes and copied into its
//! executor. It never changes afterwards.

use crate::level::{PersistenceLevel, ReplicationLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default persistence text (`couchbase.persistTo`)
pub const DEFAULT_PERSIST_TO: &str = "master";

/// Default replication text (`couchbase.replicateTo`)
pub const DEFAULT_REPLICATE_TO: &str = "0";

/// Durability levels a write must reach before it is acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurabilityRequirement {
    /// Persistence level
    pub persist_to: PersistenceLevel,
    /// Replication level
    pub replicate_to: ReplicationLevel,
}

impl DurabilityRequirement {
    /// No durability confirmation at all
    pub const NONE: DurabilityRequirement = DurabilityRequirement {
        persist_to: PersistenceLevel::None,
        replicate_to: ReplicationLevel::None,
    };

    /// Create a requirement from explicit levels
    pub fn new(persist_to: PersistenceLevel, replicate_to: ReplicationLevel) -> Self {
        Self {
            persist_to,
            replicate_to,
        }
    }

    /// True if neither level asks for confirmation
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Smallest cluster size that can satisfy this requirement
    ///
    /// Replication needs the master plus `replicas` other nodes; persistence
    /// needs `nodes` nodes.
    pub fn nodes_required(&self) -> usize {
        let for_replication = if self.replicate_to.replicas() > 0 {
            self.replicate_to.replicas() + 1
        } else {
            0
        };
        self.persist_to.nodes().max(for_replication).max(1)
    }
}

impl Default for DurabilityRequirement {
    fn default() -> Self {
        resolve(DEFAULT_PERSIST_TO, DEFAULT_REPLICATE_TO)
    }
}

impl fmt::Display for DurabilityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "persist_to={} replicate_to={}",
            self.persist_to, self.replicate_to
        )
    }
}

/// Resolve configuration text into a durability requirement
///
/// Never fails: unrecognized text resolves to `None` for that level.
///
/// # Examples
///
/// ```
/// use docbench_durability::{resolve, PersistenceLevel, ReplicationLevel};
///
/// let req = resolve("MASTER", "2");
/// assert_eq!(req.persist_to, PersistenceLevel::Master);
/// assert_eq!(req.replicate_to, ReplicationLevel::Two);
///
/// let req = resolve("sometimes", "0");
/// assert!(req.is_none());
/// ```
pub fn resolve(persist_to: &str, replicate_to: &str) -> DurabilityRequirement {
    DurabilityRequirement {
        persist_to: PersistenceLevel::parse(persist_to),
        replicate_to: ReplicationLevel::parse(replicate_to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_matches_configuration_defaults() {
        let req = DurabilityRequirement::default();
        assert_eq!(req.persist_to, PersistenceLevel::Master);
        assert_eq!(req.replicate_to, ReplicationLevel::None);
        assert!(!req.is_none());
    }

    #[test]
    fn test_resolve_levels() {
        let req = resolve("3", "1");
        assert_eq!(req, DurabilityRequirement::new(PersistenceLevel::Three, ReplicationLevel::One));
    }

    #[test]
    fn test_resolve_unknown_text_is_none() {
        let req = resolve("always", "all");
        assert!(req.is_none());
        assert_eq!(req, DurabilityRequirement::NONE);
    }

    #[test]
    fn test_nodes_required() {
        assert_eq!(DurabilityRequirement::NONE.nodes_required(), 1);
        assert_eq!(resolve("master", "0").nodes_required(), 1);
        assert_eq!(resolve("0", "1").nodes_required(), 2);
        assert_eq!(resolve("4", "1").nodes_required(), 4);
        assert_eq!(resolve("2", "3").nodes_required(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            resolve("master", "2").to_string(),
            "persist_to=master replicate_to=two"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let req = resolve("2", "1");
        let json = serde_json::to_string(&req).unwrap();
        let restored: DurabilityRequirement = serde_json::from_str(&json).unwrap();
        assert_eq!(req, restored);
    }

    proptest! {
        #[test]
        fn prop_resolve_is_total(persist in ".*", replicate in ".*") {
            let req = resolve(&persist, &replicate);
            prop_assert!(req.persist_to.nodes() <= 4);
            prop_assert!(req.replicate_to.replicas() <= 3);
        }

        #[test]
        fn prop_resolve_matches_level_parsers(persist in "[0-9a-zA-Z]{0,6}", replicate in "[0-9]{0,2}") {
            let req = resolve(&persist, &replicate);
            prop_assert_eq!(req.persist_to, PersistenceLevel::parse(&persist));
            prop_assert_eq!(req.replicate_to, ReplicationLevel::parse(&replicate));
        }
    }
}
