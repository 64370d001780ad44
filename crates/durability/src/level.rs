//! Persistence and replication levels
//!
//! Levels are parsed permissively: any text that is not recognized resolves
//! to `None` instead of failing, so a typo in the configuration silently
//! disables that half of the requirement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many nodes must have persisted a write to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PersistenceLevel {
    /// No persistence confirmation; acknowledged once in memory on the master
    None,
    /// Persisted on the master node
    Master,
    /// Persisted on at least one node
    One,
    /// Persisted on at least two nodes
    Two,
    /// Persisted on at least three nodes
    Three,
    /// Persisted on at least four nodes
    Four,
}

impl PersistenceLevel {
    /// Parse configuration text
    ///
    /// `"master"` (any ASCII case) maps to `Master`, `"1"`..`"4"` map to
    /// `One`..`Four`. Everything else maps to `None`. Case folding is ASCII
    /// only; no non-ASCII character lowercases into `"master"`, so this
    /// accepts the same inputs as full Unicode lowercasing would.
    pub fn parse(text: &str) -> Self {
        if text.eq_ignore_ascii_case("master") {
            return PersistenceLevel::Master;
        }
        match text {
            "1" => PersistenceLevel::One,
            "2" => PersistenceLevel::Two,
            "3" => PersistenceLevel::Three,
            "4" => PersistenceLevel::Four,
            _ => PersistenceLevel::None,
        }
    }

    /// Number of nodes that must confirm persistence
    pub fn nodes(&self) -> usize {
        match self {
            PersistenceLevel::None => 0,
            PersistenceLevel::Master | PersistenceLevel::One => 1,
            PersistenceLevel::Two => 2,
            PersistenceLevel::Three => 3,
            PersistenceLevel::Four => 4,
        }
    }

    /// Lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistenceLevel::None => "none",
            PersistenceLevel::Master => "master",
            PersistenceLevel::One => "one",
            PersistenceLevel::Two => "two",
            PersistenceLevel::Three => "three",
            PersistenceLevel::Four => "four",
        }
    }
}

impl fmt::Display for PersistenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many replicas must have received a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReplicationLevel {
    /// No replication confirmation
    None,
    /// Received by at least one replica
    One,
    /// Received by at least two replicas
    Two,
    /// Received by at least three replicas
    Three,
}

impl ReplicationLevel {
    /// Parse configuration text
    ///
    /// `"1"`..`"3"` map to `One`..`Three`. Everything else, `"0"` included,
    /// maps to `None`.
    pub fn parse(text: &str) -> Self {
        match text {
            "1" => ReplicationLevel::One,
            "2" => ReplicationLevel::Two,
            "3" => ReplicationLevel::Three,
            _ => ReplicationLevel::None,
        }
    }

    /// Number of replicas that must confirm
    pub fn replicas(&self) -> usize {
        match self {
            ReplicationLevel::None => 0,
            ReplicationLevel::One => 1,
            ReplicationLevel::Two => 2,
            ReplicationLevel::Three => 3,
        }
    }

    /// Lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicationLevel::None => "none",
            ReplicationLevel::One => "one",
            ReplicationLevel::Two => "two",
            ReplicationLevel::Three => "three",
        }
    }
}

impl fmt::Display for ReplicationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
