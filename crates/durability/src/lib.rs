//! Durability requirements for docbench writes
//!
//! Every insert, replace and remove is issued with a [`DurabilityRequirement`]:
//! the store only acknowledges the write once both levels are confirmed, or
//! raises a durability timeout.
//!
//! | Level | Meaning |
//! |-------|---------|
//! | [`PersistenceLevel`] | Nodes (or the master) that must have the write on disk |
//! | [`ReplicationLevel`] | Replica nodes that must have received the write |
//!
//! The requirement is resolved once per adapter instance from configuration
//! text with [`resolve`]. Resolution is total: unrecognized text falls back to
//! `None` for that level.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod level; // Persistence and replication levels
pub mod requirement; // Resolved requirement and text resolution

pub use level::{PersistenceLevel, ReplicationLevel};
pub use requirement::{resolve, DurabilityRequirement, DEFAULT_PERSIST_TO, DEFAULT_REPLICATE_TO};
