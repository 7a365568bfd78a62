//! sociograph-graph: the graph access layer.
//!
//! All reads and writes against the social graph flow through this crate.
//! The operation surface is the [`SocialStore`] trait; [`GraphClient`]
//! implements it against Neo4j over Bolt, [`MemoryStore`] implements it
//! against an in-process adjacency map for tests and offline runs.

pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphError};
pub use memory::MemoryStore;
pub use store::SocialStore;
