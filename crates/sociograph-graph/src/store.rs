//! The operation surface of the graph access layer.
//!
//! Every store operation is a single request/response against store-held
//! state; nothing is cached in-process between calls. "Not found" is a value
//! (`None`, `0`, `false`), never an error — errors mean the store itself
//! failed.

use sociograph_core::{AttributeName, GraphStats, PersonRecord};

use crate::client::GraphError;

/// The social-graph operation contract.
///
/// Implemented by [`crate::GraphClient`] against Neo4j and by
/// [`crate::MemoryStore`] against an in-process adjacency map. Both must
/// satisfy the same observable behavior:
///
/// - person names are unique; `upsert_person` is insert-or-overwrite
/// - friendship is symmetric and duplicate-free per unordered pair
/// - deleting a person removes its friendship edges
/// - all list results are sorted by name ascending
#[allow(async_fn_in_trait)]
pub trait SocialStore {
    /// Idempotently create the uniqueness constraint and lookup indexes.
    /// Safe to call on every startup.
    async fn ensure_schema(&self) -> Result<(), GraphError>;

    /// Insert a person, or overwrite city and custom value if the name
    /// already exists.
    async fn upsert_person(
        &self,
        name: &str,
        city: &str,
        custom_value: &str,
    ) -> Result<bool, GraphError>;

    /// All persons, sorted by name ascending.
    async fn list_persons(&self) -> Result<Vec<PersonRecord>, GraphError>;

    async fn get_person(&self, name: &str) -> Result<Option<PersonRecord>, GraphError>;

    /// Delete a person and all of its friendship edges.
    /// Returns how many persons were removed (0 or 1).
    async fn delete_person(&self, name: &str) -> Result<u64, GraphError>;

    /// Create the single undirected friendship edge between `a` and `b`.
    ///
    /// Returns `false` without touching the store when `a == b`. Also
    /// returns `false` when either endpoint does not exist — the "missing
    /// person" and "nothing happened" signals are deliberately merged, the
    /// console prints the same message for both. Idempotent: repeat calls
    /// from either endpoint collapse onto the same edge.
    async fn create_friendship(&self, a: &str, b: &str) -> Result<bool, GraphError>;

    /// Delete the friendship between `a` and `b`, regardless of which side
    /// was named first at creation. Returns how many edges were removed
    /// (0 or 1).
    async fn delete_friendship(&self, a: &str, b: &str) -> Result<u64, GraphError>;

    /// Names of all friends of `name`, sorted ascending.
    async fn list_friends(&self, name: &str) -> Result<Vec<String>, GraphError>;

    /// Persons in the same city as `name`, excluding `name` itself and its
    /// current friends. Sorted ascending; no ranking beyond the filter.
    async fn recommend_by_city(&self, name: &str) -> Result<Vec<String>, GraphError>;

    /// Same exclusions as [`Self::recommend_by_city`], matching on equality
    /// of the configured custom attribute instead of city.
    async fn recommend_by_attribute(&self, name: &str) -> Result<Vec<String>, GraphError>;

    /// Total persons and friendships. Each undirected edge counts once.
    async fn stats(&self) -> Result<GraphStats, GraphError>;

    /// The custom-attribute name this store was configured with.
    fn attribute(&self) -> &AttributeName;
}
