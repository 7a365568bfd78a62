//! Write operations against the social graph.
//!
//! Person upserts use MERGE on the name key so re-adding an existing person
//! overwrites city and the custom attribute instead of duplicating the node.
//! Friendship edges are MERGEd on the *undirected* pattern, which is what
//! makes the relationship symmetric and duplicate-free: a repeat request
//! from either endpoint matches the existing edge in whichever direction it
//! was stored.
//!
//! The custom-attribute name is the only identifier interpolated into query
//! text; it is a validated [`sociograph_core::AttributeName`], never raw
//! input. Attribute values always travel as `$` parameters.

use chrono::Utc;
use neo4rs::query;

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    // ── Schema bootstrap ─────────────────────────────────────────

    /// Create the uniqueness constraint on Person.name and the lookup
    /// indexes on city and the custom attribute. All statements use
    /// `IF NOT EXISTS`, so this is safe on every startup.
    pub async fn ensure_schema(&self) -> Result<(), GraphError> {
        let attr = self.attribute_name();
        let statements = [
            "CREATE CONSTRAINT person_name_unique IF NOT EXISTS \
             FOR (p:Person) REQUIRE p.name IS UNIQUE"
                .to_string(),
            "CREATE INDEX person_city IF NOT EXISTS FOR (p:Person) ON (p.city)".to_string(),
            format!("CREATE INDEX person_{attr} IF NOT EXISTS FOR (p:Person) ON (p.{attr})"),
        ];

        for cypher in statements {
            self.run(query(&cypher)).await?;
        }
        tracing::debug!(attribute = %attr, "Schema ensured");
        Ok(())
    }

    // ── Persons ──────────────────────────────────────────────────

    /// Insert or update a person, keyed by name.
    pub async fn upsert_person(
        &self,
        name: &str,
        city: &str,
        custom_value: &str,
    ) -> Result<bool, GraphError> {
        let attr = self.attribute_name();
        let cypher = format!(
            "MERGE (p:Person {{name: $name}})
             ON CREATE SET p.created_at = $now
             SET p.city = $city, p.{attr} = $value, p.updated_at = $now
             RETURN p.name AS name"
        );

        let q = query(&cypher)
            .param("name", name.to_string())
            .param("city", city.to_string())
            .param("value", custom_value.to_string())
            .param("now", Utc::now().to_rfc3339());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Delete a person and all incident friendship edges.
    /// Returns the number of persons removed (0 or 1).
    pub async fn delete_person(&self, name: &str) -> Result<u64, GraphError> {
        let q = query(
            "MATCH (p:Person {name: $name})
             DETACH DELETE p
             RETURN count(p) AS deleted",
        )
        .param("name", name.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("deleted").unwrap_or(0) as u64),
            None => Ok(0),
        }
    }

    // ── Friendship ───────────────────────────────────────────────

    /// Create the single undirected FRIEND_OF edge between two persons.
    ///
    /// Self-friendship is rejected before any store round-trip. If either
    /// person is missing the MATCH yields no rows and the result is `false`.
    pub async fn create_friendship(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        if a == b {
            return Ok(false);
        }
        let q = query(
            "MATCH (pa:Person {name: $a}), (pb:Person {name: $b})
             MERGE (pa)-[:FRIEND_OF]-(pb)
             RETURN true AS ok",
        )
        .param("a", a.to_string())
        .param("b", b.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<bool>("ok").unwrap_or(false)),
            None => Ok(false),
        }
    }

    /// Delete the friendship edge between two persons, matching it in
    /// either direction. Returns the number of edges removed (0 or 1).
    pub async fn delete_friendship(&self, a: &str, b: &str) -> Result<u64, GraphError> {
        let q = query(
            "MATCH (:Person {name: $a})-[r:FRIEND_OF]-(:Person {name: $b})
             DELETE r
             RETURN count(r) AS deleted",
        )
        .param("a", a.to_string())
        .param("b", b.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("deleted").unwrap_or(0) as u64),
            None => Ok(0),
        }
    }
}
