//! Read operations against the social graph.
//!
//! Friend listing and the recommendation exclusions traverse FRIEND_OF
//! without a direction constraint, so an edge is seen no matter which
//! endpoint created it. Recommendations are a plain set difference: all
//! same-attribute persons minus self minus current friends, name-sorted.

use neo4rs::query;

use sociograph_core::{AttributeName, GraphStats, PersonRecord};

use crate::client::{GraphClient, GraphError};
use crate::store::SocialStore;

impl GraphClient {
    // ── Persons ──────────────────────────────────────────────────

    /// All persons, sorted by name.
    pub async fn list_persons(&self) -> Result<Vec<PersonRecord>, GraphError> {
        let attr = self.attribute_name();
        let cypher = format!(
            "MATCH (p:Person)
             RETURN p.name AS name, p.city AS city, p.{attr} AS custom
             ORDER BY name"
        );

        let rows = self.query_rows(query(&cypher)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(row_to_person(&row)?);
        }
        Ok(results)
    }

    /// Look up a single person by name.
    pub async fn get_person(&self, name: &str) -> Result<Option<PersonRecord>, GraphError> {
        let attr = self.attribute_name();
        let cypher = format!(
            "MATCH (p:Person {{name: $name}})
             RETURN p.name AS name, p.city AS city, p.{attr} AS custom
             LIMIT 1"
        );

        let q = query(&cypher).param("name", name.to_string());
        match self.query_one(q).await? {
            Some(row) => Ok(Some(row_to_person(&row)?)),
            None => Ok(None),
        }
    }

    // ── Friends ──────────────────────────────────────────────────

    /// Names of all friends of `name`, traversing the edge in either
    /// direction, sorted ascending.
    pub async fn list_friends(&self, name: &str) -> Result<Vec<String>, GraphError> {
        let q = query(
            "MATCH (:Person {name: $name})-[:FRIEND_OF]-(f:Person)
             RETURN f.name AS friend
             ORDER BY friend",
        )
        .param("name", name.to_string());

        let rows = self.query_rows(q).await?;
        collect_names(rows, "friend")
    }

    // ── Recommendations ──────────────────────────────────────────

    /// Persons in the same city, excluding self and current friends.
    pub async fn recommend_by_city(&self, name: &str) -> Result<Vec<String>, GraphError> {
        let q = query(
            "MATCH (p:Person {name: $name})
             MATCH (candidate:Person {city: p.city})
             WHERE candidate <> p AND NOT (p)-[:FRIEND_OF]-(candidate)
             RETURN candidate.name AS suggestion
             ORDER BY suggestion",
        )
        .param("name", name.to_string());

        let rows = self.query_rows(q).await?;
        collect_names(rows, "suggestion")
    }

    /// Persons sharing the custom-attribute value, same exclusions.
    pub async fn recommend_by_attribute(&self, name: &str) -> Result<Vec<String>, GraphError> {
        let attr = self.attribute_name();
        let cypher = format!(
            "MATCH (p:Person {{name: $name}})
             MATCH (candidate:Person)
             WHERE candidate <> p
               AND p.{attr} = candidate.{attr}
               AND NOT (p)-[:FRIEND_OF]-(candidate)
             RETURN candidate.name AS suggestion
             ORDER BY suggestion"
        );

        let q = query(&cypher).param("name", name.to_string());
        let rows = self.query_rows(q).await?;
        collect_names(rows, "suggestion")
    }

    // ── Stats ────────────────────────────────────────────────────

    /// Total person nodes and friendship edges.
    ///
    /// The edge count matches a *directed* pattern: an undirected match
    /// visits every relationship twice, once per direction, which would
    /// report double the real friendship count.
    pub async fn stats(&self) -> Result<GraphStats, GraphError> {
        let persons = self.count_single("MATCH (p:Person) RETURN count(p) AS c").await?;
        let friendships = self
            .count_single("MATCH ()-[r:FRIEND_OF]->() RETURN count(r) AS c")
            .await?;
        Ok(GraphStats {
            persons,
            friendships,
        })
    }

    async fn count_single(&self, cypher: &str) -> Result<u64, GraphError> {
        match self.query_one(query(cypher)).await? {
            Some(row) => Ok(row.get::<i64>("c").unwrap_or(0) as u64),
            None => Ok(0),
        }
    }
}

fn row_to_person(row: &neo4rs::Row) -> Result<PersonRecord, GraphError> {
    let name: String = row
        .get("name")
        .map_err(|e| GraphError::Serialization(format!("Failed to read person name: {e}")))?;
    // city and the custom value may be absent on nodes written under a
    // different attribute configuration
    let city: String = row.get("city").unwrap_or_default();
    let custom: String = row.get("custom").unwrap_or_default();
    Ok(PersonRecord { name, city, custom })
}

fn collect_names(rows: Vec<neo4rs::Row>, column: &str) -> Result<Vec<String>, GraphError> {
    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row
            .get(column)
            .map_err(|e| GraphError::Serialization(format!("Failed to read {column}: {e}")))?;
        names.push(name);
    }
    Ok(names)
}

// The trait impl simply forwards to the inherent methods above and in
// mutations.rs; the concrete client keeps its own callable surface.
impl SocialStore for GraphClient {
    async fn ensure_schema(&self) -> Result<(), GraphError> {
        GraphClient::ensure_schema(self).await
    }

    async fn upsert_person(
        &self,
        name: &str,
        city: &str,
        custom_value: &str,
    ) -> Result<bool, GraphError> {
        GraphClient::upsert_person(self, name, city, custom_value).await
    }

    async fn list_persons(&self) -> Result<Vec<PersonRecord>, GraphError> {
        GraphClient::list_persons(self).await
    }

    async fn get_person(&self, name: &str) -> Result<Option<PersonRecord>, GraphError> {
        GraphClient::get_person(self, name).await
    }

    async fn delete_person(&self, name: &str) -> Result<u64, GraphError> {
        GraphClient::delete_person(self, name).await
    }

    async fn create_friendship(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        GraphClient::create_friendship(self, a, b).await
    }

    async fn delete_friendship(&self, a: &str, b: &str) -> Result<u64, GraphError> {
        GraphClient::delete_friendship(self, a, b).await
    }

    async fn list_friends(&self, name: &str) -> Result<Vec<String>, GraphError> {
        GraphClient::list_friends(self, name).await
    }

    async fn recommend_by_city(&self, name: &str) -> Result<Vec<String>, GraphError> {
        GraphClient::recommend_by_city(self, name).await
    }

    async fn recommend_by_attribute(&self, name: &str) -> Result<Vec<String>, GraphError> {
        GraphClient::recommend_by_attribute(self, name).await
    }

    async fn stats(&self) -> Result<GraphStats, GraphError> {
        GraphClient::stats(self).await
    }

    fn attribute(&self) -> &AttributeName {
        self.attribute_name()
    }
}
