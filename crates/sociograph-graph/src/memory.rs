//! In-memory implementation of the store contract.
//!
//! An adjacency-map substitute for Neo4j: persons in a name-keyed map,
//! friendships as a set of unordered name pairs. Used by the contract tests
//! and by `--memory` console sessions. BTree containers give the
//! name-ascending ordering the contract requires for free.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use sociograph_core::{AttributeName, GraphStats, PersonRecord};

use crate::client::GraphError;
use crate::store::SocialStore;

#[derive(Debug, Clone)]
struct PersonData {
    city: String,
    custom: String,
}

#[derive(Debug, Default)]
struct Inner {
    persons: BTreeMap<String, PersonData>,
    /// Unordered pairs stored lexicographically (small, large), so both
    /// argument orders address the same edge.
    edges: BTreeSet<(String, String)>,
}

/// In-process social store, interior-mutable behind a mutex.
#[derive(Debug)]
pub struct MemoryStore {
    attribute: AttributeName,
    inner: Mutex<Inner>,
}

fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl MemoryStore {
    pub fn new(attribute: AttributeName) -> Self {
        Self {
            attribute,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Poisoning only records that a panic happened while the lock was
    /// held; the map and edge set remain structurally valid, so recover
    /// the guard instead of panicking again.
    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Shared filter for both recommendation flavors: every person whose
    /// `key` projection equals the subject's, minus the subject, minus
    /// anyone already connected by an edge.
    fn recommend_by<F>(&self, name: &str, key: F) -> Vec<String>
    where
        F: Fn(&PersonData) -> &str,
    {
        let inner = self.locked();
        let Some(subject) = inner.persons.get(name) else {
            return Vec::new();
        };
        let wanted = key(subject).to_string();
        let mut suggestions = Vec::new();
        for (candidate, data) in &inner.persons {
            if candidate == name || key(data) != wanted {
                continue;
            }
            if inner.edges.contains(&edge_key(name, candidate)) {
                continue;
            }
            suggestions.push(candidate.clone());
        }
        suggestions
    }
}

impl SocialStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), GraphError> {
        // Uniqueness is structural here: the map key is the name.
        Ok(())
    }

    async fn upsert_person(
        &self,
        name: &str,
        city: &str,
        custom_value: &str,
    ) -> Result<bool, GraphError> {
        let mut inner = self.locked();
        inner.persons.insert(
            name.to_string(),
            PersonData {
                city: city.to_string(),
                custom: custom_value.to_string(),
            },
        );
        Ok(true)
    }

    async fn list_persons(&self) -> Result<Vec<PersonRecord>, GraphError> {
        let inner = self.locked();
        Ok(inner
            .persons
            .iter()
            .map(|(name, data)| PersonRecord {
                name: name.clone(),
                city: data.city.clone(),
                custom: data.custom.clone(),
            })
            .collect())
    }

    async fn get_person(&self, name: &str) -> Result<Option<PersonRecord>, GraphError> {
        let inner = self.locked();
        Ok(inner.persons.get(name).map(|data| PersonRecord {
            name: name.to_string(),
            city: data.city.clone(),
            custom: data.custom.clone(),
        }))
    }

    async fn delete_person(&self, name: &str) -> Result<u64, GraphError> {
        let mut inner = self.locked();
        if inner.persons.remove(name).is_none() {
            return Ok(0);
        }
        // detach: drop every edge touching this person
        inner
            .edges
            .retain(|(a, b)| a.as_str() != name && b.as_str() != name);
        Ok(1)
    }

    async fn create_friendship(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        if a == b {
            return Ok(false);
        }
        let mut inner = self.locked();
        if !inner.persons.contains_key(a) || !inner.persons.contains_key(b) {
            return Ok(false);
        }
        inner.edges.insert(edge_key(a, b));
        Ok(true)
    }

    async fn delete_friendship(&self, a: &str, b: &str) -> Result<u64, GraphError> {
        let mut inner = self.locked();
        Ok(u64::from(inner.edges.remove(&edge_key(a, b))))
    }

    async fn list_friends(&self, name: &str) -> Result<Vec<String>, GraphError> {
        let inner = self.locked();
        let mut friends: Vec<String> = inner
            .edges
            .iter()
            .filter_map(|(a, b)| {
                if a == name {
                    Some(b.clone())
                } else if b == name {
                    Some(a.clone())
                } else {
                    None
                }
            })
            .collect();
        friends.sort();
        Ok(friends)
    }

    async fn recommend_by_city(&self, name: &str) -> Result<Vec<String>, GraphError> {
        Ok(self.recommend_by(name, |data| &data.city))
    }

    async fn recommend_by_attribute(&self, name: &str) -> Result<Vec<String>, GraphError> {
        Ok(self.recommend_by(name, |data| &data.custom))
    }

    async fn stats(&self) -> Result<GraphStats, GraphError> {
        let inner = self.locked();
        Ok(GraphStats {
            persons: inner.persons.len() as u64,
            friendships: inner.edges.len() as u64,
        })
    }

    fn attribute(&self) -> &AttributeName {
        &self.attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(AttributeName::new("hobby").unwrap())
    }

    async fn seed(store: &MemoryStore) {
        store.upsert_person("Ana", "Madrid", "chess").await.unwrap();
        store.upsert_person("Bea", "Madrid", "tennis").await.unwrap();
        store.upsert_person("Caz", "Bilbao", "chess").await.unwrap();
    }

    #[tokio::test]
    async fn upsert_is_idempotent_on_name_with_last_write_wins() {
        let store = store();
        assert!(store.upsert_person("Ana", "Madrid", "chess").await.unwrap());
        assert!(store.upsert_person("Ana", "Bilbao", "tennis").await.unwrap());

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.persons, 1);

        let ana = store.get_person("Ana").await.unwrap().unwrap();
        assert_eq!(ana.city, "Bilbao");
        assert_eq!(ana.custom, "tennis");
    }

    #[tokio::test]
    async fn get_person_missing_is_none() {
        let store = store();
        assert!(store.get_person("Nadie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_persons_sorted_by_name() {
        let store = store();
        store.upsert_person("Caz", "Bilbao", "chess").await.unwrap();
        store.upsert_person("Ana", "Madrid", "chess").await.unwrap();
        store.upsert_person("Bea", "Madrid", "tennis").await.unwrap();

        let names: Vec<String> = store
            .list_persons()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bea", "Caz"]);
    }

    #[tokio::test]
    async fn duplicate_friendship_collapses_to_one_edge() {
        let store = store();
        seed(&store).await;

        assert!(store.create_friendship("Ana", "Bea").await.unwrap());
        assert!(store.create_friendship("Bea", "Ana").await.unwrap());

        assert_eq!(store.stats().await.unwrap().friendships, 1);
        assert_eq!(store.list_friends("Ana").await.unwrap(), vec!["Bea"]);
        assert_eq!(store.list_friends("Bea").await.unwrap(), vec!["Ana"]);
    }

    #[tokio::test]
    async fn self_friendship_is_rejected() {
        let store = store();
        seed(&store).await;

        assert!(!store.create_friendship("Ana", "Ana").await.unwrap());
        assert_eq!(store.stats().await.unwrap().friendships, 0);
    }

    #[tokio::test]
    async fn friendship_with_missing_person_is_refused() {
        let store = store();
        seed(&store).await;

        assert!(!store.create_friendship("Ana", "Nadie").await.unwrap());
        assert!(!store.create_friendship("Nadie", "Ana").await.unwrap());
        assert_eq!(store.stats().await.unwrap().friendships, 0);
    }

    #[tokio::test]
    async fn delete_friendship_ignores_argument_order() {
        let store = store();
        seed(&store).await;
        store.create_friendship("Ana", "Bea").await.unwrap();

        assert_eq!(store.delete_friendship("Bea", "Ana").await.unwrap(), 1);
        assert_eq!(store.delete_friendship("Ana", "Bea").await.unwrap(), 0);
        assert_eq!(store.stats().await.unwrap().friendships, 0);
    }

    #[tokio::test]
    async fn delete_person_cascades_to_edges() {
        let store = store();
        seed(&store).await;
        store.create_friendship("Ana", "Bea").await.unwrap();
        store.create_friendship("Ana", "Caz").await.unwrap();

        assert_eq!(store.delete_person("Ana").await.unwrap(), 1);
        assert_eq!(store.delete_person("Ana").await.unwrap(), 0);

        assert!(store.list_friends("Bea").await.unwrap().is_empty());
        assert!(store.list_friends("Caz").await.unwrap().is_empty());
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.persons, 2);
        assert_eq!(stats.friendships, 0);
    }

    #[tokio::test]
    async fn recommendations_exclude_self_and_friends() {
        let store = store();
        seed(&store).await;

        assert_eq!(store.recommend_by_city("Ana").await.unwrap(), vec!["Bea"]);
        assert_eq!(
            store.recommend_by_attribute("Ana").await.unwrap(),
            vec!["Caz"]
        );

        store.create_friendship("Ana", "Bea").await.unwrap();
        assert!(store.recommend_by_city("Ana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recommendations_for_missing_person_are_empty() {
        let store = store();
        seed(&store).await;
        assert!(store.recommend_by_city("Nadie").await.unwrap().is_empty());
        assert!(store
            .recommend_by_attribute("Nadie")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn store_survives_a_panic_while_locked() {
        let store = store();
        seed(&store).await;

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.lock().unwrap();
            panic!("mid-operation panic");
        }));
        assert!(poisoned.is_err());

        // The guard recovery keeps the store usable afterwards.
        assert!(store.create_friendship("Ana", "Bea").await.unwrap());
        assert_eq!(store.stats().await.unwrap().persons, 3);
    }

    #[tokio::test]
    async fn stats_after_worked_example() {
        let store = store();
        seed(&store).await;
        store.create_friendship("Ana", "Bea").await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.persons, 3);
        assert_eq!(stats.friendships, 1);
    }
}
