//! Record storage for the reference service double.
//!
//! [`ResourceStore`] is the seam handlers are generic over; [`InMemoryStore`]
//! is the process-lifetime implementation. Validation runs inside the store
//! under its write lock so that uniqueness and parent checks see the same
//! state the write commits to.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::Collection;
use crate::validation::{self, Mode, Relations};

/// One page of a collection listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records on this page, newest first.
    pub items: Vec<Value>,
    /// Number of records matching the filter across all pages.
    pub total: usize,
}

/// Storage operations needed by the handlers.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Returns a human-readable name for this store.
    fn backend_name(&self) -> &'static str;

    /// Validates and stores a new record, assigning its id.
    async fn create(&self, collection: Collection, fields: Map<String, Value>)
    -> StoreResult<Value>;

    /// Reads a record by id.
    async fn read(&self, collection: Collection, id: u64) -> StoreResult<Option<Value>>;

    /// Validates the provided fields and merges them into an existing record.
    async fn update(
        &self,
        collection: Collection,
        id: u64,
        fields: Map<String, Value>,
    ) -> StoreResult<Value>;

    /// Deletes a record and its dependents, returning how many were removed.
    async fn delete(&self, collection: Collection, id: u64) -> StoreResult<usize>;

    /// Lists records newest first, optionally only those under `parent`.
    async fn list(
        &self,
        collection: Collection,
        parent: Option<u64>,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Page>;

    /// Returns the number of records in a collection.
    async fn count(&self, collection: Collection) -> StoreResult<usize>;
}

type Table = BTreeMap<u64, Map<String, Value>>;

#[derive(Debug)]
struct Tables {
    next_id: u64,
    users: Table,
    posts: Table,
    comments: Table,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            next_id: 1,
            users: Table::new(),
            posts: Table::new(),
            comments: Table::new(),
        }
    }
}

impl Tables {
    fn table(&self, collection: Collection) -> &Table {
        match collection {
            Collection::Users => &self.users,
            Collection::Posts => &self.posts,
            Collection::Comments => &self.comments,
        }
    }

    fn table_mut(&mut self, collection: Collection) -> &mut Table {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Posts => &mut self.posts,
            Collection::Comments => &mut self.comments,
        }
    }

    fn remove_cascade(&mut self, collection: Collection, id: u64) -> usize {
        if self.table_mut(collection).remove(&id).is_none() {
            return 0;
        }
        let mut removed = 1;

        if let Some(child) = collection.child() {
            let field = child.parent().map(|(_, f)| f).unwrap_or_default();
            let orphans: Vec<u64> = self
                .table(child)
                .iter()
                .filter(|(_, record)| record.get(field).and_then(Value::as_u64) == Some(id))
                .map(|(child_id, _)| *child_id)
                .collect();
            for orphan in orphans {
                removed += self.remove_cascade(child, orphan);
            }
        }

        removed
    }
}

impl Relations for Tables {
    fn exists(&self, collection: Collection, id: u64) -> bool {
        self.table(collection).contains_key(&id)
    }

    fn email_taken(&self, collection: Collection, email: &str, except: Option<u64>) -> bool {
        self.table(collection).iter().any(|(id, record)| {
            Some(*id) != except
                && record
                    .get("email")
                    .and_then(Value::as_str)
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
        })
    }
}

/// Keeps the collection's known fields and stores parent references as numbers.
fn normalize(collection: Collection, fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(key, _)| collection.fields().contains(&key.as_str()))
        .map(|(key, value)| {
            let is_reference = collection.parent().is_some_and(|(_, f)| f == key);
            match validation::as_id(&value) {
                Some(id) if is_reference => (key, Value::from(id)),
                _ => (key, value),
            }
        })
        .collect()
}

fn with_id(id: u64, record: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    out.insert("id".to_string(), Value::from(id));
    out.extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
    Value::Object(out)
}

/// Process-lifetime store guarded by a read/write lock.
///
/// Ids come from one counter shared by every collection, so they are unique
/// across the whole store and never reused.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> StoreResult<Value> {
        let mut tables = self.tables.write();

        let violations = validation::check(collection, &fields, Mode::Create, &*tables);
        if !violations.is_empty() {
            return Err(StoreError::Invalid {
                collection,
                violations,
            });
        }

        let id = tables.next_id;
        tables.next_id += 1;
        let record = normalize(collection, fields);
        let stored = with_id(id, &record);
        tables.table_mut(collection).insert(id, record);

        debug!(%collection, id, "Stored record");
        Ok(stored)
    }

    async fn read(&self, collection: Collection, id: u64) -> StoreResult<Option<Value>> {
        let tables = self.tables.read();
        Ok(tables.table(collection).get(&id).map(|r| with_id(id, r)))
    }

    async fn update(
        &self,
        collection: Collection,
        id: u64,
        fields: Map<String, Value>,
    ) -> StoreResult<Value> {
        let mut tables = self.tables.write();

        if !tables.exists(collection, id) {
            return Err(StoreError::NotFound { collection, id });
        }

        let violations = validation::check(collection, &fields, Mode::Update { id }, &*tables);
        if !violations.is_empty() {
            return Err(StoreError::Invalid {
                collection,
                violations,
            });
        }

        let changes = normalize(collection, fields);
        let record = tables
            .table_mut(collection)
            .get_mut(&id)
            .ok_or(StoreError::NotFound { collection, id })?;
        record.extend(changes);
        Ok(with_id(id, record))
    }

    async fn delete(&self, collection: Collection, id: u64) -> StoreResult<usize> {
        let mut tables = self.tables.write();
        match tables.remove_cascade(collection, id) {
            0 => Err(StoreError::NotFound { collection, id }),
            removed => {
                debug!(%collection, id, removed, "Deleted record");
                Ok(removed)
            }
        }
    }

    async fn list(
        &self,
        collection: Collection,
        parent: Option<u64>,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Page> {
        let tables = self.tables.read();
        let parent_field = collection.parent().map(|(_, f)| f);

        let matching: Vec<(&u64, &Map<String, Value>)> = tables
            .table(collection)
            .iter()
            .rev()
            .filter(|(_, record)| match (parent, parent_field) {
                (Some(parent_id), Some(field)) => {
                    record.get(field).and_then(Value::as_u64) == Some(parent_id)
                }
                _ => true,
            })
            .collect();

        Ok(Page {
            total: matching.len(),
            items: matching
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(|(id, record)| with_id(*id, record))
                .collect(),
        })
    }

    async fn count(&self, collection: Collection) -> StoreResult<usize> {
        Ok(self.tables.read().table(collection).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    async fn seed_user(store: &InMemoryStore, email: &str) -> u64 {
        let user = store
            .create(
                Collection::Users,
                fields(json!({
                    "name": "Ann", "email": email, "gender": "female", "status": "active"
                })),
            )
            .await
            .unwrap();
        user["id"].as_u64().unwrap()
    }

    async fn seed_post(store: &InMemoryStore, user_id: u64) -> u64 {
        let post = store
            .create(
                Collection::Posts,
                fields(json!({"user_id": user_id, "title": "t", "body": "b"})),
            )
            .await
            .unwrap();
        post["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_ids_shared_across_collections() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let post = seed_post(&store, user).await;
        assert_eq!(user, 1);
        assert_eq!(post, 2);
    }

    #[tokio::test]
    async fn test_create_drops_unknown_fields_and_normalizes_reference() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let post = store
            .create(
                Collection::Posts,
                fields(json!({"user_id": user.to_string(), "title": "t", "body": "b", "x": 1})),
            )
            .await
            .unwrap();
        assert_eq!(post["user_id"], json!(user));
        assert!(post.get("x").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryStore::new();
        seed_user(&store, "dup@example.com").await;
        let err = store
            .create(
                Collection::Users,
                fields(json!({
                    "name": "B", "email": "DUP@example.com", "gender": "male", "status": "active"
                })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
        assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = InMemoryStore::new();
        let id = seed_user(&store, "a@example.com").await;
        let updated = store
            .update(Collection::Users, id, fields(json!({"name": "Renamed"})))
            .await
            .unwrap();
        assert_eq!(updated["name"], json!("Renamed"));
        assert_eq!(updated["email"], json!("a@example.com"));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryStore::new();
        let err = store
            .update(Collection::Users, 9, fields(json!({"name": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 9, .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let post = seed_post(&store, user).await;
        store
            .create(
                Collection::Comments,
                fields(json!({"post_id": post, "name": "n", "email": "c@example.com", "body": "b"})),
            )
            .await
            .unwrap();

        assert_eq!(store.delete(Collection::Users, user).await.unwrap(), 3);
        for collection in Collection::ALL {
            assert_eq!(store.count(collection).await.unwrap(), 0);
        }
        assert!(store.delete(Collection::Users, user).await.is_err());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filter() {
        let store = InMemoryStore::new();
        let a = seed_user(&store, "a@example.com").await;
        let b = seed_user(&store, "b@example.com").await;
        let p1 = seed_post(&store, a).await;
        let _p2 = seed_post(&store, b).await;
        let p3 = seed_post(&store, a).await;

        let page = store.list(Collection::Posts, Some(a), 0, 10).await.unwrap();
        assert_eq!(page.total, 2);
        let ids: Vec<u64> = page.items.iter().filter_map(|p| p["id"].as_u64()).collect();
        assert_eq!(ids, vec![p3, p1]);

        let page = store.list(Collection::Posts, None, 1, 1).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
    }
}
