//! Record Store — in-memory collections of records keyed by string id.
//!
//! Every collection owns its own `RwLock`, so single-record operations
//! (`save`, `update`, `insert_unless`) are atomic. Sequences that touch more
//! than one collection are not: a candidate may exist without a scoring result.
//!
//! Records are handed out as clones. Mutating a returned record has no effect
//! until it is passed back through `save` or changed via `update`.

pub mod seed;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::assessment::{Assessment, Interview};
use crate::models::candidate::{Candidate, ScoringResult};
use crate::models::job::JobPost;
use crate::models::user::{Organization, User};

/// Identity and timestamps shared by every stored record.
/// Flattened into each record's JSON representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Metadata for a record that has not been saved yet. `save` assigns the id.
    pub fn pending() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Metadata with a caller-chosen id (built-in organizations, demo records).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::pending()
        }
    }
}

pub trait Record: Clone + Send + Sync + 'static {
    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

struct CollectionInner<T> {
    /// Insertion order of ids; drives `find` ordering.
    order: Vec<String>,
    records: HashMap<String, T>,
}

impl<T: Record> CollectionInner<T> {
    fn put(&mut self, mut record: T) -> T {
        let now = Utc::now();
        let meta = record.meta_mut();
        if meta.id.is_empty() {
            meta.id = generate_id();
            meta.created_at = now;
        }
        meta.updated_at = now;

        let id = meta.id.clone();
        if !self.records.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.records.insert(id, record.clone());
        record
    }

    fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

/// A single named collection of records.
pub struct Collection<T> {
    name: &'static str,
    inner: RwLock<CollectionInner<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(CollectionInner {
                order: Vec::new(),
                records: HashMap::new(),
            }),
        }
    }

    /// Assigns an id if absent, stamps `created_at` on first save and
    /// `updated_at` always, then stores the record (last write wins).
    pub async fn save(&self, record: T) -> T {
        let saved = self.inner.write().await.put(record);
        debug!(collection = self.name, id = saved.id(), "record saved");
        saved
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.inner.read().await.records.get(id).cloned()
    }

    /// Full scan in insertion order.
    pub async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }

    pub async fn find_one<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .iter()
            .find(|r| predicate(*r))
            .cloned()
    }

    #[cfg(test)]
    pub async fn all(&self) -> Vec<T> {
        self.find(|_| true).await
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Read-modify-write under the write lock. Returns `None` when `id` is absent.
    pub async fn update<F>(&self, id: &str, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        let mut record = inner.records.get(id).cloned()?;
        mutate(&mut record);
        // The mutation must not re-key the record.
        record.meta_mut().id = id.to_string();
        Some(inner.put(record))
    }

    /// Saves `record` unless an existing record matches `conflict`.
    /// The check and the insert happen under one write lock.
    pub async fn insert_unless<F>(&self, record: T, conflict: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut inner = self.inner.write().await;
        if inner.iter().any(|r| conflict(r)) {
            return None;
        }
        Some(inner.put(record))
    }

    /// Replaces the first record matching `existing` (keeping its id and
    /// `created_at`) or inserts `record` as new.
    pub async fn upsert_by<F>(&self, mut record: T, existing: F) -> T
    where
        F: Fn(&T) -> bool,
    {
        let mut inner = self.inner.write().await;
        let previous = inner
            .iter()
            .find(|r| existing(*r))
            .map(|r| r.meta().clone());
        if let Some(previous) = previous {
            let meta = record.meta_mut();
            meta.id = previous.id;
            meta.created_at = previous.created_at;
        }
        inner.put(record)
    }
}

/// All collections owned by the application. Shared as `Arc<RecordStore>`.
pub struct RecordStore {
    pub users: Collection<User>,
    pub organizations: Collection<Organization>,
    pub jobs: Collection<JobPost>,
    pub candidates: Collection<Candidate>,
    pub screening_results: Collection<ScoringResult>,
    pub assessments: Collection<Assessment>,
    pub interviews: Collection<Interview>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            users: Collection::new("users"),
            organizations: Collection::new("organizations"),
            jobs: Collection::new("jobs"),
            candidates: Collection::new("candidates"),
            screening_results: Collection::new("screening_results"),
            assessments: Collection::new("assessments"),
            interviews: Collection::new("interviews"),
        }
    }

    /// Case-insensitive email lookup.
    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.users
            .find_one(|u| u.email.to_lowercase() == email)
            .await
    }

    pub async fn candidates_for_job(&self, job_id: &str) -> Vec<Candidate> {
        self.candidates.find(|c| c.job_post_id == job_id).await
    }

    pub async fn scoring_result_for(&self, candidate_id: &str) -> Option<ScoringResult> {
        self.screening_results
            .find_one(|r| r.candidate_id == candidate_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Note {
        meta: RecordMeta,
        body: String,
    }

    impl Record for Note {
        fn meta(&self) -> &RecordMeta {
            &self.meta
        }
        fn meta_mut(&mut self) -> &mut RecordMeta {
            &mut self.meta
        }
    }

    fn note(body: &str) -> Note {
        Note {
            meta: RecordMeta::pending(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_stamps() {
        let notes = Collection::new("notes");
        let saved = notes.save(note("a")).await;
        assert!(!saved.id().is_empty());
        assert!(saved.meta.updated_at >= saved.meta.created_at);
        assert_eq!(notes.get(saved.id()).await.unwrap().body, "a");
    }

    #[tokio::test]
    async fn test_save_keeps_preset_id() {
        let notes = Collection::new("notes");
        let saved = notes
            .save(Note {
                meta: RecordMeta::with_id("fixed"),
                body: "x".into(),
            })
            .await;
        assert_eq!(saved.id(), "fixed");
        assert!(notes.get("fixed").await.is_some());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let notes: Collection<Note> = Collection::new("notes");
        assert!(notes.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_resave_keeps_created_at_and_position() {
        let notes = Collection::new("notes");
        let first = notes.save(note("first")).await;
        notes.save(note("second")).await;

        let mut edited = first.clone();
        edited.body = "first, edited".into();
        let resaved = notes.save(edited).await;

        assert_eq!(resaved.meta.created_at, first.meta.created_at);
        let bodies: Vec<String> = notes.all().await.into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["first, edited", "second"]);
        assert_eq!(notes.len().await, 2);
    }

    #[tokio::test]
    async fn test_returned_record_is_detached() {
        let notes = Collection::new("notes");
        let mut saved = notes.save(note("original")).await;
        saved.body = "mutated locally".into();
        assert_eq!(notes.get(saved.id()).await.unwrap().body, "original");
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let notes = Collection::new("notes");
        for body in ["b1", "a", "b2", "b3"] {
            notes.save(note(body)).await;
        }
        let found: Vec<String> = notes
            .find(|n| n.body.starts_with('b'))
            .await
            .into_iter()
            .map(|n| n.body)
            .collect();
        assert_eq!(found, vec!["b1", "b2", "b3"]);
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let notes = Collection::new("notes");
        let saved = notes.save(note("v1")).await;
        let updated = notes
            .update(saved.id(), |n| n.body = "v2".into())
            .await
            .unwrap();
        assert_eq!(updated.id(), saved.id());
        assert_eq!(notes.get(saved.id()).await.unwrap().body, "v2");
        assert!(notes.update("missing", |_| {}).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_unless_rejects_conflict() {
        let notes = Collection::new("notes");
        assert!(notes.insert_unless(note("dup"), |n| n.body == "dup").await.is_some());
        assert!(notes.insert_unless(note("dup"), |n| n.body == "dup").await.is_none());
        assert_eq!(notes.len().await, 1);
    }

    #[tokio::test]
    async fn test_upsert_by_replaces_existing() {
        let notes = Collection::new("notes");
        let first = notes.upsert_by(note("k:1"), |n| n.body.starts_with("k:")).await;
        let second = notes.upsert_by(note("k:2"), |n| n.body.starts_with("k:")).await;
        assert_eq!(first.id(), second.id());
        assert_eq!(notes.len().await, 1);
        assert_eq!(notes.get(first.id()).await.unwrap().body, "k:2");
    }
}
