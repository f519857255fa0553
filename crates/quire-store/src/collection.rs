//! Generic in-memory collection shared by every entity kind.
//!
//! All lookups are linear scans. The collections are expected to stay small
//! (a single user's posts, categories and media), so no index is kept.

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::{Result, StoreError};

/// Current time at the millisecond precision clients see.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// An insertion-ordered list of entities of one kind.
#[derive(Debug, Clone)]
pub struct Collection<E> {
    items: Vec<E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Entity> Collection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Assign a fresh id and timestamps, append, and return the new record.
    pub fn insert(&mut self, input: E::Insert) -> E {
        let mut id = Uuid::new_v4();
        while self.position(id).is_some() {
            id = Uuid::new_v4();
        }

        let entity = E::from_insert(id, now(), input);
        self.items.push(entity.clone());
        entity
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn get(&self, id: Uuid) -> Option<E> {
        self.items.iter().find(|e| e.id() == id).cloned()
    }

    /// Snapshot of every record, in the kind's listing order.
    pub fn all(&self) -> Vec<E> {
        let mut items = self.items.clone();
        E::sort_for_listing(&mut items);
        items
    }

    /// First record (in insertion order) matching `pred`.
    pub fn find(&self, pred: impl Fn(&E) -> bool) -> Option<E> {
        self.items.iter().find(|e| pred(*e)).cloned()
    }

    /// Every record matching `pred`, in insertion order.
    pub fn filter(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.items.iter().filter(|e| pred(*e)).cloned().collect()
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Merge `patch` into the record with `id`.
    ///
    /// Fails with [`StoreError::NotFound`] and leaves the collection
    /// untouched when no record matches.
    pub fn update(&mut self, id: Uuid, patch: E::Patch) -> Result<E> {
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;

        let entity = &mut self.items[index];
        entity.apply_patch(patch, now());
        Ok(entity.clone())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Remove the record with `id`. Returns `true` if one was removed;
    /// removing an unknown id is not an error.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        self.items.len() != before
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|e| e.id() == id)
    }
}
