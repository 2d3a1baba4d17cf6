//! # Entity Store
//!
//! Four independent, insertion-ordered collections with positional
//! lookup and mutation primitives.
//!
//! The store has no interior locking. Callers that share it across threads
//! serialize access themselves (the HTTP layer wraps the whole gateway in a
//! `RwLock`).

use crate::seed::SeedData;
use crate::types::{EntityKind, Event, Location, Participant, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// RECORD TRAIT
// =============================================================================

/// A record stored in a [`Collection`], identified by a string id.
pub trait Record: Clone {
    /// Which collection this record belongs to.
    const KIND: EntityKind;

    /// The record's unique id.
    fn id(&self) -> &str;
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Location {
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Participant {
    const KIND: EntityKind = EntityKind::Participant;

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

/// An ordered collection of records of one kind.
///
/// Order is insertion order. Id uniqueness is assumed, not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding `records` in the given order.
    #[must_use]
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// First record whose id equals `id` exactly.
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Position of the first record whose id equals `id` exactly.
    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// All records whose `field` equals `value`, in insertion order.
    ///
    /// `field` projects the compared value out of a record, e.g.
    /// `|p: &Participant| p.event_id.as_str()`.
    pub fn find_all_by_field<F>(&self, field: F, value: &str) -> Vec<&T>
    where
        F: Fn(&T) -> &str,
    {
        self.records
            .iter()
            .filter(|record| field(record) == value)
            .collect()
    }

    /// Append a record at the end.
    pub fn append(&mut self, record: T) {
        self.records.push(record);
    }

    /// Replace the record at `index`, returning the previous one.
    ///
    /// Returns `None` (and leaves the collection untouched) if `index` is out
    /// of range.
    pub fn replace_at(&mut self, index: usize, record: T) -> Option<T> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record at `index`, shifting later records down.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Remove every record, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

// =============================================================================
// ENTITY STORE
// =============================================================================

/// The four collections of the gateway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    pub users: Collection<User>,
    pub events: Collection<Event>,
    pub locations: Collection<Location>,
    pub participants: Collection<Participant>,
}

/// Per-collection record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    pub users: usize,
    pub events: usize,
    pub locations: usize,
    pub participants: usize,
}

impl EntityStore {
    /// Create a store with four empty collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from seed data, preserving seed order.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            users: Collection::from_records(seed.users),
            events: Collection::from_records(seed.events),
            locations: Collection::from_records(seed.locations),
            participants: Collection::from_records(seed.participants),
        }
    }

    /// Current size of every collection.
    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            users: self.users.len(),
            events: self.events.len(),
            locations: self.locations.len(),
            participants: self.participants.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
