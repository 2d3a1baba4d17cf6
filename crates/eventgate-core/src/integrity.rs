//! # Integrity Report
//!
//! The store does not enforce references or id uniqueness. This module
//! reports where those assumptions are currently broken, without changing
//! anything: dangling `user_id`/`location_id`/`event_id` references and
//! duplicate ids within a collection.

use crate::store::{Collection, EntityStore, Record};
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single broken assumption found in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// `source.field` holds an id with no matching `target` record.
    DanglingReference {
        source: EntityKind,
        source_id: String,
        field: String,
        target: EntityKind,
        target_id: String,
    },
    /// More than one record in `collection` uses `id`.
    DuplicateId { collection: EntityKind, id: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference {
                source,
                source_id,
                field,
                target,
                target_id,
            } => write!(
                f,
                "{source} {source_id}: {field} -> missing {target} {target_id}"
            ),
            Self::DuplicateId { collection, id } => {
                write!(f, "{collection} collection: duplicate id {id}")
            }
        }
    }
}

/// All issues found in one pass over the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// True when no issue was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Alias for [`is_clean`](Self::is_clean).
    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }
}

/// Scan the store for dangling references and duplicate ids.
///
/// Issues are listed in a stable order: duplicates per collection first,
/// then event references, then participant references, each in insertion
/// order.
pub fn integrity_report(store: &EntityStore) -> IntegrityReport {
    let mut issues = Vec::new();

    duplicate_ids(&store.users, &mut issues);
    duplicate_ids(&store.events, &mut issues);
    duplicate_ids(&store.locations, &mut issues);
    duplicate_ids(&store.participants, &mut issues);

    for event in store.events.iter() {
        if store.users.find_by_id(&event.user_id).is_none() {
            issues.push(dangling(
                EntityKind::Event,
                &event.id,
                "user_id",
                EntityKind::User,
                &event.user_id,
            ));
        }
        if store.locations.find_by_id(&event.location_id).is_none() {
            issues.push(dangling(
                EntityKind::Event,
                &event.id,
                "location_id",
                EntityKind::Location,
                &event.location_id,
            ));
        }
    }

    for participant in store.participants.iter() {
        if store.users.find_by_id(&participant.user_id).is_none() {
            issues.push(dangling(
                EntityKind::Participant,
                &participant.id,
                "user_id",
                EntityKind::User,
                &participant.user_id,
            ));
        }
        if store.events.find_by_id(&participant.event_id).is_none() {
            issues.push(dangling(
                EntityKind::Participant,
                &participant.id,
                "event_id",
                EntityKind::Event,
                &participant.event_id,
            ));
        }
    }

    IntegrityReport { issues }
}

fn duplicate_ids<T: Record>(collection: &Collection<T>, issues: &mut Vec<IntegrityIssue>) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();

    for record in collection.iter() {
        let id = record.id();
        if !seen.insert(id) && reported.insert(id) {
            issues.push(IntegrityIssue::DuplicateId {
                collection: T::KIND,
                id: id.to_string(),
            });
        }
    }
}

fn dangling(
    source: EntityKind,
    source_id: &str,
    field: &str,
    target: EntityKind,
    target_id: &str,
) -> IntegrityIssue {
    IntegrityIssue::DanglingReference {
        source,
        source_id: source_id.to_string(),
        field: field.to_string(),
        target,
        target_id: target_id.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
