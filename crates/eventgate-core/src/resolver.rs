//! # Relational Resolver
//!
//! Computes the derived fields of an [`Event`] by looking up related records:
//!
//! - `user`: the owner, `users` by `event.user_id`
//! - `location`: `locations` by `event.location_id`
//! - `participants`: every participant whose `event_id` is `event.id`
//!
//! Resolution is lazy and per request. Nothing is cached, so a read always
//! reflects the current store. References are not enforced, so `user` and
//! `location` may point at nothing; the [`DanglingPolicy`] decides whether
//! that fails the read or yields `null`.

use crate::store::EntityStore;
use crate::types::{Event, EventField, GatewayError, Location, Participant, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// DANGLING POLICY
// =============================================================================

/// What to do when `user` or `location` references a missing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Fail the whole read with `DanglingReference`.
    #[default]
    Strict,
    /// Resolve the field to `null`.
    Lenient,
}

// =============================================================================
// RESOLVED EVENT
// =============================================================================

/// An event together with the derived fields that were requested.
///
/// Outer `None` means "not requested" and the field is omitted from the
/// output. `Some(None)` is a dangling reference under the lenient policy and
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEvent {
    #[serde(flatten)]
    pub event: Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<Location>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,
}

impl ResolvedEvent {
    /// Wrap an event with no derived fields.
    pub fn bare(event: Event) -> Self {
        Self {
            event,
            user: None,
            location: None,
            participants: None,
        }
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Read-only view over a store that resolves derived event fields.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a EntityStore,
    policy: DanglingPolicy,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `store`.
    pub fn new(store: &'a EntityStore, policy: DanglingPolicy) -> Self {
        Self { store, policy }
    }

    /// The event's owner.
    pub fn user(&self, event: &Event) -> Result<Option<User>, GatewayError> {
        let found = self.store.users.find_by_id(&event.user_id).cloned();
        self.apply_policy(found, EventField::User, &event.user_id)
    }

    /// The event's location.
    pub fn location(&self, event: &Event) -> Result<Option<Location>, GatewayError> {
        let found = self.store.locations.find_by_id(&event.location_id).cloned();
        self.apply_policy(found, EventField::Location, &event.location_id)
    }

    /// Participants of the event, in insertion order. Never fails.
    pub fn participants(&self, event: &Event) -> Vec<Participant> {
        self.store
            .participants
            .find_all_by_field(|p| p.event_id.as_str(), &event.id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resolve each requested field once; duplicates in `fields` are ignored.
    pub fn resolve(
        &self,
        event: Event,
        fields: &[EventField],
    ) -> Result<ResolvedEvent, GatewayError> {
        let mut resolved = ResolvedEvent::bare(event);

        for field in EventField::ALL {
            if !fields.contains(&field) {
                continue;
            }
            match field {
                EventField::User => resolved.user = Some(self.user(&resolved.event)?),
                EventField::Location => resolved.location = Some(self.location(&resolved.event)?),
                EventField::Participants => {
                    resolved.participants = Some(self.participants(&resolved.event));
                }
            }
        }

        Ok(resolved)
    }

    /// Resolve a list of events; the first dangling reference fails the list.
    pub fn resolve_all(
        &self,
        events: impl IntoIterator<Item = Event>,
        fields: &[EventField],
    ) -> Result<Vec<ResolvedEvent>, GatewayError> {
        events
            .into_iter()
            .map(|event| self.resolve(event, fields))
            .collect()
    }

    fn apply_policy<T>(
        &self,
        found: Option<T>,
        field: EventField,
        id: &str,
    ) -> Result<Option<T>, GatewayError> {
        match (found, self.policy) {
            (Some(record), _) => Ok(Some(record)),
            (None, DanglingPolicy::Lenient) => Ok(None),
            (None, DanglingPolicy::Strict) => Err(GatewayError::DanglingReference {
                field,
                id: id.to_string(),
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
