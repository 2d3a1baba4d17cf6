//! # Gateway
//!
//! The owned entry point to the engine: an [`EntityStore`], the optional
//! mutation capability, and the [`DanglingPolicy`] used for event reads.
//!
//! ## Deployment Modes
//!
//! A full gateway carries an [`IdGenerator`] and accepts mutations. A
//! read-only gateway carries none: every mutation fails with
//! [`GatewayError::ReadOnly`] before touching the store. Both modes share
//! all read and resolution code.

use crate::handlers::Mutations;
use crate::idgen::{IdGenerator, NanoIdGenerator};
use crate::resolver::{DanglingPolicy, ResolvedEvent, Resolver};
use crate::store::{CollectionCounts, EntityStore};
use crate::types::{
    AddEventInput, AddUserInput, DeleteAllOutput, Event, EventField, GatewayError, Location,
    Participant, UpdateEventInput, UpdateUserInput, User,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which operations a gateway exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    /// Reads, resolution and mutations.
    #[default]
    Full,
    /// Reads and resolution only; no id generation.
    ReadOnly,
}

impl GatewayMode {
    /// Wire name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ReadOnly => "read_only",
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store plus capabilities. Pass it by reference to every operation.
pub struct Gateway {
    store: EntityStore,
    ids: Option<Box<dyn IdGenerator>>,
    policy: DanglingPolicy,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("mode", &self.mode())
            .field("policy", &self.policy)
            .field("counts", &self.store.counts())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create a gateway in `mode`. Full mode uses random ids.
    pub fn new(store: EntityStore, mode: GatewayMode, policy: DanglingPolicy) -> Self {
        let ids: Option<Box<dyn IdGenerator>> = match mode {
            GatewayMode::Full => Some(Box::new(NanoIdGenerator)),
            GatewayMode::ReadOnly => None,
        };
        Self { store, ids, policy }
    }

    /// Create a full gateway with a caller-supplied id generator.
    pub fn with_id_generator(
        store: EntityStore,
        ids: Box<dyn IdGenerator>,
        policy: DanglingPolicy,
    ) -> Self {
        Self {
            store,
            ids: Some(ids),
            policy,
        }
    }

    /// Current deployment mode.
    pub fn mode(&self) -> GatewayMode {
        if self.ids.is_some() {
            GatewayMode::Full
        } else {
            GatewayMode::ReadOnly
        }
    }

    /// Policy applied to dangling `user`/`location` references.
    pub fn policy(&self) -> DanglingPolicy {
        self.policy
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Current size of every collection.
    pub fn counts(&self) -> CollectionCounts {
        self.store.counts()
    }

    /// Resolver over the current store.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.store, self.policy)
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn get_users(&self) -> &[User] {
        self.store.users.as_slice()
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.store.users.find_by_id(id)
    }

    pub fn get_locations(&self) -> &[Location] {
        self.store.locations.as_slice()
    }

    pub fn get_location(&self, id: &str) -> Option<&Location> {
        self.store.locations.find_by_id(id)
    }

    pub fn get_participants(&self) -> &[Participant] {
        self.store.participants.as_slice()
    }

    pub fn get_participant(&self, id: &str) -> Option<&Participant> {
        self.store.participants.find_by_id(id)
    }

    /// All events with the requested derived fields.
    pub fn get_events(&self, fields: &[EventField]) -> Result<Vec<ResolvedEvent>, GatewayError> {
        self.resolver()
            .resolve_all(self.store.events.iter().cloned(), fields)
    }

    /// One event with the requested derived fields, or `None` if absent.
    pub fn get_event(
        &self,
        id: &str,
        fields: &[EventField],
    ) -> Result<Option<ResolvedEvent>, GatewayError> {
        self.store
            .events
            .find_by_id(id)
            .cloned()
            .map(|event| self.resolve(event, fields))
            .transpose()
    }

    /// Resolve derived fields for an event obtained from a mutation.
    pub fn resolve(
        &self,
        event: Event,
        fields: &[EventField],
    ) -> Result<ResolvedEvent, GatewayError> {
        self.resolver().resolve(event, fields)
    }

    // =========================================================================
    // USER MUTATIONS
    // =========================================================================

    pub fn add_user(&mut self, input: AddUserInput) -> Result<User, GatewayError> {
        let ids = self.ids.as_deref().ok_or(GatewayError::ReadOnly {
            operation: "addUser",
        })?;
        Ok(Mutations::add(&mut self.store.users, ids, input))
    }

    pub fn update_user(&mut self, id: &str, patch: UpdateUserInput) -> Result<User, GatewayError> {
        self.ensure_writable("updateUser")?;
        Mutations::update(&mut self.store.users, id, patch)
    }

    pub fn delete_user(&mut self, id: &str) -> Result<User, GatewayError> {
        self.ensure_writable("deleteUser")?;
        Mutations::delete(&mut self.store.users, id)
    }

    pub fn delete_all_users(&mut self) -> Result<DeleteAllOutput, GatewayError> {
        self.ensure_writable("deleteAllUser")?;
        Ok(Mutations::delete_all(&mut self.store.users))
    }

    // =========================================================================
    // EVENT MUTATIONS
    // =========================================================================

    pub fn add_event(&mut self, input: AddEventInput) -> Result<Event, GatewayError> {
        self.add_event_resolved(input, &[]).map(|resolved| resolved.event)
    }

    pub fn update_event(
        &mut self,
        id: &str,
        patch: UpdateEventInput,
    ) -> Result<Event, GatewayError> {
        self.update_event_resolved(id, patch, &[])
            .map(|resolved| resolved.event)
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Event, GatewayError> {
        self.delete_event_resolved(id, &[]).map(|resolved| resolved.event)
    }

    /// Add an event and return it with `fields` resolved.
    ///
    /// The candidate is resolved before it is appended: if resolution fails
    /// the store is unchanged.
    pub fn add_event_resolved(
        &mut self,
        input: AddEventInput,
        fields: &[EventField],
    ) -> Result<ResolvedEvent, GatewayError> {
        let ids = self.ids.as_deref().ok_or(GatewayError::ReadOnly {
            operation: "addEvent",
        })?;
        let candidate: Event = Mutations::stage_add(ids, input);
        let resolved = self.resolve(candidate, fields)?;
        self.store.events.append(resolved.event.clone());
        Ok(resolved)
    }

    /// Update an event and return it with `fields` resolved.
    ///
    /// The merged record is resolved before it is written back.
    pub fn update_event_resolved(
        &mut self,
        id: &str,
        patch: UpdateEventInput,
        fields: &[EventField],
    ) -> Result<ResolvedEvent, GatewayError> {
        self.ensure_writable("updateEvent")?;
        let (index, merged) = Mutations::stage_update(&self.store.events, id, patch)?;
        let resolved = self.resolve(merged, fields)?;
        Mutations::commit_update(&mut self.store.events, index, resolved.event.clone())?;
        Ok(resolved)
    }

    /// Delete an event and return it, as it was, with `fields` resolved.
    ///
    /// The record is resolved while still stored; removal happens last.
    pub fn delete_event_resolved(
        &mut self,
        id: &str,
        fields: &[EventField],
    ) -> Result<ResolvedEvent, GatewayError> {
        self.ensure_writable("deleteEvent")?;
        let (index, current) = Mutations::stage_delete(&self.store.events, id)?;
        let resolved = self.resolve(current, fields)?;
        Mutations::commit_delete(&mut self.store.events, index, id)?;
        Ok(resolved)
    }

    pub fn delete_all_events(&mut self) -> Result<DeleteAllOutput, GatewayError> {
        self.ensure_writable("deleteAllEvent")?;
        Ok(Mutations::delete_all(&mut self.store.events))
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<(), GatewayError> {
        match self.mode() {
            GatewayMode::Full => Ok(()),
            GatewayMode::ReadOnly => Err(GatewayError::ReadOnly { operation }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
