//! # Core Type Definitions
//!
//! This module contains all core types for the eventgate engine:
//! - Records (`User`, `Location`, `Participant`, `Event`)
//! - Mutation payloads (`AddUserInput`, `UpdateUserInput`, `AddEventInput`, `UpdateEventInput`)
//! - Output structures (`DeleteAllOutput`)
//! - Selectors and tags (`EntityKind`, `EventField`)
//! - Error types (`GatewayError`)
//!
//! ## Wire Shape
//!
//! Records serialize with exactly their field names. Absent optional fields
//! serialize as `null`, and may be omitted when deserializing seed data.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RECORDS
// =============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A place an event can happen at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Attendance of a user at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
}

/// An event, owned by a user and held at a location.
///
/// `user`, `location` and `participants` are not stored here; they are
/// derived at read time by the [`Resolver`](crate::resolver::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub desc: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    pub location_id: String,
    pub user_id: String,
}

// =============================================================================
// MUTATION PAYLOADS
// =============================================================================

/// Payload for creating a user. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUserInput {
    pub username: String,
    pub email: String,
}

/// Partial payload for updating a user.
///
/// `None` (absent or `null`) keeps the stored value. `Some("")` overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEventInput {
    pub title: String,
    pub desc: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    pub location_id: String,
    pub user_id: String,
}

/// Partial payload for updating an event.
///
/// Required record fields use `Option<String>`: absent and `null` both keep
/// the stored value. Optional record fields (`date`, `from`, `to`) use
/// `Option<Option<String>>`: absent keeps, `null` clears, a string overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub date: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub from: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub to: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Marks a key as present, so an explicit `null` becomes `Some(None)`.
///
/// Only invoked when the key exists; missing keys fall back to `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// OUTPUTS
// =============================================================================

/// Result of a delete-all mutation: how many records were removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAllOutput {
    pub count: usize,
}

// =============================================================================
// SELECTORS
// =============================================================================

/// The four record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Event,
    Location,
    Participant,
}

impl EntityKind {
    /// Human-readable name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Event => "Event",
            Self::Location => "Location",
            Self::Participant => "Participant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived fields an Event read may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    User,
    Location,
    Participants,
}

impl EventField {
    /// Every derived field, in output order.
    pub const ALL: [EventField; 3] = [Self::User, Self::Location, Self::Participants];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Location => "location",
            Self::Participants => "participants",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in gateway operations.
///
/// A failure terminates only the requested operation and never leaves the
/// store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Update or delete target does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A non-nullable derived field points at a missing record.
    #[error("Dangling reference: event field '{field}' points at missing id '{id}'")]
    DanglingReference { field: EventField, id: String },

    /// Mutation attempted on a read-only gateway.
    #[error("Operation '{operation}' is not available on a read-only gateway")]
    ReadOnly { operation: &'static str },

    /// Seed data could not be read or parsed.
    #[error("Seed error: {0}")]
    Seed(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request or response could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (bind, serve, file access).
    #[error("I/O error: {0}")]
    Io(String),
}

impl GatewayError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
