//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use eventgate_core::{
    AddEventInput, AddUserInput, CollectionCounts, DanglingPolicy, EventField, GatewayMode,
    UpdateEventInput, UpdateUserInput,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: GatewayMode,
}

impl HealthResponse {
    pub fn ok(mode: GatewayMode) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode,
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Gateway status: capabilities and collection sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub mode: GatewayMode,
    pub dangling: DanglingPolicy,
    pub collections: CollectionCounts,
}

// =============================================================================
// OPERATION REQUEST
// =============================================================================

/// A named operation plus its arguments (tagged union on `operation`).
///
/// Event-returning operations accept `fields`, the derived fields to
/// resolve (`user`, `location`, `participants`). Omitted means none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum OperationRequest {
    GetUsers,
    GetUser {
        id: String,
    },
    GetEvents {
        #[serde(default)]
        fields: Vec<EventField>,
    },
    GetEvent {
        id: String,
        #[serde(default)]
        fields: Vec<EventField>,
    },
    GetLocations,
    GetLocation {
        id: String,
    },
    GetParticipants,
    GetParticipant {
        id: String,
    },
    AddUser {
        data: AddUserInput,
    },
    UpdateUser {
        id: String,
        data: UpdateUserInput,
    },
    DeleteUser {
        id: String,
    },
    DeleteAllUser,
    AddEvent {
        data: AddEventInput,
        #[serde(default)]
        fields: Vec<EventField>,
    },
    UpdateEvent {
        id: String,
        data: UpdateEventInput,
        #[serde(default)]
        fields: Vec<EventField>,
    },
    DeleteEvent {
        id: String,
        #[serde(default)]
        fields: Vec<EventField>,
    },
    DeleteAllEvent,
}

impl OperationRequest {
    /// Operation name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetUsers => "getUsers",
            Self::GetUser { .. } => "getUser",
            Self::GetEvents { .. } => "getEvents",
            Self::GetEvent { .. } => "getEvent",
            Self::GetLocations => "getLocations",
            Self::GetLocation { .. } => "getLocation",
            Self::GetParticipants => "getParticipants",
            Self::GetParticipant { .. } => "getParticipant",
            Self::AddUser { .. } => "addUser",
            Self::UpdateUser { .. } => "updateUser",
            Self::DeleteUser { .. } => "deleteUser",
            Self::DeleteAllUser => "deleteAllUser",
            Self::AddEvent { .. } => "addEvent",
            Self::UpdateEvent { .. } => "updateEvent",
            Self::DeleteEvent { .. } => "deleteEvent",
            Self::DeleteAllEvent => "deleteAllEvent",
        }
    }

    /// Whether the operation changes the store (and needs the write lock).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddUser { .. }
                | Self::UpdateUser { .. }
                | Self::DeleteUser { .. }
                | Self::DeleteAllUser
                | Self::AddEvent { .. }
                | Self::UpdateEvent { .. }
                | Self::DeleteEvent { .. }
                | Self::DeleteAllEvent
        )
    }
}

// =============================================================================
// OPERATION RESPONSE
// =============================================================================

/// Machine-readable error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Operation response envelope.
///
/// `data` is `null` both for failures and for single-record reads that
/// found nothing; `success` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<ErrorBody>,
}

impl OperationResponse {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}
