//! # API Endpoint Handlers
//!
//! This module implements the HTTP endpoint handlers and the operation
//! dispatch shared with the CLI.

use super::{
    AppState,
    types::{HealthResponse, OperationRequest, OperationResponse, StatusResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use eventgate_core::{Gateway, GatewayError};
use serde::Serialize;
use serde_json::Value;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.gateway.read().await;
    Json(HealthResponse::ok(gateway.mode()))
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get collection sizes and gateway capabilities.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.gateway.read().await;

    let response = StatusResponse {
        mode: gateway.mode(),
        dangling: gateway.policy(),
        collections: gateway.counts(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// OPERATION HANDLER
// =============================================================================

/// Execute a named operation.
///
/// Reads share the gateway's read lock; mutations take the write lock, so
/// each mutation completes before any other operation observes the store.
pub async fn operation_handler(
    State(state): State<AppState>,
    Json(request): Json<OperationRequest>,
) -> impl IntoResponse {
    let name = request.name();

    let result = if request.is_mutation() {
        let mut gateway = state.gateway.write().await;
        execute_operation(&mut gateway, request)
    } else {
        let gateway = state.gateway.read().await;
        execute_read(&gateway, &request)
    };

    let (status, response) = respond(result);
    if let Some(error) = &response.error {
        tracing::warn!(
            operation = name,
            code = %error.code,
            "Operation failed: {}",
            error.message
        );
    } else {
        tracing::debug!(operation = name, "Operation succeeded");
    }

    (status, Json(response))
}

/// Turn an operation result into a status code and response envelope.
pub fn respond(result: Result<Value, GatewayError>) -> (StatusCode, OperationResponse) {
    match result {
        Ok(data) => (StatusCode::OK, OperationResponse::success(data)),
        Err(e) => {
            let (status, code) = error_status(&e);
            (status, OperationResponse::error(code, e.to_string()))
        }
    }
}

/// HTTP status and stable error code for a gateway error.
pub fn error_status(error: &GatewayError) -> (StatusCode, &'static str) {
    match error {
        GatewayError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        GatewayError::DanglingReference { .. } => (StatusCode::CONFLICT, "DANGLING_REFERENCE"),
        GatewayError::ReadOnly { .. } => (StatusCode::FORBIDDEN, "READ_ONLY"),
        GatewayError::Serialization(_) => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
        GatewayError::Seed(_) | GatewayError::Config(_) | GatewayError::Io(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Execute any operation, mutating the gateway when required.
pub fn execute_operation(
    gateway: &mut Gateway,
    request: OperationRequest,
) -> Result<Value, GatewayError> {
    match request {
        OperationRequest::AddUser { data } => {
            let user = gateway.add_user(data)?;
            tracing::info!(event = "user_added", id = %user.id, "User added");
            to_json(&user)
        }
        OperationRequest::UpdateUser { id, data } => {
            let user = gateway.update_user(&id, data)?;
            tracing::info!(event = "user_updated", id = %user.id, "User updated");
            to_json(&user)
        }
        OperationRequest::DeleteUser { id } => {
            let user = gateway.delete_user(&id)?;
            tracing::info!(event = "user_deleted", id = %user.id, "User deleted");
            to_json(&user)
        }
        OperationRequest::DeleteAllUser => {
            let output = gateway.delete_all_users()?;
            tracing::info!(event = "users_cleared", count = output.count, "All users deleted");
            to_json(&output)
        }
        OperationRequest::AddEvent { data, fields } => {
            let resolved = gateway.add_event_resolved(data, &fields)?;
            tracing::info!(event = "event_added", id = %resolved.event.id, "Event added");
            to_json(&resolved)
        }
        OperationRequest::UpdateEvent { id, data, fields } => {
            let resolved = gateway.update_event_resolved(&id, data, &fields)?;
            tracing::info!(event = "event_updated", id = %resolved.event.id, "Event updated");
            to_json(&resolved)
        }
        OperationRequest::DeleteEvent { id, fields } => {
            let resolved = gateway.delete_event_resolved(&id, &fields)?;
            tracing::info!(event = "event_deleted", id = %resolved.event.id, "Event deleted");
            to_json(&resolved)
        }
        OperationRequest::DeleteAllEvent => {
            let output = gateway.delete_all_events()?;
            tracing::info!(
                event = "events_cleared",
                count = output.count,
                "All events deleted"
            );
            to_json(&output)
        }
        read => execute_read(gateway, &read),
    }
}

/// Execute a read operation under shared access.
///
/// Mutations cannot run here and are reported as `ReadOnly`.
pub fn execute_read(gateway: &Gateway, request: &OperationRequest) -> Result<Value, GatewayError> {
    match request {
        OperationRequest::GetUsers => to_json(&gateway.get_users()),
        OperationRequest::GetUser { id } => to_json(&gateway.get_user(id)),
        OperationRequest::GetEvents { fields } => to_json(&gateway.get_events(fields)?),
        OperationRequest::GetEvent { id, fields } => to_json(&gateway.get_event(id, fields)?),
        OperationRequest::GetLocations => to_json(&gateway.get_locations()),
        OperationRequest::GetLocation { id } => to_json(&gateway.get_location(id)),
        OperationRequest::GetParticipants => to_json(&gateway.get_participants()),
        OperationRequest::GetParticipant { id } => to_json(&gateway.get_participant(id)),
        mutation => Err(GatewayError::ReadOnly {
            operation: mutation.name(),
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::Serialization(e.to_string()))
}
