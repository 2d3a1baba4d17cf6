//! # eventgate-core
//!
//! The in-memory relational engine for eventgate - THE LOGIC.
//!
//! Four ordered collections (users, events, locations, participants) live in
//! an [`EntityStore`]. A [`Gateway`] owns the store together with the
//! optional mutation capability and the dangling-reference policy, and
//! exposes the read, mutation and resolution operations.
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - No hidden global state: callers own the `Gateway` and pass it by reference
//! - Id comparisons are exact string comparisons
//! - Derived event fields are resolved lazily, per request, never cached

// =============================================================================
// MODULES
// =============================================================================

pub mod gateway;
pub mod handlers;
pub mod idgen;
pub mod integrity;
pub mod resolver;
pub mod seed;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AddEventInput, AddUserInput, DeleteAllOutput, EntityKind, Event, EventField, GatewayError,
    Location, Participant, UpdateEventInput, UpdateUserInput, User,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use gateway::{Gateway, GatewayMode};
pub use handlers::{Entity, Mutations};
pub use idgen::{ID_LENGTH, IdGenerator, NanoIdGenerator, SequentialIdGenerator};
pub use integrity::{IntegrityIssue, IntegrityReport, integrity_report};
pub use resolver::{DanglingPolicy, ResolvedEvent, Resolver};
pub use seed::SeedData;
pub use store::{Collection, CollectionCounts, EntityStore, Record};
