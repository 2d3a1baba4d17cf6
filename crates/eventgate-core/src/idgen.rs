//! # Identifier Generator
//!
//! Produces ids for newly created records.
//!
//! Generated ids are unique with overwhelming probability, not by
//! construction: nothing checks a new id against the existing ones. With 21
//! symbols drawn from nanoid's 64-symbol URL-safe alphabet (126 bits of
//! entropy) a collision within the lifetime of a process is negligible.

use nanoid::nanoid;
use std::sync::atomic::{AtomicU64, Ordering};

/// Length of a generated id.
pub const ID_LENGTH: usize = 21;

/// Source of fresh record ids.
pub trait IdGenerator: Send + Sync {
    /// Return a new id.
    fn generate(&self) -> String;
}

// =============================================================================
// RANDOM GENERATOR
// =============================================================================

/// Random, URL-safe nanoid ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIdGenerator;

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        nanoid!(ID_LENGTH)
    }
}

// =============================================================================
// SEQUENTIAL GENERATOR
// =============================================================================

/// Deterministic ids of the form `<prefix><n>`, counting from 1.
///
/// Useful for fixtures and reproducible demos.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator yielding `<prefix>1`, `<prefix>2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

// =============================================================================
// TESTS
// =============================================================================
