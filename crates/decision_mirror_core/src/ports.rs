//! crates/decision_mirror_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::{AnalysisResult, DecisionInput, Preferences, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a new user record with a pre-hashed password.
    ///
    /// Must return `AlreadyExists` for a duplicate email, with at most one
    /// success when two registrations for the same email race each other.
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User>;

    /// Looks up credentials by exact, case-sensitive email match.
    /// Returns `NotFound` when no such user exists.
    async fn find_by_email(&self, email: &str) -> PortResult<UserCredentials>;
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Produces the scenario/risk/guidance bundle for a submitted decision.
    ///
    /// Implementations must be deterministic and total for a given
    /// `(input, preferences)` pair. The error arm exists for future
    /// integrations; every caller recovers from it by keeping the
    /// placeholder data already on screen.
    async fn analyze(
        &self,
        input: &DecisionInput,
        preferences: &Preferences,
    ) -> PortResult<AnalysisResult>;
}

/// String key/value storage with browser-local-storage semantics.
///
/// Session and preference logic only ever touches storage through this
/// trait, so nothing in the core reaches for an ambient global store.
pub trait ClientStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// An in-memory `ClientStorage`, used for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
