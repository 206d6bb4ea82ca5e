//! Shared fixtures for the API integration tests: an in-memory credential
//! store with the same uniqueness guarantee the database enforces, and a
//! ready-made `AppState`.

// Not every test binary touches every helper.
#![allow(dead_code)]

use api_lib::adapters::CannedAnalysisAdapter;
use api_lib::config::Config;
use api_lib::web::state::AppState;
use async_trait::async_trait;
use decision_mirror_core::domain::{User, UserCredentials};
use decision_mirror_core::ports::{AnalysisService, CredentialStore, PortError, PortResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct MemoryCredentialStore {
    users: Mutex<HashMap<String, UserCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User> {
        let mut users = self.users.lock().await;
        if users.contains_key(email) {
            return Err(PortError::AlreadyExists(format!(
                "User {} already registered",
                email
            )));
        }
        let credentials = UserCredentials {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_verified: true,
        };
        let user = User {
            id: credentials.id,
            email: credentials.email.clone(),
        };
        users.insert(email.to_string(), credentials);
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.users
            .lock()
            .await
            .get(email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().expect("valid socket address"),
        database_url: "postgres://unused".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        log_level: tracing::Level::INFO,
    }
}

pub fn test_state(store: Arc<MemoryCredentialStore>) -> Arc<AppState> {
    state_with(store, Arc::new(CannedAnalysisAdapter::new()))
}

pub fn state_with(
    store: Arc<MemoryCredentialStore>,
    analysis: Arc<dyn AnalysisService>,
) -> Arc<AppState> {
    Arc::new(AppState {
        credentials: store,
        analysis,
        config: Arc::new(test_config()),
    })
}
