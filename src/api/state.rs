//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, InMemoryUserStore, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection (absent when running on the in-memory store)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire the SeaORM-backed repository and service.
    pub fn from_database(database: Arc<Database>) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));

        Self {
            user_service: Arc::new(UserManager::new(repo)),
            database: Some(database),
        }
    }

    /// Wire the service over any repository (no database health checks).
    pub fn with_repository(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service: Arc::new(UserManager::new(repo)),
            database: None,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryUserStore::new()))
    }

    /// Create new application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
