//! In-memory UserRepository for tests and database-less runs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::config::USER_NOT_FOUND_DELETE_ID;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::db::USERS_EMAIL_INDEX;
use crate::types::{Direction, PageRequest, SortOrder, SortProperty};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// Map-backed store mirroring the relational constraints:
/// sequential ids and a unique email.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn compare(a: &User, b: &User, criterion: &SortOrder) -> Ordering {
    let ordering = match criterion.property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Name => a.name.cmp(&b.name),
        SortProperty::Email => a.email.cmp(&b.email),
        SortProperty::BirthDate => a.birth_date.cmp(&b.birth_date),
    };

    match criterion.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_page(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();

        users.sort_by(|a, b| {
            page.sort
                .iter()
                .map(|criterion| compare(a, b, criterion))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.id.cmp(&b.id))
        });

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(users.into_iter().skip(offset).take(limit).collect())
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        // Single write lock: check-and-insert is atomic
        let mut inner = self.inner.write().await;

        let taken = inner
            .users
            .values()
            .any(|existing| existing.email == user.email && existing.id != user.id);
        if taken {
            return Err(AppError::ConstraintViolation(format!(
                "duplicate key value violates unique constraint \"{}\"",
                USERS_EMAIL_INDEX
            )));
        }

        let id = match user.id {
            Some(id) if inner.users.contains_key(&id) => id,
            Some(id) => {
                return Err(AppError::internal(format!(
                    "Cannot update unsaved user with ID: {}",
                    id
                )))
            }
            None => {
                inner.last_id += 1;
                inner.last_id
            }
        };

        user.id = Some(id);
        inner.users.insert(id, user.clone());
        tracing::debug!(user_id = id, email = %user.email, "Saved user");

        Ok(user)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        match self.inner.write().await.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "{}{}",
                USER_NOT_FOUND_DELETE_ID, id
            ))),
        }
    }
}
