//! User repository contract and its SeaORM implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::USER_NOT_FOUND_DELETE_ID;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::{Direction, PageRequest, SortProperty};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence gateway for users.
///
/// Implementations own id assignment and the email uniqueness constraint:
/// a duplicate email must surface as [`AppError::ConstraintViolation`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by primary key
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch one page of users, ordered by the page's sort then by id
    async fn find_page(&self, page: &PageRequest) -> AppResult<Vec<User>>;

    /// Insert when `user.id` is `None`, otherwise overwrite the stored row
    async fn save(&self, user: User) -> AppResult<User>;

    /// Delete user by primary key
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn column(property: SortProperty) -> user::Column {
    match property {
        SortProperty::Id => user::Column::Id,
        SortProperty::Name => user::Column::Name,
        SortProperty::Email => user::Column::Email,
        SortProperty::BirthDate => user::Column::BirthDate,
    }
}

fn order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_page(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find();
        for criterion in &page.sort {
            query = query.order_by(column(criterion.property), order(criterion.direction));
        }
        if !page.sort.iter().any(|c| c.property == SortProperty::Id) {
            query = query.order_by_asc(user::Column::Id);
        }

        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: user.id.map_or(NotSet, Set),
            name: Set(user.name),
            email: Set(user.email),
            birth_date: Set(user.birth_date),
        };

        let model = match user.id {
            None => active_model.insert(self.db.as_ref()).await,
            Some(_) => active_model.update(self.db.as_ref()).await,
        }
        .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        // Row vanished between the service's lookup and this delete
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!(
                "{}{}",
                USER_NOT_FOUND_DELETE_ID, id
            )));
        }

        Ok(())
    }
}
