//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! Uniqueness of email is left to the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{USER_NOT_FOUND_DELETE_ID, USER_NOT_FOUND_EMAIL, USER_NOT_FOUND_MODIFY_ID};
use crate::domain::{User, UserDto};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;
use crate::types::PageRequest;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist a new user built from `dto`
    async fn create_user(&self, dto: UserDto) -> AppResult<User>;

    /// Overwrite name, email and birth date of an existing user
    async fn modify_user(&self, dto: UserDto, id: i64) -> AppResult<User>;

    /// Delete an existing user
    async fn remove_user(&self, id: i64) -> AppResult<()>;

    /// Get user by email
    async fn get_user(&self, email: &str) -> AppResult<User>;

    /// Get the content of one page of users
    async fn get_user_list(&self, page: PageRequest) -> AppResult<Vec<User>>;

    /// Map a payload to an unsaved entity
    fn convert_dto_to_entity(&self, dto: Option<UserDto>) -> Option<User>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserManager<R> {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized> UserService for UserManager<R> {
    async fn create_user(&self, dto: UserDto) -> AppResult<User> {
        let user = User::from(dto);
        self.repo.save(user).await
    }

    async fn modify_user(&self, dto: UserDto, id: i64) -> AppResult<User> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{}{}", USER_NOT_FOUND_MODIFY_ID, id)))?;

        user.overwrite_with(dto);
        self.repo.save(user).await
    }

    async fn remove_user(&self, id: i64) -> AppResult<()> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{}{}", USER_NOT_FOUND_DELETE_ID, id)))?;

        self.repo.delete(user.id.unwrap_or(id)).await
    }

    async fn get_user(&self, email: &str) -> AppResult<User> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{}{}", USER_NOT_FOUND_EMAIL, email)))
    }

    async fn get_user_list(&self, page: PageRequest) -> AppResult<Vec<User>> {
        self.repo.find_page(&page).await
    }

    fn convert_dto_to_entity(&self, dto: Option<UserDto>) -> Option<User> {
        dto.map(User::from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::infra::MockUserRepository;

    const EMAIL: &str = "maruf.cse.cou@gmail.com";

    fn stored_user() -> User {
        User {
            id: Some(1),
            name: "Maruf".to_string(),
            email: EMAIL.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1994, 2, 10).unwrap(),
        }
    }

    fn user_dto() -> UserDto {
        UserDto::new("maruf", EMAIL, NaiveDate::from_ymd_opt(1994, 2, 10).unwrap())
    }

    fn service(repo: MockUserRepository) -> UserManager<MockUserRepository> {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == EMAIL)
            .times(1)
            .returning(|_| Ok(Some(stored_user())));

        let user = service(repo).get_user(EMAIL).await.unwrap();
        assert_eq!(user, stored_user());
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(repo).get_user(EMAIL).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "User not found with email: maruf.cse.cou@gmail.com"
        );
    }

    #[tokio::test]
    async fn get_user_list_returns_page_content() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_page()
            .withf(|page| page.page == 0 && page.size == 1)
            .times(1)
            .returning(|_| Ok(vec![stored_user()]));

        let users = service(repo)
            .get_user_list(PageRequest::of(0, 1))
            .await
            .unwrap();
        assert_eq!(users, vec![stored_user()]);
    }

    #[tokio::test]
    async fn create_user_saves_entity_without_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .withf(|user| user.id.is_none() && user.email == EMAIL && user.name == "maruf")
            .times(1)
            .returning(|_| Ok(stored_user()));

        let saved = service(repo).create_user(user_dto()).await.unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved, stored_user());
    }

    #[tokio::test]
    async fn create_user_propagates_constraint_violation() {
        let mut repo = MockUserRepository::new();
        repo.expect_save().times(1).returning(|_| {
            Err(AppError::ConstraintViolation(
                "duplicate key value violates unique constraint \"idx_users_email\"".into(),
            ))
        });

        let err = service(repo).create_user(user_dto()).await.unwrap_err();
        assert!(matches!(err, AppError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn modify_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        repo.expect_save()
            .withf(|user| user.id == Some(1) && user.name == "maruf")
            .times(1)
            .returning(Ok);

        let updated = service(repo).modify_user(user_dto(), 1).await.unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name, "maruf");
        assert_eq!(updated.email, EMAIL);
    }

    #[tokio::test]
    async fn modify_user_not_found_does_not_save() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_save().never();

        let err = service(repo).modify_user(user_dto(), 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "While modifying user not found with ID: 1");
    }

    #[tokio::test]
    async fn remove_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        repo.expect_delete()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).remove_user(1).await.is_ok());
    }

    #[tokio::test]
    async fn remove_user_not_found_does_not_delete() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_delete().never();

        let err = service(repo).remove_user(1).await.unwrap_err();
        assert_eq!(err.to_string(), "While deleting user not found with ID: 1");
    }

    #[test]
    fn convert_dto_to_entity_handles_absent_dto() {
        let service = service(MockUserRepository::new());
        assert!(service.convert_dto_to_entity(None).is_none());
    }

    #[test]
    fn convert_dto_to_entity_copies_fields_without_id() {
        let service = service(MockUserRepository::new());
        let dto = user_dto();

        let user = service.convert_dto_to_entity(Some(dto.clone())).unwrap();
        assert_eq!(user.id, None);
        assert_eq!(user.name, dto.name);
        assert_eq!(user.email, dto.email);
        assert_eq!(user.birth_date, dto.date_of_birth);
    }
}
