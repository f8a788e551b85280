//! User domain entity and its transfer object.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
///
/// `id` is `None` until the persistence gateway assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// System-assigned identifier
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Maruf")]
    pub name: String,
    /// Unique email address
    #[schema(example = "maruf.cse.cou@gmail.com")]
    pub email: String,
    #[schema(value_type = String, format = Date, example = "1994-02-10")]
    pub birth_date: NaiveDate,
}

impl User {
    /// Create a user that has not been persisted yet
    pub fn new(name: String, email: String, birth_date: NaiveDate) -> Self {
        Self {
            id: None,
            name,
            email,
            birth_date,
        }
    }

    /// Overwrite every mutable field from `dto`, keeping the id.
    pub fn overwrite_with(&mut self, dto: UserDto) {
        self.name = dto.name;
        self.email = dto.email;
        self.birth_date = dto.date_of_birth;
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User::new(dto.name, dto.email, dto.date_of_birth)
    }
}

/// User creation/modification payload
///
/// Two payloads are equal when their emails are equal; name and birth date
/// do not take part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Maruf")]
    pub name: String,
    /// Email address, must be unique
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maruf.cse.cou@gmail.com")]
    pub email: String,
    #[schema(value_type = String, format = Date, example = "1994-02-10")]
    pub date_of_birth: NaiveDate,
}

impl UserDto {
    pub fn new(name: impl Into<String>, email: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date_of_birth,
        }
    }
}

impl PartialEq for UserDto {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for UserDto {}

impl Hash for UserDto {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl fmt::Display for UserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(name='{}', email='{}', birthDate={})",
            self.name, self.email, self.date_of_birth
        )
    }
}
