//! Domain layer - Core business entities
//!
//! Contains the User entity and the payload it is built from.
//! No infrastructure dependencies.

pub mod user;

pub use user::{User, UserDto};
