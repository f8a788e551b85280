//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Direction, PageRequest, PaginationParams, SortOrder, SortProperty};
pub use response::{Created, NoContent};
