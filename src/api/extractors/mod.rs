//! Custom extractors rejecting with [`crate::errors::AppError`].

mod pagination;
mod path;
mod validated_json;

pub use pagination::Pageable;
pub use path::{UserId, ValidEmail};
pub use validated_json::ValidatedJson;
