//! API middleware.

mod method_not_allowed;

pub use method_not_allowed::method_not_allowed_middleware;
