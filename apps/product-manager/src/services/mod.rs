//! Service implementations.
//!
//! Services check existence and uniqueness, then hand validated entities
//! to the repositories. Errors are never caught here; they propagate to the
//! caller as [`ServiceError`](crate::error::ServiceError).

pub mod product_service;
pub mod user_service;

pub use product_service::ProductService;
pub use user_service::UserService;
