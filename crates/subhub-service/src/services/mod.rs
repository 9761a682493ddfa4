//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod group;
pub mod share;
pub mod subscription;
pub mod user;

// Re-export all services for convenience
pub use auth::{AuthService, AuthSession, LoginOutcome};
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use group::GroupService;
pub use share::ShareService;
pub use subscription::SubscriptionService;
pub use user::UserService;
