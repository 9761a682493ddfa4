//! Axum extractors for request handling
//!
//! Custom extractors for authentication, the Google token header,
//! validation, path ids and pagination.

mod auth;
mod google_token;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, CreatorUser};
pub use google_token::{GoogleToken, GOOGLE_TOKEN_HEADER};
pub use pagination::{PageParams, PageQuery};
pub use path::{GroupIdPath, LinkIdPath, SubscriptionIdPath, UsernamePath};
pub use validated::ValidatedJson;
