//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod groups;
pub mod health;
pub mod share;
pub mod subscriptions;
pub mod users;
