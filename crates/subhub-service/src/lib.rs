//! # subhub-service
//!
//! Application layer: use cases over the core ports, plus the request and
//! response DTOs the API serializes.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AuthService, AuthSession, GroupService, LoginOutcome, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ServiceSettings, ShareService, SubscriptionService, UserService,
};
