//! Integration test utilities for subhub
//!
//! Spawns the REST API against real PostgreSQL and Redis, with the Google
//! APIs replaced by a local mock.

pub mod fixtures;
pub mod helpers;
pub mod mock_google;

pub use fixtures::*;
pub use helpers::*;
pub use mock_google::MockGoogle;
