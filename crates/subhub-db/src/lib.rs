//! # subhub-db
//!
//! Database layer implementing the subhub-core repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use subhub_db::{create_pool, run_migrations, PgGroupRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! run_migrations(&pool).await?;
//! let groups = PgGroupRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCollectionRepository, PgCustomUrlRepository, PgGroupRepository, PgProfileRepository,
    PgSubscriptionRepository, PgUserRepository,
};
