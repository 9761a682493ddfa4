//! # subhub-cache
//!
//! Redis layer holding the server-side registry of refresh tokens.
//!
//! ## Example
//!
//! ```ignore
//! use subhub_cache::{RedisPool, RedisPoolConfig, RefreshTokenStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RefreshTokenStore::with_ttl(pool, 7 * 24 * 60 * 60);
//!
//! sessions.store(&refresh_token, user_id, &session_id).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{RefreshTokenData, RefreshTokenStore};
