//! # subhub-common
//!
//! Shared utilities including configuration, error handling, session and
//! share-link tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, ShareClaims, ShareLink, ShareLinkService, TokenPair, TokenType};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, FrontendConfig,
    GoogleConfig, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, ShareLinkConfig,
    SnowflakeConfig, SyncConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
