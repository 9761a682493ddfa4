//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, FrontendConfig,
    GoogleConfig, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, ShareLinkConfig,
    SnowflakeConfig, SyncConfig,
};
