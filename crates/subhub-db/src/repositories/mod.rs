//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in subhub-core.

mod collection;
mod custom_url;
mod error;
mod group;
mod profile;
mod subscription;
mod user;

pub use collection::PgCollectionRepository;
pub use custom_url::PgCustomUrlRepository;
pub use group::PgGroupRepository;
pub use profile::PgProfileRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
