//! Database models - SQLx-compatible structs for PostgreSQL tables

mod collection;
mod custom_url;
mod group;
mod profile;
mod subscription;
mod user;

pub use collection::CollectionModel;
pub use custom_url::CustomUrlModel;
pub use group::{GroupModel, GroupWithCountModel};
pub use profile::ProfileModel;
pub use subscription::{SubscriptionListRowModel, SubscriptionModel, UploadModel};
pub use user::UserModel;
