//! Domain entities - core business objects

mod collection;
mod custom_url;
mod group;
mod profile;
mod subscription;
mod upload;
mod user;

pub use collection::SubscriptionCollection;
pub use custom_url::CustomUrl;
pub use group::Group;
pub use profile::{
    derive_profile_username, validate_username, Profile, SocialLinks, USERNAME_MAX_LEN,
    USERNAME_MIN_LEN,
};
pub use subscription::{ChannelSnapshot, Subscription};
pub use upload::Upload;
pub use user::{normalize_email, User};
