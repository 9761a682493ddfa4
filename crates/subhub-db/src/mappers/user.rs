//! User model -> entity

use subhub_core::entities::{CustomUrl, User};
use subhub_core::value_objects::{RegistrationMethod, Role, Snowflake};

use crate::models::{CustomUrlModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            image_url: model.image_url,
            registration_method: RegistrationMethod::from_db(&model.registration_method),
            role: Role::from_db(&model.role),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CustomUrlModel> for CustomUrl {
    fn from(model: CustomUrlModel) -> Self {
        CustomUrl {
            id: Snowflake::new(model.id),
            profile_id: Snowflake::new(model.profile_id),
            name: model.name,
            url: model.url,
            created_at: model.created_at,
        }
    }
}
