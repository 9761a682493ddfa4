//! Value objects - immutable types that represent domain concepts

mod role;
mod snowflake;

pub use role::{RegistrationMethod, Role};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
