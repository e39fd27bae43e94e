//! Value objects - immutable types with no identity

mod locale;
mod snowflake;

pub use locale::Locale;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
