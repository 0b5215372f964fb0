// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles tag lists and passwords that reference the environment.

use nonempty::NonEmpty;
use serde::Deserialize;

use super::env_value::EnvValue;
use super::tags::default_tags;
use crate::types::Tag;

pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<NonEmpty<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tags: Option<Vec<Tag>> = Option::deserialize(deserializer)?;
    Ok(tags.and_then(NonEmpty::from_vec).unwrap_or_else(default_tags))
}

pub fn deserialize_secret<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<EnvValue> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(String::new()),
        Some(value) => value.resolve().map_err(serde::de::Error::custom),
    }
}
