// ABOUTME: Image tag validation.
// ABOUTME: Tags follow the registry grammar [A-Za-z0-9_][A-Za-z0-9_.-]{0,127}.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Tag used when the caller supplies none.
pub const DEFAULT_TAG: &str = "latest";

const MAX_TAG_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("tag cannot be empty")]
    Empty,

    #[error("tag exceeds maximum length of 128 characters")]
    TooLong,

    #[error("tag cannot start with '{0}'")]
    InvalidStart(char),

    #[error("invalid character in tag: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(value: &str) -> Result<Self, TagError> {
        let value = value.trim();

        let first = value.chars().next().ok_or(TagError::Empty)?;

        if value.len() > MAX_TAG_LEN {
            return Err(TagError::TooLong);
        }

        if first == '.' || first == '-' {
            return Err(TagError::InvalidStart(first));
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-'))
        {
            return Err(TagError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn latest() -> Self {
        Self(DEFAULT_TAG.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::new(&value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
