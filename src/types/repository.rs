// ABOUTME: Image repository name validation.
// ABOUTME: Accepts forms like nginx, org/app, registry.example.com:5000/org/app.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use super::tag::Tag;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository cannot be empty")]
    Empty,

    #[error("invalid character in repository: '{0}'")]
    InvalidChar(char),

    #[error("repository must not include a tag or digest: {0}")]
    HasTag(String),

    #[error("invalid repository format: {0}")]
    InvalidFormat(String),
}

/// A repository without tag, e.g. `ghcr.io/org/app`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Repository(String);

impl Repository {
    pub fn new(value: &str) -> Result<Self, RepositoryError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RepositoryError::Empty);
        }

        for c in value.chars() {
            if c == '@' {
                return Err(RepositoryError::HasTag(value.to_string()));
            }
            if !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_') {
                return Err(RepositoryError::InvalidChar(c));
            }
        }

        if value.starts_with('/') || value.ends_with('/') || value.contains("//") {
            return Err(RepositoryError::InvalidFormat(value.to_string()));
        }

        // A colon is only allowed as a registry port separator.
        let last_component = value.rsplit('/').next().unwrap_or(value);
        if last_component.contains(':') {
            return Err(RepositoryError::HasTag(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full `<repository>:<tag>` reference.
    pub fn reference(&self, tag: &Tag) -> String {
        format!("{}:{}", self.0, tag)
    }
}

impl TryFrom<String> for Repository {
    type Error = RepositoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Repository::new(&value)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registry_with_port() {
        let repo = Repository::new("registry.local:5000/team/app").unwrap();
        assert_eq!(repo.as_str(), "registry.local:5000/team/app");
    }

    #[test]
    fn rejects_embedded_tag() {
        assert!(matches!(
            Repository::new("nginx:1.25"),
            Err(RepositoryError::HasTag(_))
        ));
        assert!(matches!(
            Repository::new("nginx@sha256:abc"),
            Err(RepositoryError::HasTag(_))
        ));
    }

    #[test]
    fn rejects_dangling_slashes() {
        assert!(Repository::new("/app").is_err());
        assert!(Repository::new("org/").is_err());
        assert!(Repository::new("org//app").is_err());
    }

    #[test]
    fn reference_joins_tag() {
        let repo = Repository::new("org/app").unwrap();
        let tag = Tag::new("v2").unwrap();
        assert_eq!(repo.reference(&tag), "org/app:v2");
    }
}
