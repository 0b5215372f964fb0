// ABOUTME: Registry login credentials for the pull and push sides.
// ABOUTME: An empty password means the side runs in guest mode.

use serde::Deserialize;
use std::fmt;

use super::deserialize::deserialize_secret;

/// Registry used when none is configured.
pub const DEFAULT_REGISTRY: &str = "https://index.docker.io/v1/";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(default = "default_registry")]
    pub registry: String,

    #[serde(default)]
    pub username: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: String,

    #[serde(default)]
    pub email: String,
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

impl Credential {
    pub fn new(
        registry: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            registry: registry.into(),
            username: username.into(),
            password: password.into(),
            email: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// No password supplied, so no login is attempted.
    pub fn is_guest(&self) -> bool {
        self.password.is_empty()
    }

    pub fn email(&self) -> Option<&str> {
        Some(self.email.as_str()).filter(|email| !email.is_empty())
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY, "", "")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "********"
        };
        f.debug_struct("Credential")
            .field("registry", &self.registry)
            .field("username", &self.username)
            .field("password", &password)
            .field("email", &self.email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_guest_on_docker_hub() {
        let credential = Credential::default();
        assert!(credential.is_guest());
        assert_eq!(credential.registry, DEFAULT_REGISTRY);
    }

    #[test]
    fn empty_email_is_absent() {
        let credential = Credential::new("ghcr.io", "bot", "s3cret");
        assert_eq!(credential.email(), None);
        assert_eq!(
            credential.with_email("bot@example.com").email(),
            Some("bot@example.com")
        );
    }

    #[test]
    fn debug_masks_password() {
        let credential = Credential::new("ghcr.io", "bot", "s3cret");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("********"));
    }
}
