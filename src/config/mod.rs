// ABOUTME: Configuration types for a promotion run.
// ABOUTME: Built from command-line flags or loaded whole from a YAML file.

mod credential;
mod daemon;
mod deserialize;
mod env_value;
mod executables;
mod readiness;
mod tags;

pub use credential::{Credential, DEFAULT_REGISTRY};
pub use daemon::{DEFAULT_STORAGE_PATH, DaemonConfig};
pub use env_value::{EnvValue, env_flag, first_env};
pub use executables::{DEFAULT_DOCKER, DEFAULT_DOCKERD, Executables};
pub use readiness::ReadinessConfig;
pub use tags::{TAGS_FILENAME, default_tags, parse_tags, resolve_tags, split_tag_list};

use crate::error::{Error, Result};
use crate::types::{Repository, Tag};
use deserialize::deserialize_tags;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::Path;

/// What to promote: every tag is pulled from `source` and retagged into
/// `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRequest {
    pub source: Repository,
    pub destination: Repository,
    pub tags: NonEmpty<Tag>,
}

impl PromotionRequest {
    pub fn new(source: Repository, destination: Repository, tags: NonEmpty<Tag>) -> Self {
        Self {
            source,
            destination,
            tags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip pushes. Pulls, retags and cleanup still run.
    pub dry_run: bool,

    /// Remove both local references after each tag and prune at the end.
    pub cleanup: bool,
}

fn default_cleanup() -> bool {
    true
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            cleanup: default_cleanup(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub promote: PromotionRequest,
    pub options: RunOptions,
    pub pull_login: Credential,
    pub push_login: Credential,
    pub daemon: DaemonConfig,
    pub executables: Executables,
    pub readiness: ReadinessConfig,
}

/// On-disk layout: request and options sit at the document root.
///
/// Kept flat so each tag scalar reaches `Tag` as its source text
/// (`1.10` stays `1.10`).
#[derive(Deserialize)]
struct ConfigFile {
    pull_repo: Repository,
    push_repo: Repository,

    #[serde(default = "default_tags", deserialize_with = "deserialize_tags")]
    tags: NonEmpty<Tag>,

    #[serde(default)]
    dry_run: bool,

    #[serde(default = "default_cleanup")]
    cleanup: bool,

    #[serde(default)]
    pull_login: Credential,

    #[serde(default)]
    push_login: Credential,

    #[serde(default)]
    daemon: DaemonConfig,

    #[serde(default)]
    executables: Executables,

    #[serde(default)]
    readiness: ReadinessConfig,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            promote: PromotionRequest::new(file.pull_repo, file.push_repo, file.tags),
            options: RunOptions {
                dry_run: file.dry_run,
                cleanup: file.cleanup,
            },
            pull_login: file.pull_login,
            push_login: file.push_login,
            daemon: file.daemon,
            executables: file.executables,
            readiness: file.readiness,
        }
    }
}

impl Config {
    /// A config with default options, guest logins and a managed daemon.
    pub fn new(promote: PromotionRequest) -> Self {
        Self {
            promote,
            options: RunOptions::default(),
            pull_login: Credential::default(),
            push_login: Credential::default(),
            daemon: DaemonConfig::default(),
            executables: Executables::default(),
            readiness: ReadinessConfig::default(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
