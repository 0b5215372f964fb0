// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every option can also be set through its PLUGIN_* environment variable.

use clap::{ArgAction, Args, Parser, ValueEnum};
use image_promote::config::{
    Config, Credential, DEFAULT_DOCKER, DEFAULT_DOCKERD, DEFAULT_REGISTRY, DEFAULT_STORAGE_PATH,
    DaemonConfig, Executables, PromotionRequest, ReadinessConfig, RunOptions, TAGS_FILENAME,
    env_flag, first_env, resolve_tags,
};
use image_promote::error::{Error, Result};
use image_promote::output::OutputMode;
use image_promote::types::Repository;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-promote")]
#[command(about = "Pull an image, retag it into another repository, and push it")]
#[command(version)]
pub struct Cli {
    /// Load all settings from a YAML file instead of flags
    #[arg(long, env = "PLUGIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, env = "PLUGIN_OUTPUT", default_value_t = OutputFormat::Normal)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, env = "PLUGIN_VERBOSE")]
    pub verbose: bool,

    #[command(flatten)]
    pub promote: PromoteArgs,

    #[command(flatten)]
    pub pull_login: PullLoginArgs,

    #[command(flatten)]
    pub push_login: PushLoginArgs,

    #[command(flatten)]
    pub daemon: DaemonArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Normal,
    Json,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Normal => OutputMode::Normal,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

#[derive(Args)]
#[command(next_help_heading = "Promotion")]
pub struct PromoteArgs {
    /// Repository to pull from
    #[arg(long, env = "PLUGIN_PULL_REPO", required_unless_present = "config")]
    pub pull_repo: Option<String>,

    /// Repository to retag into and push to
    #[arg(long, env = "PLUGIN_PUSH_REPO", required_unless_present = "config")]
    pub push_repo: Option<String>,

    /// Tags to promote (comma separated)
    #[arg(long, env = "PLUGIN_TAG", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Read only when neither --tags nor PLUGIN_TAG is set
    #[arg(long = "tags-fallback", env = "PLUGIN_TAGS", value_delimiter = ',', hide = true)]
    pub tags_fallback: Vec<String>,

    /// File listing tags, used when no tags are given
    #[arg(long, env = "PLUGIN_TAGS_FILE", default_value = TAGS_FILENAME)]
    pub tags_file: PathBuf,

    /// Skip pushing; pull, retag and cleanup still run
    #[arg(long, env = "PLUGIN_DRY_RUN")]
    pub dry_run: bool,

    /// Remove local images after each tag and prune at the end
    #[arg(long, env = "PLUGIN_PURGE", default_value_t = true, action = ArgAction::Set)]
    pub cleanup: bool,

    /// Path to the docker client binary
    #[arg(long, env = "PLUGIN_DOCKER_BIN", default_value = DEFAULT_DOCKER)]
    pub docker_bin: PathBuf,

    /// Path to the docker daemon binary
    #[arg(long, env = "PLUGIN_DOCKERD_BIN", default_value = DEFAULT_DOCKERD)]
    pub dockerd_bin: PathBuf,
}

#[derive(Args)]
#[command(next_help_heading = "Pull registry")]
pub struct PullLoginArgs {
    /// Registry to log in to before pulling
    #[arg(long, env = "PLUGIN_PULL_REGISTRY")]
    pub pull_registry: Option<String>,

    #[arg(long, env = "PLUGIN_PULL_USERNAME")]
    pub pull_username: Option<String>,

    #[arg(long, env = "PLUGIN_PULL_PASSWORD", hide_env_values = true)]
    pub pull_password: Option<String>,

    #[arg(long, env = "PLUGIN_PULL_EMAIL")]
    pub pull_email: Option<String>,
}

#[derive(Args)]
#[command(next_help_heading = "Push registry")]
pub struct PushLoginArgs {
    /// Registry to log in to before pushing
    #[arg(long, env = "PLUGIN_PUSH_REGISTRY")]
    pub push_registry: Option<String>,

    #[arg(long, env = "PLUGIN_PUSH_USERNAME")]
    pub push_username: Option<String>,

    #[arg(long, env = "PLUGIN_PUSH_PASSWORD", hide_env_values = true)]
    pub push_password: Option<String>,

    #[arg(long, env = "PLUGIN_PUSH_EMAIL")]
    pub push_email: Option<String>,
}

#[derive(Args)]
#[command(next_help_heading = "Daemon")]
pub struct DaemonArgs {
    /// Registry the daemon trusts without TLS (requires --insecure)
    #[arg(long, env = "PLUGIN_DAEMON_REGISTRY")]
    pub daemon_registry: Option<String>,

    /// Registry mirror
    #[arg(long, env = "PLUGIN_MIRROR")]
    pub mirror: Option<String>,

    #[arg(long, env = "PLUGIN_STORAGE_DRIVER")]
    pub storage_driver: Option<String>,

    #[arg(long, env = "PLUGIN_STORAGE_PATH", default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: String,

    /// Bridge IP address
    #[arg(long, env = "PLUGIN_BIP")]
    pub bip: Option<String>,

    #[arg(long, env = "PLUGIN_MTU")]
    pub mtu: Option<String>,

    /// DNS servers (comma separated)
    #[arg(long, env = "PLUGIN_CUSTOM_DNS", value_delimiter = ',')]
    pub dns: Vec<String>,

    /// DNS search domains (comma separated)
    #[arg(long, env = "PLUGIN_CUSTOM_DNS_SEARCH", value_delimiter = ',')]
    pub dns_search: Vec<String>,

    /// Registries the daemon trusts without TLS (comma separated)
    #[arg(long, env = "PLUGIN_INSECURE_REGISTRIES", value_delimiter = ',')]
    pub insecure_registries: Vec<String>,

    /// Allow the daemon registry without TLS
    #[arg(long, env = "PLUGIN_INSECURE")]
    pub insecure: bool,

    #[arg(long, env = "PLUGIN_IPV6")]
    pub ipv6: bool,

    #[arg(long, env = "PLUGIN_EXPERIMENTAL")]
    pub experimental: bool,

    /// Show daemon output
    #[arg(long, env = "PLUGIN_DEBUG")]
    pub daemon_debug: bool,

    /// Don't start the daemon; use one that is already running
    #[arg(long, env = "PLUGIN_DAEMON_OFF")]
    pub daemon_off: bool,
}

impl Cli {
    /// Build the run configuration, either from `--config` or from flags.
    pub fn into_config(self) -> Result<Config> {
        if let Some(path) = &self.config {
            tracing::debug!("loading configuration from {}", path.display());
            return Config::load(path);
        }

        let promote = self.promote;
        let source = required(promote.pull_repo, "pull repository")?;
        let destination = required(promote.push_repo, "push repository")?;

        let explicit = if promote.tags.is_empty() {
            promote.tags_fallback
        } else {
            promote.tags
        };
        let tags = resolve_tags(&explicit, &promote.tags_file)?;

        Ok(Config {
            promote: PromotionRequest::new(
                Repository::new(&source)?,
                Repository::new(&destination)?,
                tags,
            ),
            options: RunOptions {
                dry_run: promote.dry_run,
                cleanup: promote.cleanup,
            },
            pull_login: credential(
                self.pull_login.pull_registry,
                self.pull_login.pull_username,
                self.pull_login.pull_password,
                self.pull_login.pull_email,
            ),
            push_login: credential(
                self.push_login.push_registry,
                self.push_login.push_username,
                self.push_login.push_password,
                self.push_login.push_email,
            ),
            daemon: self.daemon.into_daemon_config(),
            executables: Executables {
                docker: promote.docker_bin,
                dockerd: promote.dockerd_bin,
            },
            readiness: ReadinessConfig::default(),
        })
    }
}

impl DaemonArgs {
    fn into_daemon_config(self) -> DaemonConfig {
        DaemonConfig {
            registry: self.daemon_registry,
            mirror: self.mirror,
            storage_driver: self.storage_driver,
            storage_path: self.storage_path,
            insecure: self.insecure,
            insecure_registries: self.insecure_registries,
            bip: self.bip,
            dns: self.dns,
            dns_search: self.dns_search,
            mtu: self.mtu,
            ipv6: self.ipv6,
            experimental: self.experimental,
            debug: self.daemon_debug || env_flag("DOCKER_LAUNCH_DEBUG"),
            disabled: self.daemon_off,
        }
    }
}

fn required(value: Option<String>, what: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::InvalidConfig(format!("{what} is required")))
}

/// Flag or PLUGIN_* value first, then the shared DOCKER_* variable.
fn credential(
    registry: Option<String>,
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
) -> Credential {
    let registry = registry
        .or_else(|| first_env(&["DOCKER_REGISTRY"]))
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

    Credential::new(
        registry,
        username
            .or_else(|| first_env(&["DOCKER_USERNAME"]))
            .unwrap_or_default(),
        password
            .or_else(|| first_env(&["DOCKER_PASSWORD"]))
            .unwrap_or_default(),
    )
    .with_email(
        email
            .or_else(|| first_env(&["DOCKER_EMAIL"]))
            .unwrap_or_default(),
    )
}
