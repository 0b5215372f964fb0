// ABOUTME: Settings for the background image daemon started before promotion.
// ABOUTME: Each optional field maps to zero or more daemon command-line flags.

use serde::Deserialize;

/// Storage root used when none is configured.
pub const DEFAULT_STORAGE_PATH: &str = "/var/lib/docker";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Registry trusted without TLS when `insecure` is set.
    pub registry: Option<String>,
    pub mirror: Option<String>,
    pub storage_driver: Option<String>,
    pub storage_path: String,
    pub insecure: bool,
    pub insecure_registries: Vec<String>,
    /// Bridge IP address.
    pub bip: Option<String>,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
    pub mtu: Option<String>,
    pub ipv6: bool,
    pub experimental: bool,
    /// Forward daemon output to our own stdout/stderr.
    pub debug: bool,
    /// The daemon is managed elsewhere; do not start one.
    pub disabled: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            registry: None,
            mirror: None,
            storage_driver: None,
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            insecure: false,
            insecure_registries: Vec::new(),
            bip: None,
            dns: Vec::new(),
            dns_search: Vec::new(),
            mtu: None,
            ipv6: false,
            experimental: false,
            debug: false,
            disabled: false,
        }
    }
}

impl DaemonConfig {
    /// Build the daemon argument vector. Empty or unset fields emit nothing.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-g".to_string(), self.storage_path.clone()];

        if let Some(driver) = present(&self.storage_driver) {
            push_pair(&mut args, "-s", driver);
        }
        if self.insecure
            && let Some(registry) = present(&self.registry)
        {
            push_pair(&mut args, "--insecure-registry", registry);
        }
        for registry in &self.insecure_registries {
            push_pair(&mut args, "--insecure-registry", registry);
        }
        if self.ipv6 {
            args.push("--ipv6".to_string());
        }
        if let Some(mirror) = present(&self.mirror) {
            push_pair(&mut args, "--registry-mirror", mirror);
        }
        if let Some(bip) = present(&self.bip) {
            push_pair(&mut args, "--bip", bip);
        }
        for server in &self.dns {
            push_pair(&mut args, "--dns", server);
        }
        for domain in &self.dns_search {
            push_pair(&mut args, "--dns-search", domain);
        }
        if let Some(mtu) = present(&self.mtu) {
            push_pair(&mut args, "--mtu", mtu);
        }
        if self.experimental {
            args.push("--experimental".to_string());
        }

        args
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}
