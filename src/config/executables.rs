// ABOUTME: Locations of the image client and daemon binaries.
// ABOUTME: Injected so tests can point at stub executables.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DOCKER: &str = "/usr/local/bin/docker";
pub const DEFAULT_DOCKERD: &str = "/usr/local/bin/dockerd";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Executables {
    #[serde(default = "default_docker")]
    pub docker: PathBuf,

    #[serde(default = "default_dockerd")]
    pub dockerd: PathBuf,
}

fn default_docker() -> PathBuf {
    PathBuf::from(DEFAULT_DOCKER)
}

fn default_dockerd() -> PathBuf {
    PathBuf::from(DEFAULT_DOCKERD)
}

impl Default for Executables {
    fn default() -> Self {
        Self {
            docker: default_docker(),
            dockerd: default_dockerd(),
        }
    }
}
