use serde::{Deserialize, Serialize};

/// How the build file is rendered and which image it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Template path, relative to the remote checkout
    pub template: String,
    /// Rendered build-file path, relative to the remote checkout
    pub output: String,
    /// Literal token replaced by the revision
    pub placeholder: String,
    /// Image tag passed to `build -t`
    pub image: String,
}

impl Default for BuildSpec {
    fn default() -> Self {
        Self {
            template: "Dockerfile.template".to_string(),
            output: "Dockerfile".to_string(),
            placeholder: "VERSION".to_string(),
            image: String::new(),
        }
    }
}

/// Branch pulled into the remote checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upstream {
    pub remote: String,
    pub branch: String,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "master".to_string(),
        }
    }
}

/// External binaries rollout invokes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tools {
    /// Version-control binary
    pub git: String,
    /// Container runtime binary (docker, podman)
    pub container: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            container: "docker".to_string(),
        }
    }
}
