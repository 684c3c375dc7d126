use super::{required_string_arg, string_prop};
use crate::error::Result;
use crate::model::DeployConfig;
use kdl::KdlNode;
use std::path::PathBuf;

/// Parse `repository "/remote/path" { local "."; upstream "origin" branch="master" }`
pub fn parse_repository(node: &KdlNode, config: &mut DeployConfig) -> Result<()> {
    config.remote_repo_path = required_string_arg(node)?;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "local" => config.local_repo_path = PathBuf::from(required_string_arg(child)?),
                "upstream" => {
                    config.upstream.remote = required_string_arg(child)?;
                    if let Some(branch) = string_prop(child, "branch")? {
                        config.upstream.branch = branch;
                    }
                }
                "branch" => config.upstream.branch = required_string_arg(child)?,
                other => {
                    tracing::warn!("Ignoring unknown repository setting '{}'", other);
                }
            }
        }
    }

    Ok(())
}
