//! KDL parser
//!
//! Reads a rollout.kdl document into a [`DeployConfig`]. Each top-level
//! node type is handled in its own module. Validation happens later in
//! the loader, after environment overrides have been applied.

mod build;
mod remote;
mod repository;

use build::{parse_build, parse_timeouts, parse_tools};
use remote::parse_remote;
use repository::parse_repository;

use crate::error::{CoreError, Result};
use crate::model::DeployConfig;
use kdl::{KdlDocument, KdlNode, KdlValue};
use std::fs;
use std::path::Path;

/// Parse a KDL file into a DeployConfig
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<DeployConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CoreError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_kdl_string(&content)
}

/// Parse a KDL string into a DeployConfig
///
/// Unset settings keep their defaults; required settings left empty are
/// reported by [`DeployConfig::validate`].
pub fn parse_kdl_string(content: &str) -> Result<DeployConfig> {
    let doc: KdlDocument = content.parse()?;
    let mut config = DeployConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "remote" => config.remote = parse_remote(node)?,
            "repository" => parse_repository(node, &mut config)?,
            "build" => parse_build(node, &mut config.build)?,
            "container" => config.container = required_string_arg(node)?,
            "proxy" => config.proxy = required_string_arg(node)?,
            "restart-helper" => config.restart_helper = required_string_arg(node)?,
            "tools" => parse_tools(node, &mut config.tools)?,
            "timeouts" => parse_timeouts(node, &mut config.timeouts)?,
            other => {
                tracing::warn!("Ignoring unknown config node '{}'", other);
            }
        }
    }

    Ok(config)
}

/// First positional argument of a node
fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn string_arg(node: &KdlNode) -> Result<Option<String>> {
    match first_arg(node) {
        None => Ok(None),
        Some(value) => value
            .as_string()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "'{}' expects a string argument",
                    node.name().value()
                ))
            }),
    }
}

fn required_string_arg(node: &KdlNode) -> Result<String> {
    string_arg(node)?.ok_or_else(|| {
        CoreError::InvalidConfig(format!("'{}' requires a value", node.name().value()))
    })
}

fn string_prop(node: &KdlNode, key: &str) -> Result<Option<String>> {
    match node.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_string()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "'{}' property {} must be a string",
                    node.name().value(),
                    key
                ))
            }),
    }
}

fn integer_value(node: &KdlNode, value: &KdlValue, what: &str) -> Result<i128> {
    value.as_integer().ok_or_else(|| {
        CoreError::InvalidConfig(format!(
            "'{}' {} must be an integer",
            node.name().value(),
            what
        ))
    })
}

fn integer_prop(node: &KdlNode, key: &str) -> Result<Option<i128>> {
    node.get(key)
        .map(|value| integer_value(node, value, key))
        .transpose()
}

fn port_from(value: i128) -> Result<u16> {
    u16::try_from(value)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| CoreError::InvalidConfig(format!("invalid port: {}", value)))
}

fn secs_from(value: i128, what: &str) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| CoreError::InvalidConfig(format!("invalid {} timeout: {}", what, value)))
}
