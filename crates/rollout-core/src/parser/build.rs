use super::{integer_prop, required_string_arg, secs_from, string_prop};
use crate::error::Result;
use crate::model::{BuildSpec, Timeouts, Tools};
use kdl::KdlNode;

/// Parse `build image="cydev/kafe" { template ..; output ..; placeholder .. }`
pub fn parse_build(node: &KdlNode, build: &mut BuildSpec) -> Result<()> {
    if let Some(image) = string_prop(node, "image")? {
        build.image = image;
    }

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "image" => build.image = required_string_arg(child)?,
                "template" => build.template = required_string_arg(child)?,
                "output" => build.output = required_string_arg(child)?,
                "placeholder" => build.placeholder = required_string_arg(child)?,
                other => {
                    tracing::warn!("Ignoring unknown build setting '{}'", other);
                }
            }
        }
    }

    Ok(())
}

/// Parse `tools git="git" container="podman"`
pub fn parse_tools(node: &KdlNode, tools: &mut Tools) -> Result<()> {
    if let Some(git) = string_prop(node, "git")? {
        tools.git = git;
    }
    if let Some(container) = string_prop(node, "container")? {
        tools.container = container;
    }
    Ok(())
}

/// Parse `timeouts command=600 connect=10` (seconds)
pub fn parse_timeouts(node: &KdlNode, timeouts: &mut Timeouts) -> Result<()> {
    if let Some(command) = integer_prop(node, "command")? {
        timeouts.command_secs = secs_from(command, "command")?;
    }
    if let Some(connect) = integer_prop(node, "connect")? {
        timeouts.connect_secs = secs_from(connect, "connect")?;
    }
    Ok(())
}
