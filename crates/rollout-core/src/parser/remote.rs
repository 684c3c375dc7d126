use super::{
    first_arg, integer_prop, integer_value, port_from, required_string_arg, string_arg,
    string_prop,
};
use crate::error::{CoreError, Result};
use crate::model::RemoteHost;
use kdl::KdlNode;
use std::path::PathBuf;

/// Parse `remote "host" user="root" port=122 { identity "~/.ssh/key" }`
///
/// `user` and `port` are accepted both as properties and as children.
pub fn parse_remote(node: &KdlNode) -> Result<RemoteHost> {
    let host = required_string_arg(node)?;
    let mut remote = RemoteHost::new(host);

    remote.user = string_prop(node, "user")?;
    if let Some(port) = integer_prop(node, "port")? {
        remote.port = Some(port_from(port)?);
    }

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "user" => remote.user = string_arg(child)?,
                "port" => {
                    let value = first_arg(child).ok_or_else(|| {
                        CoreError::InvalidConfig("'port' requires a value".to_string())
                    })?;
                    remote.port = Some(port_from(integer_value(child, value, "value")?)?);
                }
                "identity" => remote.identity = string_arg(child)?.map(PathBuf::from),
                other => {
                    tracing::warn!("Ignoring unknown remote setting '{}'", other);
                }
            }
        }
    }

    Ok(remote)
}
