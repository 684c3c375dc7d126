//! POSIX shell quoting for remote command lines

use crate::command::CommandSpec;

/// Wrap in single quotes, escaping embedded single quotes
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote a path, leaving a leading `~/` for the remote shell to expand
pub fn quote_path(s: &str) -> String {
    if s == "~" {
        return "~".to_string();
    }
    match s.strip_prefix("~/") {
        Some(rest) if rest.is_empty() => "~/".to_string(),
        Some(rest) => format!("~/{}", quote(rest)),
        None => quote(s),
    }
}

/// Build the command line handed to the remote login shell
///
/// `cd '<cwd>' && '<program>' '<arg>'...`
pub fn remote_command_line(spec: &CommandSpec) -> String {
    let mut parts = Vec::with_capacity(spec.args.len() + 1);
    parts.push(quote_path(&spec.program));
    parts.extend(spec.args.iter().map(|a| quote(a)));
    let command = parts.join(" ");

    match &spec.cwd {
        Some(dir) => format!("cd {} && {}", quote_path(dir), command),
        None => command,
    }
}
