use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shortest abbreviated hash accepted
pub const MIN_LEN: usize = 4;
/// SHA-256 object names are the longest git produces
pub const MAX_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRevision {
    #[error("revision is empty")]
    Empty,

    #[error("revision has {0} characters, expected {MIN_LEN} to {MAX_LEN}")]
    Length(usize),

    #[error("revision contains non-hex character {0:?}")]
    Character(char),
}

/// A commit identifier as printed by `git rev-parse HEAD`
///
/// The value ends up in a rendered build file on the remote host, so it
/// is restricted to hex digits no matter where it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision(String);

impl Revision {
    /// Parse command output, ignoring surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, InvalidRevision> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(InvalidRevision::Empty);
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(InvalidRevision::Character(c));
        }
        if !(MIN_LEN..=MAX_LEN).contains(&value.len()) {
            return Err(InvalidRevision::Length(value.len()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, for display
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }
}

impl FromStr for Revision {
    type Err = InvalidRevision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = InvalidRevision;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Revision> for String {
    fn from(revision: Revision) -> Self {
        revision.0
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
