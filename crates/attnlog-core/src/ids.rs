//! Validated identifiers.
//!
//! Both identifiers are user-typed strings. They are trimmed on entry and
//! rejected when nothing remains.

use crate::error::{AttnError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The student identity, the top-level persistence partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

/// A session name, unique within one [`StudentId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

fn trimmed(input: &str, what: &str) -> Result<String> {
    let value = input.trim();
    if value.is_empty() {
        return Err(AttnError::validation(format!("{} must not be empty", what)));
    }
    Ok(value.to_string())
}

impl StudentId {
    /// Parses raw user input into a student id.
    pub fn parse(input: &str) -> Result<Self> {
        trimmed(input, "Student ID").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SessionId {
    /// Parses raw user input into a session id.
    pub fn parse(input: &str) -> Result<Self> {
        trimmed(input, "Session ID").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StudentId {
    type Error = AttnError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for SessionId {
    type Error = AttnError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
