//! Static translator settings
//!
//! The builder receives one immutable `TranslatorConfig`; nothing here is read
//! from process-wide state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid {setting}: {value}")]
pub struct InvalidSetting {
    pub setting: &'static str,
    pub value: String,
}

/// Directory search scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// The base entry itself
    Base,
    /// Immediate children of the base entry
    #[default]
    OneLevel,
    /// The base entry and all of its descendants
    Subtree,
}

impl SearchScope {
    /// Scope value as encoded in a SearchRequest (RFC 4511 section 4.5.1)
    pub fn protocol_value(self) -> i32 {
        match self {
            SearchScope::Base => 0,
            SearchScope::OneLevel => 1,
            SearchScope::Subtree => 2,
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchScope::Base => "base",
            SearchScope::OneLevel => "one_level",
            SearchScope::Subtree => "subtree",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchScope {
    type Err = InvalidSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" | "object" => Ok(SearchScope::Base),
            "one_level" | "onelevel" | "one" => Ok(SearchScope::OneLevel),
            "subtree" | "sub" => Ok(SearchScope::Subtree),
            _ => Err(InvalidSetting {
                setting: "search scope",
                value: s.to_string(),
            }),
        }
    }
}

/// What to do when a WHERE clause references a column whose searchability
/// does not cover the predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsearchablePolicy {
    /// Fail the whole query as unsupported
    #[default]
    Reject,
    /// Compile the predicate anyway and log a warning
    Allow,
}

impl FromStr for UnsearchablePolicy {
    type Err = InvalidSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(UnsearchablePolicy::Reject),
            "allow" => Ok(UnsearchablePolicy::Allow),
            _ => Err(InvalidSetting {
                setting: "unsearchable column policy",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub default_scope: SearchScope,

    pub unsearchable_columns: UnsearchablePolicy,

    /// AND the table's declared objectClass into every filter
    pub restrict_to_object_class: bool,
}
