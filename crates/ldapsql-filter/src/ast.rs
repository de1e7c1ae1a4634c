//! Typed LDAP search filter tree
//!
//! Values are stored unescaped; `Display` renders the canonical escaped
//! string form.

use std::fmt;

use serde::Serialize;

use crate::escape::escape_value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Equality { attr: String, value: String },
    GreaterOrEqual { attr: String, value: String },
    LessOrEqual { attr: String, value: String },
    Approx { attr: String, value: String },
    Present { attr: String },
    Substrings {
        attr: String,
        initial: Option<String>,
        any: Vec<String>,
        end: Option<String>,
    },
}

impl Filter {
    pub fn equality(attr: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equality {
            attr: attr.into(),
            value: value.into(),
        }
    }

    pub fn present(attr: impl Into<String>) -> Self {
        Filter::Present { attr: attr.into() }
    }

    pub fn not(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }

    /// Number of nested filter components, the root included
    pub fn size(&self) -> usize {
        match self {
            Filter::And(children) | Filter::Or(children) => {
                1 + children.iter().map(Filter::size).sum::<usize>()
            }
            Filter::Not(child) => 1 + child.size(),
            _ => 1,
        }
    }
}

/// Canonical RFC 4515 rendering with escaped values.
///
/// Parsed filters re-render byte for byte. Hand-built `Substrings` are
/// normalized: empty `initial`/`end` and empty `any` segments are omitted,
/// so `Substrings { initial: None, any: [], end: None }` renders as the
/// presence filter `(attr=*)`.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(children) => {
                f.write_str("(&")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Filter::Or(children) => {
                f.write_str("(|")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Filter::Not(child) => write!(f, "(!{child})"),
            Filter::Equality { attr, value } => write!(f, "({attr}={})", escape_value(value)),
            Filter::GreaterOrEqual { attr, value } => {
                write!(f, "({attr}>={})", escape_value(value))
            }
            Filter::LessOrEqual { attr, value } => write!(f, "({attr}<={})", escape_value(value)),
            Filter::Approx { attr, value } => write!(f, "({attr}~={})", escape_value(value)),
            Filter::Present { attr } => write!(f, "({attr}=*)"),
            Filter::Substrings {
                attr,
                initial,
                any,
                end,
            } => {
                write!(f, "({attr}=")?;
                if let Some(initial) = initial {
                    f.write_str(&escape_value(initial))?;
                }
                f.write_str("*")?;
                for part in any.iter().filter(|part| !part.is_empty()) {
                    write!(f, "{}*", escape_value(part))?;
                }
                if let Some(end) = end {
                    f.write_str(&escape_value(end))?;
                }
                f.write_str(")")
            }
        }
    }
}
