//! Representability checks shared by the escaper and the expression translator
//!
//! Every "can the filter grammar say this" decision lives here so that the
//! failure messages stay consistent across call sites.

use ldapsql_ir::{Column, CompareOp, Literal};
use tracing::{debug, warn};

use crate::config::UnsearchablePolicy;
use crate::error::TranslateError;

/// How a predicate uses a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnUsage {
    /// Comparisons, IN lists and null tests
    Comparison,
    Like,
}

/// Filter item that implements a relational comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorMapping {
    /// `(attr<op>value)`
    Direct(&'static str),
    /// `(!(attr<op>value))`
    Negated(&'static str),
}

/// Map a comparison onto the three filter item operators.
///
/// The grammar has no strict inequality, so `>` and `<` negate the inclusive
/// complement. This is exact only when the directory orders the attribute the
/// same way the relational column is ordered.
///
/// Every `Negated` mapping (`<>`, `>`, `<`) also matches entries that lack the
/// attribute, where SQL would yield NULL and drop the row. The same holds for
/// negated LIKE and IN. This is intended: it keeps `NOT p` equal to `(!p)`,
/// which the negation push-down relies on (`NOT (a LIKE 'R%' OR ...)` becomes
/// `(&(!(a=R*))...)`). Callers needing SQL NULL semantics AND in an explicit
/// IS NOT NULL.
pub fn map_operator(op: CompareOp) -> OperatorMapping {
    match op {
        CompareOp::Eq => OperatorMapping::Direct("="),
        CompareOp::Le => OperatorMapping::Direct("<="),
        CompareOp::Ge => OperatorMapping::Direct(">="),
        CompareOp::Ne => OperatorMapping::Negated("="),
        CompareOp::Gt => OperatorMapping::Negated("<="),
        CompareOp::Lt => OperatorMapping::Negated(">="),
    }
}

/// Only `%` has a filter equivalent (`*`)
pub fn check_wildcard(wildcard: char) -> Result<(), TranslateError> {
    match wildcard {
        '%' => Ok(()),
        '_' => Err(TranslateError::Unsupported(
            "single-character wildcard not representable".to_string(),
        )),
        other => Err(TranslateError::Unsupported(format!(
            "'{other}' is not a LIKE wildcard"
        ))),
    }
}

/// Attribute description usable inside a filter item (RFC 4512 descr or
/// numeric OID, with options)
pub fn filter_attribute(column: &Column) -> Result<&str, TranslateError> {
    let name = column.source_name();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ';'));
    if valid {
        Ok(name)
    } else {
        Err(TranslateError::Translation(format!(
            "column {} maps to invalid attribute name '{name}'",
            column.name
        )))
    }
}

/// Render a literal as an unescaped assertion value
pub fn assertion_value(value: &Literal) -> Result<String, TranslateError> {
    match value {
        Literal::String(s) => Ok(s.clone()),
        Literal::Int(i) => Ok(i.to_string()),
        Literal::Float(f) if f.is_finite() => Ok(f.to_string()),
        Literal::Float(f) => Err(TranslateError::Unsupported(format!(
            "non-finite value {f} not representable"
        ))),
        // RFC 4517 Boolean syntax
        Literal::Bool(true) => Ok("TRUE".to_string()),
        Literal::Bool(false) => Ok("FALSE".to_string()),
        Literal::Null => Err(TranslateError::Unsupported(
            "comparison with NULL not representable".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityPolicy {
    unsearchable: UnsearchablePolicy,
}

impl CapabilityPolicy {
    pub fn new(unsearchable: UnsearchablePolicy) -> Self {
        Self { unsearchable }
    }

    pub fn check_searchable(&self, column: &Column, usage: ColumnUsage) -> Result<(), TranslateError> {
        let allowed = match usage {
            ColumnUsage::Comparison => column.searchability.allows_comparison(),
            ColumnUsage::Like => column.searchability.allows_like(),
        };
        if allowed {
            return Ok(());
        }

        match self.unsearchable {
            UnsearchablePolicy::Reject => {
                debug!(column = %column.name, ?usage, searchability = ?column.searchability, "rejecting predicate");
                Err(TranslateError::Unsupported(format!(
                    "column {} is not searchable with {}",
                    column.name,
                    match usage {
                        ColumnUsage::Comparison => "comparisons",
                        ColumnUsage::Like => "LIKE",
                    }
                )))
            }
            UnsearchablePolicy::Allow => {
                warn!(column = %column.name, ?usage, searchability = ?column.searchability, "compiling predicate on unsearchable column");
                Ok(())
            }
        }
    }
}
