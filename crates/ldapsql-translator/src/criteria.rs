//! WHERE clause compilation

use ldapsql_ir::Condition;

use crate::capability::CapabilityPolicy;
use crate::error::TranslateError;
use crate::expression::ExpressionTranslator;

/// Filter used when the query has no WHERE clause
pub const DEFAULT_FILTER: &str = "(objectClass=*)";

pub struct CriteriaCompiler<'a> {
    translator: ExpressionTranslator<'a>,
}

impl<'a> CriteriaCompiler<'a> {
    pub fn new(policy: &'a CapabilityPolicy) -> Self {
        Self {
            translator: ExpressionTranslator::new(policy),
        }
    }

    /// Compile an optional WHERE tree. Any unsupported predicate fails the
    /// whole compilation; there is no partial pushdown.
    pub fn compile(&self, root: Option<&Condition>) -> Result<String, TranslateError> {
        match root {
            None => Ok(DEFAULT_FILTER.to_string()),
            Some(condition) => self.translator.translate(&push_negation(condition.clone())),
        }
    }
}

/// Move every negation down to the leaves.
///
/// De Morgan over AND/OR, double negations cancel, comparisons take their
/// complementary operator and LIKE/IN/IS NULL flip their `negated` flag. The
/// result contains no `Not` nodes.
pub fn push_negation(condition: Condition) -> Condition {
    match condition {
        Condition::Not { condition } => negate(*condition),
        Condition::And { conditions } => Condition::And {
            conditions: conditions.into_iter().map(push_negation).collect(),
        },
        Condition::Or { conditions } => Condition::Or {
            conditions: conditions.into_iter().map(push_negation).collect(),
        },
        leaf => leaf,
    }
}

fn negate(condition: Condition) -> Condition {
    match condition {
        Condition::Not { condition } => push_negation(*condition),
        Condition::And { conditions } => Condition::Or {
            conditions: conditions.into_iter().map(negate).collect(),
        },
        Condition::Or { conditions } => Condition::And {
            conditions: conditions.into_iter().map(negate).collect(),
        },
        Condition::Comparison { op, column, value } => Condition::Comparison {
            op: op.complement(),
            column,
            value,
        },
        Condition::Like {
            column,
            pattern,
            escape,
            negated,
        } => Condition::Like {
            column,
            pattern,
            escape,
            negated: !negated,
        },
        Condition::In {
            column,
            values,
            negated,
        } => Condition::In {
            column,
            values,
            negated: !negated,
        },
        Condition::IsNull { column, negated } => Condition::IsNull {
            column,
            negated: !negated,
        },
    }
}
