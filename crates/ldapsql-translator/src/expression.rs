//! Renders one predicate node as a filter fragment

use ldapsql_ir::{Column, CompareOp, Condition, Literal};

use crate::capability::{
    assertion_value, filter_attribute, map_operator, CapabilityPolicy, ColumnUsage, OperatorMapping,
};
use crate::error::TranslateError;
use crate::escape::{escape_value, translate_like_pattern};

pub struct ExpressionTranslator<'a> {
    policy: &'a CapabilityPolicy,
}

impl<'a> ExpressionTranslator<'a> {
    pub fn new(policy: &'a CapabilityPolicy) -> Self {
        Self { policy }
    }

    /// Translate a predicate tree into a fully parenthesized filter
    pub fn translate(&self, condition: &Condition) -> Result<String, TranslateError> {
        match condition {
            Condition::Comparison { op, column, value } => {
                self.translate_comparison(*op, column, value)
            }
            Condition::Not { condition } => Ok(negate(&self.translate(condition)?)),
            Condition::And { conditions } => self.translate_group('&', conditions),
            Condition::Or { conditions } => self.translate_group('|', conditions),
            Condition::Like {
                column,
                pattern,
                escape,
                negated,
            } => self.translate_like(column, pattern, *escape, *negated),
            Condition::In {
                column,
                values,
                negated,
            } => self.translate_in(column, values, *negated),
            Condition::IsNull { column, negated } => self.translate_is_null(column, *negated),
        }
    }

    fn translate_comparison(
        &self,
        op: CompareOp,
        column: &Column,
        value: &Literal,
    ) -> Result<String, TranslateError> {
        self.policy.check_searchable(column, ColumnUsage::Comparison)?;
        let attr = filter_attribute(column)?;
        let value = escape_value(&assertion_value(value)?);

        Ok(match map_operator(op) {
            OperatorMapping::Direct(symbol) => format!("({attr}{symbol}{value})"),
            OperatorMapping::Negated(symbol) => negate(&format!("({attr}{symbol}{value})")),
        })
    }

    fn translate_group(&self, operator: char, conditions: &[Condition]) -> Result<String, TranslateError> {
        // after negation push-down `operator` may not be the one written
        if conditions.is_empty() {
            return Err(TranslateError::Translation(
                "empty AND/OR group".to_string(),
            ));
        }

        let mut fragment = String::from("(");
        fragment.push(operator);
        for condition in conditions {
            fragment.push_str(&self.translate(condition)?);
        }
        fragment.push(')');
        Ok(fragment)
    }

    fn translate_like(
        &self,
        column: &Column,
        pattern: &str,
        escape: Option<char>,
        negated: bool,
    ) -> Result<String, TranslateError> {
        self.policy.check_searchable(column, ColumnUsage::Like)?;
        let attr = filter_attribute(column)?;
        let body = translate_like_pattern(pattern, escape)?;

        let item = format!("({attr}={body})");
        Ok(if negated { negate(&item) } else { item })
    }

    fn translate_in(
        &self,
        column: &Column,
        values: &[Literal],
        negated: bool,
    ) -> Result<String, TranslateError> {
        if values.is_empty() {
            return Err(TranslateError::Translation(format!(
                "IN predicate on column {} has no values",
                column.name
            )));
        }

        let disjunction = Condition::Or {
            conditions: values
                .iter()
                .map(|value| Condition::Comparison {
                    op: CompareOp::Eq,
                    column: column.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        let fragment = self.translate(&disjunction)?;
        // NOT IN also matches entries without the attribute, see `map_operator`
        Ok(if negated { negate(&fragment) } else { fragment })
    }

    fn translate_is_null(&self, column: &Column, negated: bool) -> Result<String, TranslateError> {
        self.policy.check_searchable(column, ColumnUsage::Comparison)?;
        let present = format!("({}=*)", filter_attribute(column)?);
        // IS NULL holds when the attribute is absent
        Ok(if negated { present } else { negate(&present) })
    }
}

fn negate(fragment: &str) -> String {
    format!("(!{fragment})")
}
