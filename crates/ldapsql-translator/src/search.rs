//! Search descriptor assembly

use ldapsql_ir::{Condition, Expr, OrderItem, Query, Table};
use serde::Serialize;
use tracing::debug;

use crate::capability::CapabilityPolicy;
use crate::config::{SearchScope, TranslatorConfig};
use crate::criteria::CriteriaCompiler;
use crate::error::TranslateError;
use crate::escape::escape_value;

/// `count_limit` value meaning "no cap"
pub const UNBOUNDED: i64 = -1;

/// Server-side sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub attribute: String,
    pub ascending: bool,
}

/// Compiled parameters of one directory search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchDescriptor {
    /// Entry the search is rooted at
    pub base_name: String,
    pub filter: String,
    /// Requested attributes in projection order, repeats included
    pub attributes: Vec<String>,
    pub scope: SearchScope,
    /// Row cap from LIMIT, or [`UNBOUNDED`]. A LIMIT 0 query yields 0 here,
    /// which clients must not forward as a protocol size limit (0 means no
    /// limit on the wire).
    pub count_limit: i64,
    pub sort_keys: Option<Vec<SortKey>>,
}

impl SearchDescriptor {
    pub fn is_unbounded(&self) -> bool {
        self.count_limit == UNBOUNDED
    }
}

/// Builds search descriptors from resolved queries.
///
/// Holds only immutable configuration and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SearchDescriptorBuilder {
    config: TranslatorConfig,
    policy: CapabilityPolicy,
}

impl SearchDescriptorBuilder {
    pub fn new(config: TranslatorConfig) -> Self {
        let policy = CapabilityPolicy::new(config.unsearchable_columns);
        Self { config, policy }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn build(&self, query: &Query) -> Result<SearchDescriptor, TranslateError> {
        let table = single_table(query)?;
        let base_name = base_name(table)?;

        let attributes = query
            .projection
            .iter()
            .map(|expr| attribute_name(expr, "projection"))
            .collect::<Result<Vec<_>, _>>()?;

        let filter = self.compile_filter(table, query.selection.as_ref())?;

        let sort_keys = query
            .order_by
            .as_deref()
            .filter(|items| !items.is_empty())
            .map(|items| items.iter().map(sort_key).collect::<Result<Vec<_>, _>>())
            .transpose()?;

        let count_limit = match query.limit {
            None => UNBOUNDED,
            Some(rows) if rows >= 0 => rows,
            Some(rows) => {
                return Err(TranslateError::Translation(format!(
                    "negative row limit: {rows}"
                )))
            }
        };

        debug!(
            table = %table.name,
            fingerprint = %query.fingerprint(),
            base_name = %base_name,
            filter = %filter,
            scope = %self.config.default_scope,
            count_limit,
            "compiled directory search"
        );

        Ok(SearchDescriptor {
            base_name,
            filter,
            attributes,
            scope: self.config.default_scope,
            count_limit,
            sort_keys,
        })
    }

    fn compile_filter(&self, table: &Table, selection: Option<&Condition>) -> Result<String, TranslateError> {
        let filter = CriteriaCompiler::new(&self.policy).compile(selection)?;

        match table.object_class.as_deref() {
            Some(object_class) if self.config.restrict_to_object_class => {
                let restriction = format!("(objectClass={})", escape_value(object_class));
                Ok(match selection {
                    None => restriction,
                    Some(_) => format!("(&{restriction}{filter})"),
                })
            }
            _ => Ok(filter),
        }
    }
}

fn single_table(query: &Query) -> Result<&Table, TranslateError> {
    match query.from.as_slice() {
        [table] => Ok(table),
        [] => Err(TranslateError::Translation(
            "query has no FROM table".to_string(),
        )),
        tables => Err(TranslateError::Translation(format!(
            "joins are not supported ({} tables in FROM)",
            tables.len()
        ))),
    }
}

fn base_name(table: &Table) -> Result<String, TranslateError> {
    match table.name_in_source.as_deref() {
        Some(dn) if !dn.trim().is_empty() => Ok(dn.to_string()),
        _ => Err(TranslateError::Translation(format!(
            "table {} has no name in source to use as search base",
            table.name
        ))),
    }
}

fn attribute_name(expr: &Expr, clause: &str) -> Result<String, TranslateError> {
    match expr {
        Expr::Column { column } => Ok(column.source_name().to_string()),
        Expr::Literal { value } => Err(TranslateError::Translation(format!(
            "only columns are allowed in the {clause}, found literal {value:?}"
        ))),
    }
}

fn sort_key(item: &OrderItem) -> Result<SortKey, TranslateError> {
    Ok(SortKey {
        attribute: attribute_name(&item.expr, "ORDER BY")?,
        ascending: !item.desc,
    })
}
