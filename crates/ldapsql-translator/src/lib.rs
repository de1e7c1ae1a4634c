//! Search Translator: compiles resolved SQL-shaped queries into LDAP search
//! parameters.
//!
//! Pipeline: `Query` → [`SearchDescriptorBuilder`] pulls out projection,
//! ordering and limit → [`CriteriaCompiler`] normalizes the WHERE tree and
//! hands it to the [`ExpressionTranslator`], which consults the escaper and
//! the capability checks → immutable [`SearchDescriptor`].
//!
//! Compilation is pure: no I/O, no shared mutable state.

pub mod capability;
mod config;
mod criteria;
mod error;
pub mod escape;
mod expression;
mod search;

pub use capability::CapabilityPolicy;
pub use config::{InvalidSetting, SearchScope, TranslatorConfig, UnsearchablePolicy};
pub use criteria::{push_negation, CriteriaCompiler, DEFAULT_FILTER};
pub use error::TranslateError;
pub use escape::{escape_value, translate_like_pattern};
pub use expression::ExpressionTranslator;
pub use search::{SearchDescriptor, SearchDescriptorBuilder, SortKey, UNBOUNDED};

use ldapsql_ir::Query;

/// Compile a query with the given configuration
pub fn translate(query: &Query, config: TranslatorConfig) -> Result<SearchDescriptor, TranslateError> {
    SearchDescriptorBuilder::new(config).build(query)
}
