//! LDAP search filter grammar - typed tree, escaping and parser

mod ast;
pub mod escape;
mod parser;

pub use ast::Filter;
pub use escape::{escape_value, push_escaped, unescape_value};
pub use parser::{parse, FilterParser, ParseError, Rule};
