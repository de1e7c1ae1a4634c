//! Directory-backed `People` table used across the integration tests

#![allow(dead_code)]

use ldapsql_ir::{Column, Searchability, Table};

pub const PEOPLE_DN: &str = "ou=people,dc=metamatrix,dc=com";

pub fn people() -> Table {
    Table::new("People").with_name_in_source(PEOPLE_DN)
}

pub fn user_id() -> Column {
    Column::new("UserID").with_name_in_source("uid")
}

pub fn name() -> Column {
    Column::new("Name").with_name_in_source("cn")
}

/// No name in source: the attribute is the column name itself
pub fn dn() -> Column {
    Column::new("dn")
}

pub fn hidden_name() -> Column {
    name().with_searchability(Searchability::Unsearchable)
}
