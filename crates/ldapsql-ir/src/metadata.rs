//! Resolved catalog metadata carried inside a query

use serde::{Deserialize, Serialize};

/// How a column may be used in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Searchability {
    #[default]
    Searchable,
    AllExceptLike,
    LikeOnly,
    Unsearchable,
}

impl Searchability {
    /// Whether comparisons, IN lists and null tests may reference the column
    pub fn allows_comparison(self) -> bool {
        matches!(self, Searchability::Searchable | Searchability::AllExceptLike)
    }

    /// Whether LIKE patterns may reference the column
    pub fn allows_like(self) -> bool {
        matches!(self, Searchability::Searchable | Searchability::LikeOnly)
    }
}

/// A virtual table backed by a directory subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,

    /// Distinguished name of the entry the search is rooted at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_class: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_in_source: None,
            object_class: None,
        }
    }

    pub fn with_name_in_source(mut self, dn: impl Into<String>) -> Self {
        self.name_in_source = Some(dn.into());
        self
    }

    pub fn with_object_class(mut self, object_class: impl Into<String>) -> Self {
        self.object_class = Some(object_class.into());
        self
    }
}

/// A column mapped onto a directory attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_source: Option<String>,

    #[serde(default)]
    pub searchability: Searchability,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_in_source: None,
            searchability: Searchability::default(),
        }
    }

    pub fn with_name_in_source(mut self, attribute: impl Into<String>) -> Self {
        self.name_in_source = Some(attribute.into());
        self
    }

    pub fn with_searchability(mut self, searchability: Searchability) -> Self {
        self.searchability = searchability;
        self
    }

    /// Attribute name known to the directory, falling back to the column name
    pub fn source_name(&self) -> &str {
        match self.name_in_source.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}
