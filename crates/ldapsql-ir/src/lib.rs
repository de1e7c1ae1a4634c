//! ldapsql query object
//!
//! The resolved, SQL-shaped query handed over by the relational layer. Every
//! column and table reference already carries its catalog metadata, so the
//! translator never needs to consult a catalog of its own.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

mod metadata;
pub use metadata::*;

/// A resolved SELECT against a single virtual table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub from: Vec<Table>,

    #[serde(default)]
    pub projection: Vec<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Query {
    /// Start a query against one table with an empty projection
    pub fn from_table(table: Table) -> Self {
        Self {
            from: vec![table],
            projection: Vec::new(),
            selection: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.projection
            .extend(columns.into_iter().map(|column| Expr::Column { column }));
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.selection = Some(condition);
        self
    }

    pub fn order_by(mut self, items: Vec<OrderItem>) -> Self {
        self.order_by = Some(items);
        self
    }

    pub fn limit(mut self, rows: i64) -> Self {
        self.limit = Some(rows);
        self
    }

    /// Calculate fingerprint (SHA-256) used to correlate log lines
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).expect("query should always serialize");
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub expr: Expr,
    #[serde(default)]
    pub desc: bool,
}

impl OrderItem {
    pub fn asc(column: Column) -> Self {
        Self {
            expr: Expr::Column { column },
            desc: false,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            expr: Expr::Column { column },
            desc: true,
        }
    }
}

/// Projection and ORDER BY expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Column { column: Column },
    Literal { value: Literal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Operator that holds exactly when `self` does not
    pub fn complement(self) -> Self {
        match self {
            CompareOp::Eq => CompareOp::Ne,
            CompareOp::Ne => CompareOp::Eq,
            CompareOp::Lt => CompareOp::Ge,
            CompareOp::Ge => CompareOp::Lt,
            CompareOp::Gt => CompareOp::Le,
            CompareOp::Le => CompareOp::Gt,
        }
    }
}

/// WHERE clause predicate tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    Comparison {
        op: CompareOp,
        column: Column,
        value: Literal,
    },
    Not {
        condition: Box<Condition>,
    },
    And {
        conditions: Vec<Condition>,
    },
    Or {
        conditions: Vec<Condition>,
    },
    Like {
        column: Column,
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        escape: Option<char>,
        #[serde(default)]
        negated: bool,
    },
    In {
        column: Column,
        values: Vec<Literal>,
        #[serde(default)]
        negated: bool,
    },
    IsNull {
        column: Column,
        #[serde(default)]
        negated: bool,
    },
}

impl Condition {
    pub fn compare(op: CompareOp, column: Column, value: impl Into<Literal>) -> Self {
        Condition::Comparison {
            op,
            column,
            value: value.into(),
        }
    }

    pub fn eq(column: Column, value: impl Into<Literal>) -> Self {
        Self::compare(CompareOp::Eq, column, value)
    }

    pub fn like(column: Column, pattern: impl Into<String>) -> Self {
        Condition::Like {
            column,
            pattern: pattern.into(),
            escape: None,
            negated: false,
        }
    }

    pub fn like_escaped(column: Column, pattern: impl Into<String>, escape: char) -> Self {
        Condition::Like {
            column,
            pattern: pattern.into(),
            escape: Some(escape),
            negated: false,
        }
    }

    pub fn in_list<I, V>(column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Literal>,
    {
        Condition::In {
            column,
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    pub fn is_null(column: Column) -> Self {
        Condition::IsNull {
            column,
            negated: false,
        }
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And { conditions }
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or { conditions }
    }
}

/// Literal values appearing in predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}
