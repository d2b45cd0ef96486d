//! Defines the structures for building filter expressions over records.
//!
//! A source lookup is expressed as a small boolean AST, the same shape a
//! where-clause has in the data-access layer: the query text must be
//! contained in any of the source's match fields, and the record must pass
//! the source's fixed constraint (for instance `status == "published"`).
//! Stores evaluate the tree against each candidate [`Record`].

use crate::types::{scalar_text, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// An enum representing the nodes of a filter expression AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
  /// A comparison between a record attribute and a value.
  ///
  /// This is the leaf node of the expression tree, representing a condition
  /// like `status == "published"` or `title contains "bitcoin"`.
  Compare {
    /// The name of the attribute to compare, which can be nested (e.g., "author.name").
    field: String,
    /// The comparison operator to use.
    op: CompareOp,
    /// The value to compare against.
    value: FilterValue,
  },
  /// True only if all the sub-expressions are true. An empty `And` is true.
  And(Vec<FilterExpr>),
  /// True if at least one sub-expression is true. An empty `Or` is false.
  Or(Vec<FilterExpr>),
  /// Inverts the result of the sub-expression.
  Not(Box<FilterExpr>),
}

/// The set of comparison operators available for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
  /// Equal to (`==`)
  Eq,
  /// Not equal to (`!=`)
  Ne,
  /// Less than (`<`)
  Lt,
  /// Less than or equal to (`<=`)
  Le,
  /// Greater than (`>`)
  Gt,
  /// Greater than or equal to (`>=`)
  Ge,
  /// Substring match for strings, element match for arrays.
  Contains,
}

/// Represents the possible types of values used in filter expressions.
///
/// The `#[serde(untagged)]` attribute allows for flexible deserialization from
/// JSON, as it will try to match the value to one of the variants without
/// requiring a specific tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
  /// A string value.
  String(String),
  /// A floating-point number value.
  Number(f64),
  /// A boolean value.
  Bool(bool),
}

impl fmt::Display for FilterValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FilterValue::String(s) => f.write_str(s),
      FilterValue::Number(n) => write!(f, "{n}"),
      FilterValue::Bool(b) => write!(f, "{b}"),
    }
  }
}

impl From<&str> for FilterValue {
  fn from(value: &str) -> Self {
    FilterValue::String(value.to_string())
  }
}

impl From<String> for FilterValue {
  fn from(value: String) -> Self {
    FilterValue::String(value)
  }
}

impl From<f64> for FilterValue {
  fn from(value: f64) -> Self {
    FilterValue::Number(value)
  }
}

impl From<bool> for FilterValue {
  fn from(value: bool) -> Self {
    FilterValue::Bool(value)
  }
}

impl FilterExpr {
  /// Builds a single comparison node.
  pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<FilterValue>) -> Self {
    FilterExpr::Compare {
      field: field.into(),
      op,
      value: value.into(),
    }
  }

  /// `field == value`
  pub fn equals(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
    Self::compare(field, CompareOp::Eq, value)
  }

  /// `field` contains `text`.
  pub fn contains(field: impl Into<String>, text: impl Into<String>) -> Self {
    Self::compare(field, CompareOp::Contains, FilterValue::String(text.into()))
  }

  /// True when any of `fields` contains `text`.
  pub fn any_contains<I, S>(fields: I, text: &str) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    FilterExpr::Or(
      fields
        .into_iter()
        .map(|field| Self::contains(field, text))
        .collect(),
    )
  }

  /// Combines two expressions with AND, flattening nested `And` nodes.
  pub fn and(self, other: FilterExpr) -> Self {
    match self {
      FilterExpr::And(mut exprs) => {
        exprs.push(other);
        FilterExpr::And(exprs)
      }
      expr => FilterExpr::And(vec![expr, other]),
    }
  }

  /// Evaluates the expression against a record.
  ///
  /// String comparisons are case-insensitive. A comparison against a missing
  /// or null attribute is false.
  pub fn evaluate(&self, record: &Record) -> bool {
    match self {
      FilterExpr::Compare { field, op, value } => compare(record.attribute(field), *op, value),
      FilterExpr::And(exprs) => exprs.iter().all(|expr| expr.evaluate(record)),
      FilterExpr::Or(exprs) => exprs.iter().any(|expr| expr.evaluate(record)),
      FilterExpr::Not(expr) => !expr.evaluate(record),
    }
  }
}

fn compare(actual: Option<&Value>, op: CompareOp, expected: &FilterValue) -> bool {
  let Some(actual) = actual.filter(|v| !v.is_null()) else {
    return false;
  };

  if op == CompareOp::Contains {
    return contains(actual, expected);
  }

  let ordering = match (actual, expected) {
    (Value::Number(n), FilterValue::Number(x)) => n.as_f64().and_then(|n| n.partial_cmp(x)),
    (Value::Bool(b), FilterValue::Bool(x)) => Some(b.cmp(x)),
    (Value::String(s), FilterValue::String(x)) => Some(s.to_lowercase().cmp(&x.to_lowercase())),
    _ => None,
  };

  let Some(ordering) = ordering else {
    return false;
  };

  match op {
    CompareOp::Eq => ordering == Ordering::Equal,
    CompareOp::Ne => ordering != Ordering::Equal,
    CompareOp::Lt => ordering == Ordering::Less,
    CompareOp::Le => ordering != Ordering::Greater,
    CompareOp::Gt => ordering == Ordering::Greater,
    CompareOp::Ge => ordering != Ordering::Less,
    CompareOp::Contains => false,
  }
}

fn contains(actual: &Value, expected: &FilterValue) -> bool {
  let needle = expected.to_string().to_lowercase();

  match actual {
    Value::Array(items) => items
      .iter()
      .filter_map(scalar_text)
      .any(|item| item.to_lowercase() == needle),
    other => scalar_text(other).is_some_and(|text| text.to_lowercase().contains(&needle)),
  }
}
