//! Row predicates: conditions, parsing and evaluation.
//!
//! A predicate string such as `state >= 1 && acc_x > 20` is parsed into a
//! [`ConditionSet`] by [`parse_predicate`], then compiled against a header
//! into a [`CompiledPredicate`] that tests individual rows.
//!
//! # Connectives
//!
//! Conditions are **always combined with logical AND**. Text between clauses,
//! including `&&` and `||`, only separates them. A predicate written as
//! `gps_status == 2 || healthy != 0` therefore matches rows where both
//! comparisons hold. [`ConditionSet::or_connectives`] counts the `|`
//! connectives seen so callers can warn about this.

pub mod evaluator;
pub mod parser;

pub use evaluator::CompiledPredicate;
pub use parser::parse_predicate;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a predicate string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    /// A clause used an operator outside the supported six.
    #[error(
        "unknown operator '{operator}' at position {position} (expected one of <, <=, >, >=, ==, !=)"
    )]
    UnknownOperator {
        /// The operator text as written.
        operator: String,
        /// 0-based byte offset of the operator in the predicate.
        position: usize,
    },
}

/// A numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// Compares `lhs` against `rhs`.
    ///
    /// Follows IEEE-754: any comparison with NaN is false except `!=`.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            #[allow(clippy::float_cmp)]
            Self::Eq => lhs == rhs,
            #[allow(clippy::float_cmp)]
            Self::Ne => lhs != rhs,
        }
    }

    /// Returns the operator's source text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            other => Err(format!("unknown operator '{other}'")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic comparison: `field op threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Header field the condition reads.
    pub field: String,
    /// Comparison applied between the cell and the threshold.
    pub op: Operator,
    /// Numeric threshold.
    pub threshold: f64,
    /// Threshold exactly as written in the predicate.
    pub literal: String,
}

impl Condition {
    /// Creates a condition, deriving the literal from `threshold`.
    #[must_use]
    pub fn new(field: impl Into<String>, op: Operator, threshold: f64) -> Self {
        Self {
            field: field.into(),
            op,
            threshold,
            literal: threshold.to_string(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.literal)
    }
}

/// Ordered conditions, combined with AND.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
    or_connectives: usize,
}

impl ConditionSet {
    /// Creates a set from conditions in evaluation order.
    #[must_use]
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            or_connectives: 0,
        }
    }

    pub(crate) fn with_or_connectives(mut self, count: usize) -> Self {
        self.or_connectives = count;
        self
    }

    /// Returns the conditions in left-to-right source order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of `|`-style connectives that were read as AND.
    #[must_use]
    pub fn or_connectives(&self) -> usize {
        self.or_connectives
    }

    /// Returns the number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if nothing parsed; such a set matches every row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}
