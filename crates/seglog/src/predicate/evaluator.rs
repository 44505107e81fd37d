//! Row evaluation against a compiled predicate.

use super::{Condition, ConditionSet};
use crate::error::{Error, Result};
use seglog_tsv::{Header, Row};
use tracing::debug;

/// A condition bound to the header column it reads.
#[derive(Debug, Clone)]
struct ResolvedCondition {
    condition: Condition,
    index: usize,
}

/// A [`ConditionSet`] with every field resolved to a column index.
///
/// Field lookup happens once in [`compile`](Self::compile); testing a row is
/// then a direct index per condition.
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    conditions: Vec<ResolvedCondition>,
}

impl CompiledPredicate {
    /// Resolves every condition in `set` against `header`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] for the first condition whose field
    /// is not in the header.
    pub fn compile(header: &Header, set: &ConditionSet) -> Result<Self> {
        let conditions = set
            .conditions()
            .iter()
            .map(|condition| -> Result<ResolvedCondition> {
                let index =
                    header
                        .index_of(&condition.field)
                        .ok_or_else(|| Error::FieldNotFound {
                            field: condition.field.clone(),
                            available: header.names().to_vec(),
                        })?;
                debug!(field = %condition.field, index, "Resolved condition field");
                Ok(ResolvedCondition {
                    condition: condition.clone(),
                    index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { conditions })
    }

    /// Tests `row`, which was read from source line `line`.
    ///
    /// All conditions must hold. Every condition is coerced and compared even
    /// after one has failed, so a non-numeric cell is always reported.
    /// A predicate with no conditions matches every row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCell`] if the row is too short for a resolved
    /// column, or [`Error::NotNumeric`] if a compared cell does not parse as
    /// a number.
    pub fn matches(&self, row: &Row, line: u64) -> Result<bool> {
        let mut all = true;
        for resolved in &self.conditions {
            let value = coerce(row, resolved, line)?;
            all &= resolved
                .condition
                .op
                .apply(value, resolved.condition.threshold);
        }
        Ok(all)
    }

    /// Returns each condition's field and resolved column index.
    pub fn columns(&self) -> impl Iterator<Item = (&str, usize)> {
        self.conditions
            .iter()
            .map(|r| (r.condition.field.as_str(), r.index))
    }

    /// Returns the number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if the predicate has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

fn coerce(row: &Row, resolved: &ResolvedCondition, line: u64) -> Result<f64> {
    let field = &resolved.condition.field;
    let cell = row.get(resolved.index).ok_or_else(|| Error::MissingCell {
        line,
        field: field.clone(),
    })?;

    cell.trim().parse::<f64>().map_err(|_| Error::NotNumeric {
        line,
        field: field.clone(),
        value: cell.to_string(),
    })
}
