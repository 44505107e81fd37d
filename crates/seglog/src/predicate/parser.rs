//! Predicate string tokenizer.
//!
//! Clauses have the shape `<identifier> <operator> <number>`:
//!
//! - identifier: one or more ASCII word characters (`[A-Za-z0-9_]`)
//! - operator: one or two characters from `!=><`, which must spell one of
//!   `<`, `<=`, `>`, `>=`, `==`, `!=`
//! - number: optional `-`, digits, and an optional fraction; at least one
//!   digit overall (`5`, `-5`, `1.5`, `.5`, `-.5`)
//!
//! Whitespace is allowed around the operator. The input is scanned left to
//! right: text that does not start a clause is skipped, and after a clause
//! the scan resumes where it ended. Skipped text, including `&&` and `||`,
//! carries no meaning.

use super::{Condition, ConditionSet, Operator, PredicateError};
use tracing::{debug, trace};

/// A clause matched at some position in the input.
struct Clause {
    condition: Condition,
    /// Whether the connective after the clause contained `|`.
    or_connective: bool,
    /// Byte offset just past the clause and its trailing separator.
    end: usize,
}

/// Parses `input` into conditions in left-to-right order.
///
/// Returns an empty set, not an error, when no clause is found.
///
/// # Errors
///
/// Returns [`PredicateError::UnknownOperator`] if a clause is well-formed
/// apart from its operator, e.g. `state = 1`.
///
/// # Examples
///
/// ```
/// use seglog::predicate::{parse_predicate, Operator};
///
/// let set = parse_predicate("state >= 1 && acc_x > 20").unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.conditions()[0].op, Operator::Ge);
/// assert_eq!(set.conditions()[1].threshold, 20.0);
/// ```
pub fn parse_predicate(input: &str) -> Result<ConditionSet, PredicateError> {
    let mut conditions = Vec::new();
    let mut or_connectives = 0;
    let mut pos = 0;

    while pos < input.len() {
        match match_clause(input, pos)? {
            Some(clause) => {
                trace!(condition = %clause.condition, offset = pos, "Parsed clause");
                if clause.or_connective {
                    or_connectives += 1;
                }
                conditions.push(clause.condition);
                pos = clause.end;
            }
            None => pos += 1,
        }
    }

    debug!(
        conditions = conditions.len(),
        or_connectives, "Parsed predicate"
    );
    Ok(ConditionSet::new(conditions).with_or_connectives(or_connectives))
}

/// Tries to match one clause starting exactly at byte offset `start`.
fn match_clause(input: &str, start: usize) -> Result<Option<Clause>, PredicateError> {
    let bytes = input.as_bytes();

    let field_end = scan_while(bytes, start, usize::MAX, is_word);
    if field_end == start {
        return Ok(None);
    }

    let op_start = skip_space(bytes, field_end);
    let op_end = scan_while(bytes, op_start, 2, is_operator_char);
    if op_end == op_start {
        return Ok(None);
    }

    let number_start = skip_space(bytes, op_end);
    let Some(number_end) = scan_number(bytes, number_start) else {
        return Ok(None);
    };

    let operator_text = &input[op_start..op_end];
    let op: Operator = operator_text
        .parse()
        .map_err(|_| PredicateError::UnknownOperator {
            operator: operator_text.to_string(),
            position: op_start,
        })?;

    let literal = &input[number_start..number_end];
    let Ok(threshold) = literal.parse::<f64>() else {
        return Ok(None);
    };

    let connective_start = skip_space(bytes, number_end);
    let connective_end = scan_while(bytes, connective_start, 2, is_connective_char);
    let or_connective = bytes[connective_start..connective_end].contains(&b'|');
    let end = skip_space(bytes, connective_end);

    Ok(Some(Clause {
        condition: Condition {
            field: input[start..field_end].to_string(),
            op,
            threshold,
            literal: literal.to_string(),
        },
        or_connective,
        end,
    }))
}

/// Scans a signed decimal starting at `start`, returning its end offset.
///
/// A trailing `.` without digits is not part of the number.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    let int_start = pos;
    let int_end = scan_while(bytes, int_start, usize::MAX, |b| b.is_ascii_digit());

    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = scan_while(bytes, int_end + 1, usize::MAX, |b| b.is_ascii_digit());
        if frac_end > int_end + 1 {
            return Some(frac_end);
        }
    }

    (int_end > int_start).then_some(int_end)
}

/// Advances from `start` while `pred` holds, consuming at most `limit` bytes.
fn scan_while(bytes: &[u8], start: usize, limit: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut pos = start;
    while pos < bytes.len() && pos - start < limit && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn skip_space(bytes: &[u8], start: usize) -> usize {
    scan_while(bytes, start, usize::MAX, is_space)
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_operator_char(b: u8) -> bool {
    matches!(b, b'!' | b'=' | b'>' | b'<')
}

fn is_connective_char(b: u8) -> bool {
    matches!(b, b'&' | b'|')
}
