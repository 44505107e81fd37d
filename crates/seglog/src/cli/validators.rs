//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate output file prefix.
///
/// Delegates to the domain validator in `commands::split` to maintain
/// a single source of truth for validation rules.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    use crate::commands::split;

    let trimmed = s.trim();
    split::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("flight", "flight")]
    #[case("  sortie ", "sortie")]
    fn prefix_is_trimmed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_prefix(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::separator("logs/flight")]
    fn bad_prefix_is_rejected(#[case] input: &str) {
        let err = validate_prefix(input).unwrap_err();
        assert!(err.starts_with("Invalid output prefix"), "got: {err}");
    }
}
