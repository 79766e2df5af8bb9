//! Centralized validation and helper functions.

/// Maximum number of rows accepted from a single data table (DOS protection)
pub const MAX_ROWS: usize = 1_000_000;

/// Split a comma-separated symptom list into trimmed, non-empty tokens.
///
/// # Examples
///
/// ```
/// use symptom_solver::utils::validation::parse_symptom_list;
///
/// assert_eq!(parse_symptom_list(" fever, cough ,,"), vec!["fever", "cough"]);
/// assert!(parse_symptom_list("  ").is_empty());
/// ```
#[must_use]
pub fn parse_symptom_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret a yes/no answer. Only "yes" and "y" (any case) are affirmative.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symptom_list_discards_stray_commas() {
        assert_eq!(
            parse_symptom_list("fever,,cough, ,headache,"),
            vec!["fever", "cough", "headache"]
        );
    }

    #[test]
    fn test_parse_symptom_list_keeps_duplicates_and_order() {
        assert_eq!(
            parse_symptom_list("cough,fever,cough"),
            vec!["cough", "fever", "cough"]
        );
    }

    #[test]
    fn test_parse_symptom_list_keeps_inner_spaces() {
        assert_eq!(parse_symptom_list("sore throat"), vec!["sore throat"]);
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" YES \n"));
        assert!(is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yeah"));
    }

    #[test]
    fn test_check_row_limit() {
        assert!(check_row_limit(0).is_none());
        assert!(check_row_limit(MAX_ROWS - 1).is_none());
        assert!(check_row_limit(MAX_ROWS).is_some());
    }
}
