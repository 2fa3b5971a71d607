//! Input normalization helpers
//!
//! Pure, total functions that clean raw wire input before validation.
//! Nothing here touches storage or produces errors; a field that
//! normalizes to empty is treated as absent so required-field checks
//! reduce to a single `is_none` test.

/// Normalizes a free-text field: trims and collapses internal whitespace
/// runs to a single space. `None` and empty-after-trim both map to `None`.
pub fn normalize_text(input: Option<&str>) -> Option<String> {
    let value = input?;
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Normalizes a numeric field: strips every non-digit character.
/// `None` and empty-after-strip both map to `None`.
pub fn normalize_digits(input: Option<&str>) -> Option<String> {
    let value = input?;
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
