//! Slug validation matching the backend's constraints.

/// Return `true` when `value` is a valid catalog slug: trimmed, non-empty,
/// lowercase ASCII letters, digits, and hyphens only.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
