//! Shared slug validation predicates for domain entities.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Language codes reuse the same alphabet.

/// Return `true` when `value` is a valid domain slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    //! Slug predicate coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("e-kirjasto")]
    #[case("windows-10")]
    #[case("fi")]
    fn accepts_lowercase_hyphenated(#[case] value: &str) {
        assert!(is_valid_slug(value));
    }

    #[rstest]
    #[case("")]
    #[case(" padded ")]
    #[case("Upper")]
    #[case("under_score")]
    #[case("dotted.slug")]
    fn rejects_invalid_shapes(#[case] value: &str) {
        assert!(!is_valid_slug(value));
    }
}
