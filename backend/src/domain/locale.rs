//! Locale codes and translated text values.
//!
//! The catalog carries user-facing copy in a fixed set of locales. A
//! translated value maps every configured locale to an optional string, so a
//! missing translation renders as `null` in responses rather than failing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Locale code selecting a translated variant of a text field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Finnish.
    Fi,
    /// English.
    En,
    /// Swedish.
    Sv,
    /// Russian.
    Ru,
}

impl Locale {
    /// Every configured locale, in rendering order.
    pub const ALL: [Self; 4] = [Self::Fi, Self::En, Self::Sv, Self::Ru];

    /// Short locale code (`fi`, `en`, `sv`, `ru`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Fi => "fi",
            Self::En => "en",
            Self::Sv => "sv",
            Self::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Translated text value keyed by locale code.
///
/// Always holds one entry per configured locale; untranslated locales carry
/// `None` and serialize as `null`. Deserialization accepts partial maps and
/// fills the remaining locales with `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "BTreeMap<Locale, Option<String>>")]
pub struct TranslatedText(BTreeMap<Locale, Option<String>>);

impl TranslatedText {
    /// Value with no translation in any locale.
    #[must_use]
    pub fn new() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Build a value by looking up each configured locale in turn.
    ///
    /// This is the single place the configured locale list is walked when
    /// assembling translated fields from per-locale storage columns.
    pub fn from_lookup(mut lookup: impl FnMut(Locale) -> Option<String>) -> Self {
        Self(
            Locale::ALL
                .into_iter()
                .map(|locale| (locale, lookup(locale)))
                .collect(),
        )
    }

    /// Replace one locale's translation.
    #[must_use]
    pub fn with(mut self, locale: Locale, value: impl Into<String>) -> Self {
        self.0.insert(locale, Some(value.into()));
        self
    }

    /// Translation for `locale`, when present.
    #[must_use]
    pub fn get(&self, locale: Locale) -> Option<&str> {
        self.0.get(&locale).and_then(Option::as_deref)
    }

    /// `true` when no locale carries a translation.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// Iterate translations in configured-locale order.
    pub fn variants(&self) -> impl Iterator<Item = (Locale, Option<&str>)> {
        self.0
            .iter()
            .map(|(locale, value)| (*locale, value.as_deref()))
    }
}

impl From<BTreeMap<Locale, Option<String>>> for TranslatedText {
    fn from(mut partial: BTreeMap<Locale, Option<String>>) -> Self {
        Self::from_lookup(|locale| partial.remove(&locale).flatten())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for locale lookup and translated value normalisation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lookup_visits_every_configured_locale() {
        let text = TranslatedText::from_lookup(|locale| match locale {
            Locale::Fi => Some("Sovellus".to_owned()),
            Locale::En => Some("Application".to_owned()),
            Locale::Sv | Locale::Ru => None,
        });

        assert_eq!(text.get(Locale::Fi), Some("Sovellus"));
        assert_eq!(text.get(Locale::En), Some("Application"));
        assert_eq!(text.get(Locale::Sv), None);
        assert_eq!(text.variants().count(), Locale::ALL.len());
    }

    #[rstest]
    fn missing_translations_serialize_as_null() {
        let text = TranslatedText::new().with(Locale::En, "Reader");
        let json = serde_json::to_value(&text).expect("serializable value");

        assert_eq!(
            json,
            serde_json::json!({"fi": null, "en": "Reader", "sv": null, "ru": null})
        );
    }

    #[rstest]
    fn partial_maps_normalise_on_deserialize() {
        let text: TranslatedText =
            serde_json::from_str(r#"{"en": "Reader"}"#).expect("partial map accepted");

        assert_eq!(text.get(Locale::En), Some("Reader"));
        assert_eq!(text.variants().count(), Locale::ALL.len());
        assert_eq!(text.get(Locale::Ru), None);
    }

    #[rstest]
    fn unknown_locale_keys_are_rejected() {
        let result: Result<TranslatedText, _> = serde_json::from_str(r#"{"de": "Leser"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    fn blank_detection_ignores_locale_count() {
        assert!(TranslatedText::new().is_blank());
        assert!(!TranslatedText::new().with(Locale::Sv, "Läsare").is_blank());
    }
}
