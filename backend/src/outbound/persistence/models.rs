//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::locale::{Locale, TranslatedText};
use crate::domain::{NewApplication, NewTag};

use super::schema::{
    accessibilities, application_languages, application_platform_support, application_screenshots,
    applications, categories, languages, platforms,
};

/// Assemble a translated value from one column per configured locale.
pub(crate) fn translated_columns(
    fi: &Option<String>,
    en: &Option<String>,
    sv: &Option<String>,
    ru: &Option<String>,
) -> TranslatedText {
    TranslatedText::from_lookup(|locale| {
        match locale {
            Locale::Fi => fi,
            Locale::En => en,
            Locale::Sv => sv,
            Locale::Ru => ru,
        }
        .clone()
    })
}

/// Row struct for reading from the applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub slug: String,
    pub name_fi: Option<String>,
    pub name_en: Option<String>,
    pub name_sv: Option<String>,
    pub name_ru: Option<String>,
    pub short_description_fi: Option<String>,
    pub short_description_en: Option<String>,
    pub short_description_sv: Option<String>,
    pub short_description_ru: Option<String>,
    pub description_fi: Option<String>,
    pub description_en: Option<String>,
    pub description_sv: Option<String>,
    pub description_ru: Option<String>,
    pub vendor: Option<String>,
    pub image: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub rating: Option<f32>,
    pub publisher_url: Option<String>,
    pub support_url: Option<String>,
    pub contact_email: Option<String>,
    pub category_id: Option<Uuid>,
    pub accessibility_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    pub(crate) fn name(&self) -> TranslatedText {
        translated_columns(&self.name_fi, &self.name_en, &self.name_sv, &self.name_ru)
    }

    pub(crate) fn short_description(&self) -> TranslatedText {
        translated_columns(
            &self.short_description_fi,
            &self.short_description_en,
            &self.short_description_sv,
            &self.short_description_ru,
        )
    }

    pub(crate) fn description(&self) -> TranslatedText {
        translated_columns(
            &self.description_fi,
            &self.description_en,
            &self.description_sv,
            &self.description_ru,
        )
    }
}

/// Insertable struct for creating new application records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub id: Uuid,
    pub slug: &'a str,
    pub name_fi: Option<&'a str>,
    pub name_en: Option<&'a str>,
    pub name_sv: Option<&'a str>,
    pub name_ru: Option<&'a str>,
    pub short_description_fi: Option<&'a str>,
    pub short_description_en: Option<&'a str>,
    pub short_description_sv: Option<&'a str>,
    pub short_description_ru: Option<&'a str>,
    pub description_fi: Option<&'a str>,
    pub description_en: Option<&'a str>,
    pub description_sv: Option<&'a str>,
    pub description_ru: Option<&'a str>,
    pub vendor: Option<&'a str>,
    pub image: Option<&'a str>,
    pub publish_date: Option<NaiveDate>,
    pub rating: Option<f32>,
    pub publisher_url: Option<&'a str>,
    pub support_url: Option<&'a str>,
    pub contact_email: Option<&'a str>,
    pub category_id: Option<Uuid>,
    pub accessibility_id: Option<Uuid>,
}

impl<'a> NewApplicationRow<'a> {
    /// Flatten a validated write payload into per-locale columns.
    pub(crate) fn from_payload(id: Uuid, payload: &'a NewApplication) -> Self {
        Self {
            id,
            slug: payload.slug(),
            name_fi: payload.name().get(Locale::Fi),
            name_en: payload.name().get(Locale::En),
            name_sv: payload.name().get(Locale::Sv),
            name_ru: payload.name().get(Locale::Ru),
            short_description_fi: payload.short_description().get(Locale::Fi),
            short_description_en: payload.short_description().get(Locale::En),
            short_description_sv: payload.short_description().get(Locale::Sv),
            short_description_ru: payload.short_description().get(Locale::Ru),
            description_fi: payload.description().get(Locale::Fi),
            description_en: payload.description().get(Locale::En),
            description_sv: payload.description().get(Locale::Sv),
            description_ru: payload.description().get(Locale::Ru),
            vendor: payload.vendor(),
            image: payload.image(),
            publish_date: payload.publish_date(),
            rating: payload.rating(),
            publisher_url: payload.publisher_url(),
            support_url: payload.support_url(),
            contact_email: payload.contact_email(),
            category_id: payload.category_id(),
            accessibility_id: payload.accessibility_id(),
        }
    }
}

/// Changeset replacing every writable application column.
///
/// `treat_none_as_null` gives full-update semantics: absent payload values
/// clear the stored column instead of leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = applications)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ApplicationChangeset<'a> {
    pub slug: &'a str,
    pub name_fi: Option<&'a str>,
    pub name_en: Option<&'a str>,
    pub name_sv: Option<&'a str>,
    pub name_ru: Option<&'a str>,
    pub short_description_fi: Option<&'a str>,
    pub short_description_en: Option<&'a str>,
    pub short_description_sv: Option<&'a str>,
    pub short_description_ru: Option<&'a str>,
    pub description_fi: Option<&'a str>,
    pub description_en: Option<&'a str>,
    pub description_sv: Option<&'a str>,
    pub description_ru: Option<&'a str>,
    pub vendor: Option<&'a str>,
    pub image: Option<&'a str>,
    pub publish_date: Option<NaiveDate>,
    pub rating: Option<f32>,
    pub publisher_url: Option<&'a str>,
    pub support_url: Option<&'a str>,
    pub contact_email: Option<&'a str>,
    pub category_id: Option<Uuid>,
    pub accessibility_id: Option<Uuid>,
}

impl<'a> ApplicationChangeset<'a> {
    pub(crate) fn from_payload(payload: &'a NewApplication) -> Self {
        Self {
            slug: payload.slug(),
            name_fi: payload.name().get(Locale::Fi),
            name_en: payload.name().get(Locale::En),
            name_sv: payload.name().get(Locale::Sv),
            name_ru: payload.name().get(Locale::Ru),
            short_description_fi: payload.short_description().get(Locale::Fi),
            short_description_en: payload.short_description().get(Locale::En),
            short_description_sv: payload.short_description().get(Locale::Sv),
            short_description_ru: payload.short_description().get(Locale::Ru),
            description_fi: payload.description().get(Locale::Fi),
            description_en: payload.description().get(Locale::En),
            description_sv: payload.description().get(Locale::Sv),
            description_ru: payload.description().get(Locale::Ru),
            vendor: payload.vendor(),
            image: payload.image(),
            publish_date: payload.publish_date(),
            rating: payload.rating(),
            publisher_url: payload.publisher_url(),
            support_url: payload.support_url(),
            contact_email: payload.contact_email(),
            category_id: payload.category_id(),
            accessibility_id: payload.accessibility_id(),
        }
    }
}

/// Table-independent view of one tag row.
///
/// The three tag tables share a shape; repository code converts each
/// table-specific row into this struct before mapping to the domain.
#[derive(Debug, Clone)]
pub(crate) struct TagColumns {
    pub id: Uuid,
    pub slug: String,
    pub name: TranslatedText,
}

/// Declare the row, insert, and changeset structs for one tag table.
macro_rules! tag_rows {
    ($table:ident, $row:ident, $new_row:ident, $changeset:ident) => {
        /// Row struct for reading from one tag table.
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub(crate) struct $row {
            pub id: Uuid,
            pub slug: String,
            pub name_fi: Option<String>,
            pub name_en: Option<String>,
            pub name_sv: Option<String>,
            pub name_ru: Option<String>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        impl From<$row> for TagColumns {
            fn from(row: $row) -> Self {
                let name =
                    translated_columns(&row.name_fi, &row.name_en, &row.name_sv, &row.name_ru);
                Self {
                    id: row.id,
                    slug: row.slug,
                    name,
                }
            }
        }

        /// Insertable struct for creating new tag records.
        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $new_row<'a> {
            pub id: Uuid,
            pub slug: &'a str,
            pub name_fi: Option<&'a str>,
            pub name_en: Option<&'a str>,
            pub name_sv: Option<&'a str>,
            pub name_ru: Option<&'a str>,
        }

        impl<'a> $new_row<'a> {
            pub(crate) fn from_payload(id: Uuid, payload: &'a NewTag) -> Self {
                Self {
                    id,
                    slug: payload.slug(),
                    name_fi: payload.name().get(Locale::Fi),
                    name_en: payload.name().get(Locale::En),
                    name_sv: payload.name().get(Locale::Sv),
                    name_ru: payload.name().get(Locale::Ru),
                }
            }
        }

        /// Changeset replacing every writable tag column.
        #[derive(Debug, Clone, AsChangeset)]
        #[diesel(table_name = $table)]
        #[diesel(treat_none_as_null = true)]
        pub(crate) struct $changeset<'a> {
            pub slug: &'a str,
            pub name_fi: Option<&'a str>,
            pub name_en: Option<&'a str>,
            pub name_sv: Option<&'a str>,
            pub name_ru: Option<&'a str>,
        }

        impl<'a> $changeset<'a> {
            pub(crate) fn from_payload(payload: &'a NewTag) -> Self {
                Self {
                    slug: payload.slug(),
                    name_fi: payload.name().get(Locale::Fi),
                    name_en: payload.name().get(Locale::En),
                    name_sv: payload.name().get(Locale::Sv),
                    name_ru: payload.name().get(Locale::Ru),
                }
            }
        }
    };
}

tag_rows!(categories, CategoryRow, NewCategoryRow, CategoryChangeset);
tag_rows!(platforms, PlatformRow, NewPlatformRow, PlatformChangeset);
tag_rows!(
    accessibilities,
    AccessibilityRow,
    NewAccessibilityRow,
    AccessibilityChangeset
);

/// Insertable struct for creating new language records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = languages)]
pub(crate) struct NewLanguageRow<'a> {
    pub id: Uuid,
    pub language: &'a str,
}

/// Insertable struct linking an application to a language.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = application_languages)]
pub(crate) struct NewApplicationLanguageRow {
    pub application_id: Uuid,
    pub language_id: Uuid,
}

/// Row struct for reading from the platform support table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application_platform_support)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SupportRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub platform_id: Uuid,
    pub store_url: Option<String>,
    pub rating: Option<f32>,
    pub nr_reviews: Option<i32>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Insertable struct for creating platform support records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = application_platform_support)]
pub(crate) struct NewSupportRow<'a> {
    pub id: Uuid,
    pub application_id: Uuid,
    pub platform_id: Uuid,
    pub store_url: Option<&'a str>,
    pub rating: Option<f32>,
    pub nr_reviews: Option<i32>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Row struct for reading from the screenshots table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application_screenshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScreenshotRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub platform_id: Uuid,
    pub image: String,
}

/// Insertable struct for creating screenshot records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = application_screenshots)]
pub(crate) struct NewScreenshotRow<'a> {
    pub id: Uuid,
    pub application_id: Uuid,
    pub platform_id: Uuid,
    pub image: &'a str,
}

#[cfg(test)]
mod tests {
    //! Row-to-domain column mapping coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn translated_columns_preserve_locale_assignment() {
        let text = translated_columns(
            &Some("Lukija".to_owned()),
            &Some("Reader".to_owned()),
            &None,
            &None,
        );
        assert_eq!(text.get(Locale::Fi), Some("Lukija"));
        assert_eq!(text.get(Locale::En), Some("Reader"));
        assert_eq!(text.get(Locale::Sv), None);
        assert_eq!(text.get(Locale::Ru), None);
    }

    #[rstest]
    fn tag_row_flattens_into_columns() {
        let row = CategoryRow {
            id: Uuid::new_v4(),
            slug: "games".to_owned(),
            name_fi: Some("Pelit".to_owned()),
            name_en: Some("Games".to_owned()),
            name_sv: None,
            name_ru: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let columns = TagColumns::from(row);
        assert_eq!(columns.slug, "games");
        assert_eq!(columns.name.get(Locale::Fi), Some("Pelit"));
    }
}
