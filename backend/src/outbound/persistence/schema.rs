//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.
//!
//! Localized text columns follow the `<field>_<locale>` naming convention
//! over the configured locales (`fi`, `en`, `sv`, `ru`).

diesel::table! {
    /// Catalog applications.
    applications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// URL-safe unique identifier.
        slug -> Varchar,
        name_fi -> Nullable<Varchar>,
        name_en -> Nullable<Varchar>,
        name_sv -> Nullable<Varchar>,
        name_ru -> Nullable<Varchar>,
        short_description_fi -> Nullable<Varchar>,
        short_description_en -> Nullable<Varchar>,
        short_description_sv -> Nullable<Varchar>,
        short_description_ru -> Nullable<Varchar>,
        description_fi -> Nullable<Text>,
        description_en -> Nullable<Text>,
        description_sv -> Nullable<Text>,
        description_ru -> Nullable<Text>,
        /// Publisher or vendor name.
        vendor -> Nullable<Varchar>,
        /// Icon image path relative to the media root.
        image -> Nullable<Varchar>,
        /// First publication date.
        publish_date -> Nullable<Date>,
        /// Aggregate editorial rating, 0.0 to 5.0.
        rating -> Nullable<Float4>,
        publisher_url -> Nullable<Varchar>,
        support_url -> Nullable<Varchar>,
        contact_email -> Nullable<Varchar>,
        /// Referenced category, when classified.
        category_id -> Nullable<Uuid>,
        /// Referenced accessibility, when classified.
        accessibility_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Category tag entities.
    categories (id) {
        id -> Uuid,
        /// Unique per tag type.
        slug -> Varchar,
        name_fi -> Nullable<Varchar>,
        name_en -> Nullable<Varchar>,
        name_sv -> Nullable<Varchar>,
        name_ru -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Platform tag entities.
    platforms (id) {
        id -> Uuid,
        slug -> Varchar,
        name_fi -> Nullable<Varchar>,
        name_en -> Nullable<Varchar>,
        name_sv -> Nullable<Varchar>,
        name_ru -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accessibility tag entities.
    accessibilities (id) {
        id -> Uuid,
        slug -> Varchar,
        name_fi -> Nullable<Varchar>,
        name_en -> Nullable<Varchar>,
        name_sv -> Nullable<Varchar>,
        name_ru -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Languages applications are available in.
    languages (id) {
        id -> Uuid,
        /// Unique language code, e.g. `fi`.
        language -> Varchar,
    }
}

diesel::table! {
    /// Join table between applications and languages.
    application_languages (application_id, language_id) {
        application_id -> Uuid,
        language_id -> Uuid,
    }
}

diesel::table! {
    /// Platform-specific store metadata per application.
    application_platform_support (id) {
        id -> Uuid,
        application_id -> Uuid,
        platform_id -> Uuid,
        store_url -> Nullable<Varchar>,
        rating -> Nullable<Float4>,
        nr_reviews -> Nullable<Int4>,
        last_updated -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Application screenshots, one platform each.
    application_screenshots (id) {
        id -> Uuid,
        application_id -> Uuid,
        platform_id -> Uuid,
        /// Image path relative to the media root.
        image -> Varchar,
    }
}

diesel::joinable!(applications -> categories (category_id));
diesel::joinable!(applications -> accessibilities (accessibility_id));
diesel::joinable!(application_languages -> applications (application_id));
diesel::joinable!(application_languages -> languages (language_id));
diesel::joinable!(application_platform_support -> applications (application_id));
diesel::joinable!(application_platform_support -> platforms (platform_id));
diesel::joinable!(application_screenshots -> applications (application_id));
diesel::joinable!(application_screenshots -> platforms (platform_id));

diesel::allow_tables_to_appear_in_same_query!(
    applications,
    categories,
    platforms,
    accessibilities,
    languages,
    application_languages,
    application_platform_support,
    application_screenshots,
);
