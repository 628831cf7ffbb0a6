//! Seeding adapter inserting an example catalog into an empty database.
//!
//! Seeding is idempotent at the catalog level: when any application already
//! exists the whole run is skipped, so repeated startups never duplicate
//! data.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use example_data::{ApplicationSeed, ExampleCatalog, LocalizedSeed, TagSeed};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::CatalogRepositoryError;

use super::diesel_application_repository::link_languages;
use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{
    NewAccessibilityRow, NewApplicationRow, NewCategoryRow, NewPlatformRow, NewScreenshotRow,
    NewSupportRow,
};
use super::pool::DbPool;
use super::schema::{
    accessibilities, application_platform_support, application_screenshots, applications,
    categories, platforms,
};

/// Result of one seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was inserted.
    Seeded {
        /// Number of applications inserted.
        applications: usize,
    },
    /// The database already held applications; nothing was changed.
    SkippedNonEmpty,
}

/// Diesel-backed seeding adapter.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

/// One application seed with its publish date already parsed.
struct PreparedApplication<'a> {
    seed: &'a ApplicationSeed,
    publish_date: Option<NaiveDate>,
}

fn prepare_applications(
    catalog: &ExampleCatalog,
) -> Result<Vec<PreparedApplication<'_>>, CatalogRepositoryError> {
    catalog
        .applications
        .iter()
        .map(|seed| {
            let publish_date = seed
                .publish_date
                .as_deref()
                .map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
                .transpose()
                .map_err(|err| {
                    CatalogRepositoryError::query(format!(
                        "seed application '{}' has malformed publish date: {err}",
                        seed.slug
                    ))
                })?;
            Ok(PreparedApplication { seed, publish_date })
        })
        .collect()
}

fn localized(variant: &LocalizedSeed) -> [Option<&str>; 4] {
    [
        variant.fi.as_deref(),
        variant.en.as_deref(),
        variant.sv.as_deref(),
        variant.ru.as_deref(),
    ]
}

impl DieselSeedRepository {
    /// Create a new seeding adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert `catalog` unless the database already holds applications.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError`] for connection failures, malformed
    /// seed dates, or failed inserts. The run is transactional: either the
    /// whole catalog lands or nothing does.
    pub async fn seed(
        &self,
        catalog: &ExampleCatalog,
    ) -> Result<SeedOutcome, CatalogRepositoryError> {
        let prepared = prepare_applications(catalog)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let existing: i64 = applications::table.count().get_result(conn).await?;
                if existing > 0 {
                    return Ok(SeedOutcome::SkippedNonEmpty);
                }

                let category_ids = insert_category_tags(conn, &catalog.categories).await?;
                let platform_ids = insert_platform_tags(conn, &catalog.platforms).await?;
                let accessibility_ids =
                    insert_accessibility_tags(conn, &catalog.accessibilities).await?;

                for application in &prepared {
                    insert_application(
                        conn,
                        application,
                        &category_ids,
                        &platform_ids,
                        &accessibility_ids,
                    )
                    .await?;
                }

                Ok(SeedOutcome::Seeded {
                    applications: prepared.len(),
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

/// Generate an insert helper for one tag table.
macro_rules! insert_tags_fn {
    ($name:ident, $table:ident, $new_row:ident) => {
        async fn $name(
            conn: &mut AsyncPgConnection,
            tags: &[TagSeed],
        ) -> Result<HashMap<String, Uuid>, diesel::result::Error> {
            let mut ids = HashMap::new();
            for tag in tags {
                let id = Uuid::new_v4();
                let [name_fi, name_en, name_sv, name_ru] = localized(&tag.name);
                diesel::insert_into($table::table)
                    .values($new_row {
                        id,
                        slug: &tag.slug,
                        name_fi,
                        name_en,
                        name_sv,
                        name_ru,
                    })
                    .execute(conn)
                    .await?;
                ids.insert(tag.slug.clone(), id);
            }
            Ok(ids)
        }
    };
}

insert_tags_fn!(insert_category_tags, categories, NewCategoryRow);
insert_tags_fn!(insert_platform_tags, platforms, NewPlatformRow);
insert_tags_fn!(insert_accessibility_tags, accessibilities, NewAccessibilityRow);

async fn insert_application(
    conn: &mut AsyncPgConnection,
    prepared: &PreparedApplication<'_>,
    category_ids: &HashMap<String, Uuid>,
    platform_ids: &HashMap<String, Uuid>,
    accessibility_ids: &HashMap<String, Uuid>,
) -> Result<(), diesel::result::Error> {
    let seed = prepared.seed;
    let id = Uuid::new_v4();

    let [name_fi, name_en, name_sv, name_ru] = localized(&seed.name);
    let [short_description_fi, short_description_en, short_description_sv, short_description_ru] =
        localized(&seed.short_description);
    let [description_fi, description_en, description_sv, description_ru] =
        localized(&seed.description);

    diesel::insert_into(applications::table)
        .values(NewApplicationRow {
            id,
            slug: &seed.slug,
            name_fi,
            name_en,
            name_sv,
            name_ru,
            short_description_fi,
            short_description_en,
            short_description_sv,
            short_description_ru,
            description_fi,
            description_en,
            description_sv,
            description_ru,
            vendor: seed.vendor.as_deref(),
            image: seed.image.as_deref(),
            publish_date: prepared.publish_date,
            rating: seed.rating,
            publisher_url: seed.publisher_url.as_deref(),
            support_url: seed.support_url.as_deref(),
            contact_email: seed.contact_email.as_deref(),
            category_id: seed
                .category
                .as_ref()
                .and_then(|slug| category_ids.get(slug))
                .copied(),
            accessibility_id: seed
                .accessibility
                .as_ref()
                .and_then(|slug| accessibility_ids.get(slug))
                .copied(),
        })
        .execute(conn)
        .await?;

    link_languages(conn, id, &seed.languages).await?;

    for support in &seed.platforms {
        let Some(&platform_id) = platform_ids.get(&support.platform) else {
            warn!(platform = %support.platform, application = %seed.slug,
                "seed references unseeded platform, skipping support row");
            continue;
        };
        diesel::insert_into(application_platform_support::table)
            .values(NewSupportRow {
                id: Uuid::new_v4(),
                application_id: id,
                platform_id,
                store_url: support.store_url.as_deref(),
                rating: support.rating,
                nr_reviews: support.nr_reviews,
                last_updated: None,
            })
            .execute(conn)
            .await?;
    }

    for screenshot in &seed.screenshots {
        let Some(&platform_id) = platform_ids.get(&screenshot.platform) else {
            warn!(platform = %screenshot.platform, application = %seed.slug,
                "seed references unseeded platform, skipping screenshot");
            continue;
        };
        diesel::insert_into(application_screenshots::table)
            .values(NewScreenshotRow {
                id: Uuid::new_v4(),
                application_id: id,
                platform_id,
                image: &screenshot.image,
            })
            .execute(conn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Seed preparation coverage; the insert path is exercised against a
    //! live database by deployment smoke tests.

    use super::*;
    use example_data::{SeedDefinition, generate_example_catalog};

    fn catalog() -> ExampleCatalog {
        generate_example_catalog(&SeedDefinition {
            name: "test".to_owned(),
            seed: 5,
            application_count: 4,
        })
    }

    #[test]
    fn generated_catalogs_prepare_cleanly() {
        let catalog = catalog();
        let prepared = prepare_applications(&catalog).expect("valid dates");
        assert_eq!(prepared.len(), 4);
        assert!(prepared.iter().all(|app| app.publish_date.is_some()));
    }

    #[test]
    fn malformed_dates_are_rejected_by_name() {
        let mut catalog = catalog();
        if let Some(first) = catalog.applications.first_mut() {
            first.publish_date = Some("not-a-date".to_owned());
        }
        let err = prepare_applications(&catalog).expect_err("date rejected");
        assert!(err.to_string().contains("publish date"));
    }
}
