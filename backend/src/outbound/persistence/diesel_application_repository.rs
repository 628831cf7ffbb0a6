//! PostgreSQL-backed application repository adapter.
//!
//! Maps the declarative application filter onto Diesel lookups: related-tag
//! slugs become subquery membership filters, rating bounds become range
//! comparisons, and the search term becomes a case-insensitive pattern over
//! the localized name and description columns plus the vendor.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::PageParams;
use uuid::Uuid;

use crate::domain::ports::{ApplicationPage, ApplicationRepository, CatalogRepositoryError};
use crate::domain::{
    Application, ApplicationDraft, ApplicationFilter, NewApplication, OrderField, Ordering,
    PlatformSupport, PlatformSupportDraft, Screenshot, ScreenshotDraft, TagRef,
};

use super::diesel_helpers::{collect_rows, like_pattern, map_diesel_error, map_pool_error};
use super::models::{
    ApplicationChangeset, ApplicationRow, NewApplicationLanguageRow, NewApplicationRow,
    NewLanguageRow, PlatformRow, ScreenshotRow, SupportRow, TagColumns,
};
use super::models::{AccessibilityRow, CategoryRow};
use super::pool::DbPool;
use super::schema::{
    accessibilities, application_languages, application_platform_support, application_screenshots,
    applications, categories, languages, platforms,
};

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type BoxedAppQuery = applications::BoxedQuery<'static, Pg>;

/// Translate the validated filter into query predicates.
fn filtered_query(filter: &ApplicationFilter) -> BoxedAppQuery {
    let mut query = applications::table.into_boxed();

    if let Some(slug) = filter.category() {
        let matching = categories::table
            .filter(categories::slug.eq(slug.to_owned()))
            .select(categories::id.nullable());
        query = query.filter(applications::category_id.eq_any(matching));
    }
    if let Some(slug) = filter.accessibility() {
        let matching = accessibilities::table
            .filter(accessibilities::slug.eq(slug.to_owned()))
            .select(accessibilities::id.nullable());
        query = query.filter(applications::accessibility_id.eq_any(matching));
    }
    if let Some(slug) = filter.platform() {
        let supported = application_platform_support::table
            .inner_join(platforms::table)
            .filter(platforms::slug.eq(slug.to_owned()))
            .select(application_platform_support::application_id);
        query = query.filter(applications::id.eq_any(supported));
    }
    if let Some(code) = filter.language() {
        let linked = application_languages::table
            .inner_join(languages::table)
            .filter(languages::language.eq(code.to_owned()))
            .select(application_languages::application_id);
        query = query.filter(applications::id.eq_any(linked));
    }
    if let Some(min) = filter.min_rating() {
        query = query.filter(applications::rating.ge(min));
    }
    if let Some(max) = filter.max_rating() {
        query = query.filter(applications::rating.le(max));
    }
    if let Some(term) = filter.search() {
        let pattern = like_pattern(term);
        query = query.filter(
            applications::name_fi
                .ilike(pattern.clone())
                .or(applications::name_en.ilike(pattern.clone()))
                .or(applications::name_sv.ilike(pattern.clone()))
                .or(applications::name_ru.ilike(pattern.clone()))
                .or(applications::description_fi.ilike(pattern.clone()))
                .or(applications::description_en.ilike(pattern.clone()))
                .or(applications::description_sv.ilike(pattern.clone()))
                .or(applications::description_ru.ilike(pattern.clone()))
                .or(applications::vendor.ilike(pattern)),
        );
    }

    query
}

/// Apply the requested ordering, with the identifier as tie-breaker so
/// windows stay stable across requests.
fn ordered(query: BoxedAppQuery, ordering: Ordering) -> BoxedAppQuery {
    match (ordering.field(), ordering.is_descending()) {
        (OrderField::PublishDate, false) => {
            query.order((applications::publish_date.asc(), applications::id.asc()))
        }
        (OrderField::PublishDate, true) => {
            query.order((applications::publish_date.desc(), applications::id.asc()))
        }
        (OrderField::Created, false) => {
            query.order((applications::created_at.asc(), applications::id.asc()))
        }
        (OrderField::Created, true) => {
            query.order((applications::created_at.desc(), applications::id.asc()))
        }
        (OrderField::Modified, false) => {
            query.order((applications::updated_at.asc(), applications::id.asc()))
        }
        (OrderField::Modified, true) => {
            query.order((applications::updated_at.desc(), applications::id.asc()))
        }
    }
}

/// Related rows fetched alongside one window of applications.
#[derive(Debug, Default)]
struct RelatedRows {
    /// Referenced category and accessibility rows, keyed by id.
    tags: HashMap<Uuid, TagColumns>,
    /// Platform support rows with their platform, keyed by application.
    support: HashMap<Uuid, Vec<(SupportRow, TagColumns)>>,
    /// Screenshot rows with their platform slug, keyed by application.
    screenshots: HashMap<Uuid, Vec<(ScreenshotRow, String)>>,
    /// Language codes, keyed by application.
    languages: HashMap<Uuid, Vec<String>>,
}

/// Bulk-load every related row for the given application window.
async fn load_related(
    conn: &mut AsyncPgConnection,
    rows: &[ApplicationRow],
) -> Result<RelatedRows, diesel::result::Error> {
    let mut related = RelatedRows::default();
    if rows.is_empty() {
        return Ok(related);
    }
    let app_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let category_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.category_id).collect();
    if !category_ids.is_empty() {
        let loaded: Vec<CategoryRow> = categories::table
            .filter(categories::id.eq_any(&category_ids))
            .select(CategoryRow::as_select())
            .load(conn)
            .await?;
        related
            .tags
            .extend(loaded.into_iter().map(|row| (row.id, TagColumns::from(row))));
    }

    let accessibility_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.accessibility_id).collect();
    if !accessibility_ids.is_empty() {
        let loaded: Vec<AccessibilityRow> = accessibilities::table
            .filter(accessibilities::id.eq_any(&accessibility_ids))
            .select(AccessibilityRow::as_select())
            .load(conn)
            .await?;
        related
            .tags
            .extend(loaded.into_iter().map(|row| (row.id, TagColumns::from(row))));
    }

    let support: Vec<(SupportRow, PlatformRow)> = application_platform_support::table
        .inner_join(platforms::table)
        .filter(application_platform_support::application_id.eq_any(&app_ids))
        .order_by(platforms::slug.asc())
        .select((SupportRow::as_select(), PlatformRow::as_select()))
        .load(conn)
        .await?;
    for (row, platform) in support {
        related
            .support
            .entry(row.application_id)
            .or_default()
            .push((row, TagColumns::from(platform)));
    }

    let screenshots: Vec<(ScreenshotRow, String)> = application_screenshots::table
        .inner_join(platforms::table)
        .filter(application_screenshots::application_id.eq_any(&app_ids))
        .order_by(application_screenshots::id.asc())
        .select((ScreenshotRow::as_select(), platforms::slug))
        .load(conn)
        .await?;
    for (row, platform_slug) in screenshots {
        related
            .screenshots
            .entry(row.application_id)
            .or_default()
            .push((row, platform_slug));
    }

    let language_links: Vec<(Uuid, String)> = application_languages::table
        .inner_join(languages::table)
        .filter(application_languages::application_id.eq_any(&app_ids))
        .order_by(languages::language.asc())
        .select((application_languages::application_id, languages::language))
        .load(conn)
        .await?;
    for (application_id, code) in language_links {
        related
            .languages
            .entry(application_id)
            .or_default()
            .push(code);
    }

    Ok(related)
}

/// Fetch one application row with its related rows.
async fn load_one(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<(ApplicationRow, RelatedRows)>, diesel::result::Error> {
    let row: Option<ApplicationRow> = applications::table
        .find(id)
        .select(ApplicationRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(row) = row else {
        return Ok(None);
    };
    let related = load_related(conn, std::slice::from_ref(&row)).await?;
    Ok(Some((row, related)))
}

/// Replace an application's language links, creating unseen languages.
pub(crate) async fn link_languages(
    conn: &mut AsyncPgConnection,
    application_id: Uuid,
    codes: &[String],
) -> Result<(), diesel::result::Error> {
    diesel::delete(
        application_languages::table
            .filter(application_languages::application_id.eq(application_id)),
    )
    .execute(conn)
    .await?;

    for code in codes {
        let existing: Option<Uuid> = languages::table
            .filter(languages::language.eq(code))
            .select(languages::id)
            .first(conn)
            .await
            .optional()?;
        let language_id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                diesel::insert_into(languages::table)
                    .values(NewLanguageRow { id, language: code })
                    .execute(conn)
                    .await?;
                id
            }
        };
        diesel::insert_into(application_languages::table)
            .values(NewApplicationLanguageRow {
                application_id,
                language_id,
            })
            .execute(conn)
            .await?;
    }
    Ok(())
}

fn tag_ref(columns: &TagColumns) -> TagRef {
    TagRef {
        id: columns.id,
        slug: columns.slug.clone(),
        name: columns.name.clone(),
    }
}

/// Convert one application row plus its related rows into the domain entity.
fn row_to_application(row: ApplicationRow, related: &RelatedRows) -> Result<Application, String> {
    let platforms = related
        .support
        .get(&row.id)
        .map(|entries| {
            entries
                .iter()
                .map(|(support, platform)| {
                    PlatformSupport::new(PlatformSupportDraft {
                        id: support.id,
                        platform: tag_ref(platform),
                        store_url: support.store_url.clone(),
                        rating: support.rating,
                        nr_reviews: support.nr_reviews,
                        last_updated: support.last_updated,
                    })
                    .map_err(|err| err.to_string())
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    let screenshots = related
        .screenshots
        .get(&row.id)
        .map(|entries| {
            entries
                .iter()
                .map(|(shot, platform_slug)| {
                    Screenshot::new(ScreenshotDraft {
                        image: shot.image.clone(),
                        platform: platform_slug.clone(),
                    })
                    .map_err(|err| err.to_string())
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    let draft = ApplicationDraft {
        id: row.id,
        slug: row.slug.clone(),
        name: row.name(),
        short_description: row.short_description(),
        description: row.description(),
        vendor: row.vendor.clone(),
        image: row.image.clone(),
        publish_date: row.publish_date,
        rating: row.rating,
        publisher_url: row.publisher_url.clone(),
        support_url: row.support_url.clone(),
        contact_email: row.contact_email.clone(),
        category: row
            .category_id
            .and_then(|id| related.tags.get(&id))
            .map(tag_ref),
        accessibility: row
            .accessibility_id
            .and_then(|id| related.tags.get(&id))
            .map(tag_ref),
        languages: related.languages.get(&row.id).cloned().unwrap_or_default(),
        platforms,
        screenshots,
        created: row.created_at,
        modified: row.updated_at,
    };
    Application::new(draft).map_err(|err| err.to_string())
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn list(
        &self,
        filter: &ApplicationFilter,
        window: PageParams,
    ) -> Result<ApplicationPage, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // One transaction so the count, the window, and the related rows all
        // observe the same MVCC snapshot.
        let (count, rows, related) = conn
            .transaction(|conn| {
                async move {
                    let count: i64 = filtered_query(filter).count().get_result(conn).await?;
                    let rows: Vec<ApplicationRow> = ordered(filtered_query(filter), filter.ordering())
                        .limit(window.limit())
                        .offset(window.offset())
                        .select(ApplicationRow::as_select())
                        .load(conn)
                        .await?;
                    let related = load_related(conn, &rows).await?;
                    Ok((count, rows, related))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = collect_rows(
            rows.into_iter().map(|row| row_to_application(row, &related)),
            CatalogRepositoryError::query,
        )?;
        Ok(ApplicationPage { count, items })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Application>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let loaded = conn
            .transaction(|conn| async move { load_one(conn, id).await }.scope_boxed())
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, related)| row_to_application(row, &related))
            .transpose()
            .map_err(CatalogRepositoryError::query)
    }

    async fn create(
        &self,
        application: &NewApplication,
    ) -> Result<Application, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4();

        let (row, related) = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(applications::table)
                        .values(NewApplicationRow::from_payload(id, application))
                        .execute(conn)
                        .await?;
                    link_languages(conn, id, application.languages()).await?;
                    load_one(conn, id)
                        .await?
                        .ok_or(diesel::result::Error::NotFound)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_application(row, &related).map_err(CatalogRepositoryError::query)
    }

    async fn update(
        &self,
        id: Uuid,
        application: &NewApplication,
    ) -> Result<Option<Application>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(applications::table.find(id))
                        .set((
                            ApplicationChangeset::from_payload(application),
                            applications::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Ok(None);
                    }
                    link_languages(conn, id, application.languages()).await?;
                    load_one(conn, id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, related)| row_to_application(row, &related))
            .transpose()
            .map_err(CatalogRepositoryError::query)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(applications::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
