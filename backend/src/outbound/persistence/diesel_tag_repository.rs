//! PostgreSQL-backed tag repository adapter.
//!
//! The three tag resources live in structurally identical tables, so the
//! per-table Diesel operations are generated once by a macro and the trait
//! implementation dispatches on [`TagKind`].

use std::collections::HashMap;

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection};
use pagination::PageParams;
use uuid::Uuid;

use crate::domain::ports::{CatalogRepositoryError, TagPage, TagRepository};
use crate::domain::{NewTag, Tag, TagDraft, TagKind};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::TagColumns;
use super::pool::DbPool;

/// Diesel-backed implementation of the tag repository port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Generate the Diesel operations for one tag table.
macro_rules! tag_table_ops {
    ($module:ident, $table:ident, $row:ident, $new_row:ident, $changeset:ident) => {
        mod $module {
            use chrono::Utc;
            use diesel::prelude::*;
            use diesel_async::{AsyncPgConnection, RunQueryDsl};
            use pagination::PageParams;
            use uuid::Uuid;

            use crate::domain::NewTag;
            use crate::outbound::persistence::models::{$changeset, $new_row, $row, TagColumns};
            use crate::outbound::persistence::schema::$table;

            pub(super) async fn page(
                conn: &mut AsyncPgConnection,
                window: PageParams,
            ) -> Result<(i64, Vec<TagColumns>), diesel::result::Error> {
                let count: i64 = $table::table.count().get_result(conn).await?;
                let rows: Vec<$row> = $table::table
                    .select(<$row>::as_select())
                    .order_by(($table::slug.asc(), $table::id.asc()))
                    .limit(window.limit())
                    .offset(window.offset())
                    .load(conn)
                    .await?;
                Ok((count, rows.into_iter().map(TagColumns::from).collect()))
            }

            pub(super) async fn find(
                conn: &mut AsyncPgConnection,
                id: Uuid,
            ) -> Result<Option<TagColumns>, diesel::result::Error> {
                let row: Option<$row> = $table::table
                    .find(id)
                    .select(<$row>::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                Ok(row.map(TagColumns::from))
            }

            pub(super) async fn insert(
                conn: &mut AsyncPgConnection,
                id: Uuid,
                payload: &NewTag,
            ) -> Result<(), diesel::result::Error> {
                diesel::insert_into($table::table)
                    .values($new_row::from_payload(id, payload))
                    .execute(conn)
                    .await
                    .map(|_| ())
            }

            pub(super) async fn update(
                conn: &mut AsyncPgConnection,
                id: Uuid,
                payload: &NewTag,
            ) -> Result<usize, diesel::result::Error> {
                diesel::update($table::table.find(id))
                    .set((
                        $changeset::from_payload(payload),
                        $table::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)
                    .await
            }

            pub(super) async fn delete(
                conn: &mut AsyncPgConnection,
                id: Uuid,
            ) -> Result<usize, diesel::result::Error> {
                diesel::delete($table::table.find(id)).execute(conn).await
            }
        }
    };
}

tag_table_ops!(
    category_ops,
    categories,
    CategoryRow,
    NewCategoryRow,
    CategoryChangeset
);
tag_table_ops!(
    platform_ops,
    platforms,
    PlatformRow,
    NewPlatformRow,
    PlatformChangeset
);
tag_table_ops!(
    accessibility_ops,
    accessibilities,
    AccessibilityRow,
    NewAccessibilityRow,
    AccessibilityChangeset
);

/// Applications referencing each of the given tags.
async fn application_links(
    conn: &mut AsyncPgConnection,
    kind: TagKind,
    tag_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, diesel::result::Error> {
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;

    use super::schema::{application_platform_support, applications};

    let mut links: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    if tag_ids.is_empty() {
        return Ok(links);
    }
    let nullable_ids: Vec<Option<Uuid>> = tag_ids.iter().map(|&id| Some(id)).collect();

    let pairs: Vec<(Uuid, Option<Uuid>)> = match kind {
        TagKind::Category => {
            applications::table
                .filter(applications::category_id.eq_any(nullable_ids))
                .order_by(applications::id.asc())
                .select((applications::id, applications::category_id))
                .load(conn)
                .await?
        }
        TagKind::Accessibility => {
            applications::table
                .filter(applications::accessibility_id.eq_any(nullable_ids))
                .order_by(applications::id.asc())
                .select((applications::id, applications::accessibility_id))
                .load(conn)
                .await?
        }
        TagKind::Platform => {
            application_platform_support::table
                .filter(application_platform_support::platform_id.eq_any(tag_ids))
                .order_by(application_platform_support::application_id.asc())
                .select((
                    application_platform_support::application_id,
                    application_platform_support::platform_id.nullable(),
                ))
                .load(conn)
                .await?
        }
    };

    for (application_id, tag_id) in pairs {
        if let Some(tag_id) = tag_id {
            links.entry(tag_id).or_default().push(application_id);
        }
    }
    Ok(links)
}

fn columns_to_tag(columns: TagColumns, application_ids: Vec<Uuid>) -> Result<Tag, String> {
    Tag::new(TagDraft {
        id: columns.id,
        slug: columns.slug,
        name: columns.name,
        application_ids,
    })
    .map_err(|err| err.to_string())
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list(
        &self,
        kind: TagKind,
        window: PageParams,
    ) -> Result<TagPage, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (count, columns, mut links) = conn
            .transaction(|conn| {
                async move {
                    let (count, columns) = match kind {
                        TagKind::Category => category_ops::page(conn, window).await?,
                        TagKind::Platform => platform_ops::page(conn, window).await?,
                        TagKind::Accessibility => accessibility_ops::page(conn, window).await?,
                    };
                    let tag_ids: Vec<Uuid> = columns.iter().map(|tag| tag.id).collect();
                    let links = application_links(conn, kind, &tag_ids).await?;
                    Ok((count, columns, links))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = collect_rows(
            columns.into_iter().map(|tag| {
                let application_ids = links.remove(&tag.id).unwrap_or_default();
                columns_to_tag(tag, application_ids)
            }),
            CatalogRepositoryError::query,
        )?;
        Ok(TagPage { count, items })
    }

    async fn find(
        &self,
        kind: TagKind,
        id: Uuid,
    ) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let columns = match kind {
                        TagKind::Category => category_ops::find(conn, id).await?,
                        TagKind::Platform => platform_ops::find(conn, id).await?,
                        TagKind::Accessibility => accessibility_ops::find(conn, id).await?,
                    };
                    let Some(columns) = columns else {
                        return Ok(None);
                    };
                    let mut links = application_links(conn, kind, &[id]).await?;
                    Ok(Some((columns, links.remove(&id).unwrap_or_default())))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(columns, application_ids)| columns_to_tag(columns, application_ids))
            .transpose()
            .map_err(CatalogRepositoryError::query)
    }

    async fn create(&self, kind: TagKind, tag: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4();

        match kind {
            TagKind::Category => category_ops::insert(&mut conn, id, tag).await,
            TagKind::Platform => platform_ops::insert(&mut conn, id, tag).await,
            TagKind::Accessibility => accessibility_ops::insert(&mut conn, id, tag).await,
        }
        .map_err(map_diesel_error)?;

        columns_to_tag(
            TagColumns {
                id,
                slug: tag.slug().to_owned(),
                name: tag.name().clone(),
            },
            Vec::new(),
        )
        .map_err(CatalogRepositoryError::query)
    }

    async fn update(
        &self,
        kind: TagKind,
        id: Uuid,
        tag: &NewTag,
    ) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let updated = match kind {
                        TagKind::Category => category_ops::update(conn, id, tag).await?,
                        TagKind::Platform => platform_ops::update(conn, id, tag).await?,
                        TagKind::Accessibility => accessibility_ops::update(conn, id, tag).await?,
                    };
                    if updated == 0 {
                        return Ok(None);
                    }
                    let mut links = application_links(conn, kind, &[id]).await?;
                    Ok(Some(links.remove(&id).unwrap_or_default()))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|application_ids| {
                columns_to_tag(
                    TagColumns {
                        id,
                        slug: tag.slug().to_owned(),
                        name: tag.name().clone(),
                    },
                    application_ids,
                )
            })
            .transpose()
            .map_err(CatalogRepositoryError::query)
    }

    async fn delete(&self, kind: TagKind, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = match kind {
            TagKind::Category => category_ops::delete(&mut conn, id).await,
            TagKind::Platform => platform_ops::delete(&mut conn, id).await,
            TagKind::Accessibility => accessibility_ops::delete(&mut conn, id).await,
        }
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
