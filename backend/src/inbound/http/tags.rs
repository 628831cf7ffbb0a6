//! Tag resource endpoints: categories, platforms, accessibilities.
//!
//! The three resources share one representation and one handler core; the
//! route wrappers pin the [`TagKind`] and the path. Every group exposes
//! list, detail, create, full update, and delete.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::locale::TranslatedText;
use crate::domain::{Error, NewTag, NewTagDraft, Tag, TagKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::hyperlinks::{LinkBuilder, request_url};
use crate::inbound::http::state::HttpState;

/// Tag representation shared by all three tag resources.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    /// Detail URL of this tag.
    pub url: String,
    /// Identifier.
    pub id: Uuid,
    /// Localized display name.
    pub name: TranslatedText,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Detail URLs of the applications referencing this tag.
    pub applications: Vec<String>,
}

impl TagResponse {
    /// Render one tag against the request's link builder.
    pub fn from_domain(tag: &Tag, kind: TagKind, links: &LinkBuilder) -> Self {
        Self {
            url: links.tag(kind, tag.id()),
            id: tag.id(),
            name: tag.name().clone(),
            slug: tag.slug().to_owned(),
            applications: tag
                .application_ids()
                .iter()
                .map(|&id| links.application(id))
                .collect(),
        }
    }
}

/// Query parameters accepted by the tag collection endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TagListQuery {
    /// Window size, up to 100.
    pub limit: Option<i64>,
    /// Rows skipped before the window starts.
    pub offset: Option<i64>,
}

fn window(query: &TagListQuery) -> Result<PageParams, Error> {
    PageParams::new(query.limit, query.offset)
        .map_err(|err| Error::invalid_request(err.to_string()))
}

fn not_found(kind: TagKind, id: Uuid) -> Error {
    Error::not_found(format!("{kind} {id} not found"))
}

async fn list_core(
    state: &HttpState,
    kind: TagKind,
    query: &TagListQuery,
    req: &HttpRequest,
) -> ApiResult<HttpResponse> {
    let window = window(query)?;
    let page = state.tags.list(kind, window).await?;

    let links = LinkBuilder::from_request(req, &state.media_base);
    let results: Vec<TagResponse> = page
        .items
        .iter()
        .map(|tag| TagResponse::from_domain(tag, kind, &links))
        .collect();
    let envelope = Page::new(page.count, results, window, &request_url(req)?);
    Ok(HttpResponse::Ok().json(envelope))
}

async fn detail_core(
    state: &HttpState,
    kind: TagKind,
    id: Uuid,
    req: &HttpRequest,
) -> ApiResult<HttpResponse> {
    let tag = state
        .tags
        .find(kind, id)
        .await?
        .ok_or_else(|| not_found(kind, id))?;

    let links = LinkBuilder::from_request(req, &state.media_base);
    Ok(HttpResponse::Ok().json(TagResponse::from_domain(&tag, kind, &links)))
}

async fn create_core(
    state: &HttpState,
    kind: TagKind,
    draft: NewTagDraft,
    req: &HttpRequest,
) -> ApiResult<HttpResponse> {
    let payload =
        NewTag::try_from(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
    let tag = state.tags.create(kind, &payload).await?;

    let links = LinkBuilder::from_request(req, &state.media_base);
    Ok(HttpResponse::Created().json(TagResponse::from_domain(&tag, kind, &links)))
}

async fn update_core(
    state: &HttpState,
    kind: TagKind,
    id: Uuid,
    draft: NewTagDraft,
    req: &HttpRequest,
) -> ApiResult<HttpResponse> {
    let payload =
        NewTag::try_from(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
    let tag = state
        .tags
        .update(kind, id, &payload)
        .await?
        .ok_or_else(|| not_found(kind, id))?;

    let links = LinkBuilder::from_request(req, &state.media_base);
    Ok(HttpResponse::Ok().json(TagResponse::from_domain(&tag, kind, &links)))
}

async fn delete_core(state: &HttpState, kind: TagKind, id: Uuid) -> ApiResult<HttpResponse> {
    if !state.tags.delete(kind, id).await? {
        return Err(not_found(kind, id));
    }
    Ok(HttpResponse::NoContent().finish())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// List categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(TagListQuery),
    responses(
        (status = 200, description = "One window of categories", body = Page<TagResponse>),
        (status = 400, description = "Malformed window", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<TagListQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    list_core(&state, TagKind::Category, &query, &req).await
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category detail", body = TagResponse),
        (status = 404, description = "No such category", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    detail_core(&state, TagKind::Category, path.into_inner(), &req).await
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = NewTagDraft,
    responses(
        (status = 201, description = "Category created", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    create_core(&state, TagKind::Category, payload.into_inner(), &req).await
}

/// Replace a category's writable fields.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    request_body = NewTagDraft,
    responses(
        (status = 200, description = "Category updated", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 404, description = "No such category", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    update_core(
        &state,
        TagKind::Category,
        path.into_inner(),
        payload.into_inner(),
        &req,
    )
    .await
}

/// Delete a category.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No such category", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    delete_core(&state, TagKind::Category, path.into_inner()).await
}

// ---------------------------------------------------------------------------
// Platforms
// ---------------------------------------------------------------------------

/// List platforms.
#[utoipa::path(
    get,
    path = "/api/v1/platforms",
    params(TagListQuery),
    responses(
        (status = 200, description = "One window of platforms", body = Page<TagResponse>),
        (status = 400, description = "Malformed window", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "listPlatforms"
)]
#[get("/platforms")]
pub async fn list_platforms(
    state: web::Data<HttpState>,
    query: web::Query<TagListQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    list_core(&state, TagKind::Platform, &query, &req).await
}

/// Fetch one platform.
#[utoipa::path(
    get,
    path = "/api/v1/platforms/{id}",
    params(("id" = Uuid, Path, description = "Platform identifier")),
    responses(
        (status = 200, description = "Platform detail", body = TagResponse),
        (status = 404, description = "No such platform", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "getPlatform"
)]
#[get("/platforms/{id}")]
pub async fn get_platform(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    detail_core(&state, TagKind::Platform, path.into_inner(), &req).await
}

/// Create a platform.
#[utoipa::path(
    post,
    path = "/api/v1/platforms",
    request_body = NewTagDraft,
    responses(
        (status = 201, description = "Platform created", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "createPlatform"
)]
#[post("/platforms")]
pub async fn create_platform(
    state: web::Data<HttpState>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    create_core(&state, TagKind::Platform, payload.into_inner(), &req).await
}

/// Replace a platform's writable fields.
#[utoipa::path(
    put,
    path = "/api/v1/platforms/{id}",
    params(("id" = Uuid, Path, description = "Platform identifier")),
    request_body = NewTagDraft,
    responses(
        (status = 200, description = "Platform updated", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 404, description = "No such platform", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "updatePlatform"
)]
#[put("/platforms/{id}")]
pub async fn update_platform(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    update_core(
        &state,
        TagKind::Platform,
        path.into_inner(),
        payload.into_inner(),
        &req,
    )
    .await
}

/// Delete a platform.
#[utoipa::path(
    delete,
    path = "/api/v1/platforms/{id}",
    params(("id" = Uuid, Path, description = "Platform identifier")),
    responses(
        (status = 204, description = "Platform deleted"),
        (status = 404, description = "No such platform", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "deletePlatform"
)]
#[delete("/platforms/{id}")]
pub async fn delete_platform(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    delete_core(&state, TagKind::Platform, path.into_inner()).await
}

// ---------------------------------------------------------------------------
// Accessibilities
// ---------------------------------------------------------------------------

/// List accessibilities.
#[utoipa::path(
    get,
    path = "/api/v1/accessibilities",
    params(TagListQuery),
    responses(
        (status = 200, description = "One window of accessibilities", body = Page<TagResponse>),
        (status = 400, description = "Malformed window", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accessibilities"],
    operation_id = "listAccessibilities"
)]
#[get("/accessibilities")]
pub async fn list_accessibilities(
    state: web::Data<HttpState>,
    query: web::Query<TagListQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    list_core(&state, TagKind::Accessibility, &query, &req).await
}

/// Fetch one accessibility.
#[utoipa::path(
    get,
    path = "/api/v1/accessibilities/{id}",
    params(("id" = Uuid, Path, description = "Accessibility identifier")),
    responses(
        (status = 200, description = "Accessibility detail", body = TagResponse),
        (status = 404, description = "No such accessibility", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accessibilities"],
    operation_id = "getAccessibility"
)]
#[get("/accessibilities/{id}")]
pub async fn get_accessibility(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    detail_core(&state, TagKind::Accessibility, path.into_inner(), &req).await
}

/// Create an accessibility.
#[utoipa::path(
    post,
    path = "/api/v1/accessibilities",
    request_body = NewTagDraft,
    responses(
        (status = 201, description = "Accessibility created", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accessibilities"],
    operation_id = "createAccessibility"
)]
#[post("/accessibilities")]
pub async fn create_accessibility(
    state: web::Data<HttpState>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    create_core(&state, TagKind::Accessibility, payload.into_inner(), &req).await
}

/// Replace an accessibility's writable fields.
#[utoipa::path(
    put,
    path = "/api/v1/accessibilities/{id}",
    params(("id" = Uuid, Path, description = "Accessibility identifier")),
    request_body = NewTagDraft,
    responses(
        (status = 200, description = "Accessibility updated", body = TagResponse),
        (status = 400, description = "Payload fails validation", body = Error),
        (status = 404, description = "No such accessibility", body = Error),
        (status = 409, description = "Slug already taken", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accessibilities"],
    operation_id = "updateAccessibility"
)]
#[put("/accessibilities/{id}")]
pub async fn update_accessibility(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<NewTagDraft>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    update_core(
        &state,
        TagKind::Accessibility,
        path.into_inner(),
        payload.into_inner(),
        &req,
    )
    .await
}

/// Delete an accessibility.
#[utoipa::path(
    delete,
    path = "/api/v1/accessibilities/{id}",
    params(("id" = Uuid, Path, description = "Accessibility identifier")),
    responses(
        (status = 204, description = "Accessibility deleted"),
        (status = 404, description = "No such accessibility", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accessibilities"],
    operation_id = "deleteAccessibility"
)]
#[delete("/accessibilities/{id}")]
pub async fn delete_accessibility(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    delete_core(&state, TagKind::Accessibility, path.into_inner()).await
}
