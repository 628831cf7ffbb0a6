//! Shared fixtures for HTTP-level tests: in-memory repository stubs and
//! builders for seeded catalog entities.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pagination::PageParams;
use uuid::Uuid;

use backend::domain::locale::{Locale, TranslatedText};
use backend::domain::ports::{
    ApplicationPage, ApplicationRepository, CatalogRepositoryError, TagPage, TagRepository,
};
use backend::domain::{
    Application, ApplicationDraft, ApplicationFilter, NewApplication, NewTag, OrderField, Tag,
    TagDraft, TagKind, TagRef,
};
use backend::inbound::http::state::HttpState;

/// Build an application entity for seeding stub state.
pub fn application(slug: &str, name_en: &str, rating: Option<f32>) -> Application {
    application_with_category(slug, name_en, rating, None)
}

/// Build an application entity referencing a category.
pub fn application_with_category(
    slug: &str,
    name_en: &str,
    rating: Option<f32>,
    category: Option<TagRef>,
) -> Application {
    let moment = Utc
        .with_ymd_and_hms(2026, 1, 15, 12, 0, 0)
        .single()
        .expect("valid moment");
    Application::new(ApplicationDraft {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        name: TranslatedText::new().with(Locale::En, name_en),
        short_description: TranslatedText::new(),
        description: TranslatedText::new(),
        vendor: Some("Acme Oy".to_owned()),
        image: Some(format!("icons/{slug}.png")),
        publish_date: None,
        rating,
        publisher_url: None,
        support_url: None,
        contact_email: None,
        category,
        accessibility: None,
        languages: vec!["en".to_owned()],
        platforms: vec![],
        screenshots: vec![],
        created: moment,
        modified: moment,
    })
    .expect("valid application fixture")
}

/// Build a tag reference for seeding applications.
pub fn tag_ref(slug: &str, name_en: &str) -> TagRef {
    TagRef {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        name: TranslatedText::new().with(Locale::En, name_en),
    }
}

fn matches_filter(application: &Application, filter: &ApplicationFilter) -> bool {
    if let Some(slug) = filter.category() {
        if application.category().map(|tag| tag.slug.as_str()) != Some(slug) {
            return false;
        }
    }
    if let Some(slug) = filter.accessibility() {
        if application.accessibility().map(|tag| tag.slug.as_str()) != Some(slug) {
            return false;
        }
    }
    if let Some(slug) = filter.platform() {
        if !application
            .platforms()
            .iter()
            .any(|support| support.platform().slug == slug)
        {
            return false;
        }
    }
    if let Some(code) = filter.language() {
        if !application.languages().iter().any(|lang| lang == code) {
            return false;
        }
    }
    if let Some(min) = filter.min_rating() {
        if application.rating().is_none_or(|rating| rating < min) {
            return false;
        }
    }
    if let Some(max) = filter.max_rating() {
        if application.rating().is_none_or(|rating| rating > max) {
            return false;
        }
    }
    if let Some(term) = filter.search() {
        let needle = term.to_lowercase();
        let mut haystacks: Vec<String> = application
            .name()
            .variants()
            .chain(application.description().variants())
            .filter_map(|(_, value)| value.map(str::to_lowercase))
            .collect();
        if let Some(vendor) = application.vendor() {
            haystacks.push(vendor.to_lowercase());
        }
        if !haystacks.iter().any(|value| value.contains(&needle)) {
            return false;
        }
    }
    true
}

fn sorted(mut items: Vec<Application>, filter: &ApplicationFilter) -> Vec<Application> {
    let ordering = filter.ordering();
    items.sort_by(|a, b| {
        let cmp = match ordering.field() {
            OrderField::PublishDate => a.publish_date().cmp(&b.publish_date()),
            OrderField::Created => a.created().cmp(&b.created()),
            OrderField::Modified => a.modified().cmp(&b.modified()),
        };
        if ordering.is_descending() {
            cmp.reverse()
        } else {
            cmp
        }
    });
    items
}

/// In-memory application repository mirroring the persistence contract.
#[derive(Default)]
pub struct StubApplicationRepository {
    store: Mutex<Vec<Application>>,
}

impl StubApplicationRepository {
    /// Stub pre-seeded with the given applications.
    pub fn with_applications(applications: Vec<Application>) -> Self {
        Self {
            store: Mutex::new(applications),
        }
    }

    fn from_payload(
        &self,
        id: Uuid,
        payload: &NewApplication,
        created: chrono::DateTime<Utc>,
    ) -> Application {
        Application::new(ApplicationDraft {
            id,
            slug: payload.slug().to_owned(),
            name: payload.name().clone(),
            short_description: payload.short_description().clone(),
            description: payload.description().clone(),
            vendor: payload.vendor().map(str::to_owned),
            image: payload.image().map(str::to_owned),
            publish_date: payload.publish_date(),
            rating: payload.rating(),
            publisher_url: payload.publisher_url().map(str::to_owned),
            support_url: payload.support_url().map(str::to_owned),
            contact_email: payload.contact_email().map(str::to_owned),
            category: None,
            accessibility: None,
            languages: payload.languages().to_vec(),
            platforms: vec![],
            screenshots: vec![],
            created,
            modified: Utc::now(),
        })
        .expect("validated payload converts")
    }
}

#[async_trait]
impl ApplicationRepository for StubApplicationRepository {
    async fn list(
        &self,
        filter: &ApplicationFilter,
        window: PageParams,
    ) -> Result<ApplicationPage, CatalogRepositoryError> {
        let store = self.store.lock().expect("store lock");
        let matching: Vec<Application> = store
            .iter()
            .filter(|application| matches_filter(application, filter))
            .cloned()
            .collect();
        let matching = sorted(matching, filter);
        let count = i64::try_from(matching.len()).expect("count fits");
        let offset = usize::try_from(window.offset()).expect("offset fits");
        let limit = usize::try_from(window.limit()).expect("limit fits");
        let items = matching.into_iter().skip(offset).take(limit).collect();
        Ok(ApplicationPage { count, items })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Application>, CatalogRepositoryError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.iter().find(|app| app.id() == id).cloned())
    }

    async fn create(
        &self,
        application: &NewApplication,
    ) -> Result<Application, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        if store.iter().any(|app| app.slug() == application.slug()) {
            return Err(CatalogRepositoryError::conflict("duplicate slug"));
        }
        let created = self.from_payload(Uuid::new_v4(), application, Utc::now());
        store.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        application: &NewApplication,
    ) -> Result<Option<Application>, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        let Some(existing) = store.iter_mut().find(|app| app.id() == id) else {
            return Ok(None);
        };
        let replacement = self.from_payload(id, application, existing.created());
        *existing = replacement.clone();
        Ok(Some(replacement))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        let before = store.len();
        store.retain(|app| app.id() != id);
        Ok(store.len() < before)
    }
}

/// In-memory tag repository mirroring the persistence contract.
#[derive(Default)]
pub struct StubTagRepository {
    store: Mutex<Vec<(TagKind, Tag)>>,
}

impl StubTagRepository {
    /// Stub pre-seeded with the given tags.
    pub fn with_tags(tags: Vec<(TagKind, Tag)>) -> Self {
        Self {
            store: Mutex::new(tags),
        }
    }
}

/// Build a tag entity for seeding stub state.
pub fn tag(slug: &str, name_en: &str, application_ids: Vec<Uuid>) -> Tag {
    Tag::new(TagDraft {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        name: TranslatedText::new().with(Locale::En, name_en),
        application_ids,
    })
    .expect("valid tag fixture")
}

#[async_trait]
impl TagRepository for StubTagRepository {
    async fn list(
        &self,
        kind: TagKind,
        window: PageParams,
    ) -> Result<TagPage, CatalogRepositoryError> {
        let store = self.store.lock().expect("store lock");
        let matching: Vec<Tag> = store
            .iter()
            .filter(|(stored_kind, _)| *stored_kind == kind)
            .map(|(_, tag)| tag.clone())
            .collect();
        let count = i64::try_from(matching.len()).expect("count fits");
        let offset = usize::try_from(window.offset()).expect("offset fits");
        let limit = usize::try_from(window.limit()).expect("limit fits");
        let items = matching.into_iter().skip(offset).take(limit).collect();
        Ok(TagPage { count, items })
    }

    async fn find(&self, kind: TagKind, id: Uuid) -> Result<Option<Tag>, CatalogRepositoryError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .iter()
            .find(|(stored_kind, tag)| *stored_kind == kind && tag.id() == id)
            .map(|(_, tag)| tag.clone()))
    }

    async fn create(&self, kind: TagKind, payload: &NewTag) -> Result<Tag, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        if store
            .iter()
            .any(|(stored_kind, tag)| *stored_kind == kind && tag.slug() == payload.slug())
        {
            return Err(CatalogRepositoryError::conflict("duplicate slug"));
        }
        let created = Tag::new(TagDraft {
            id: Uuid::new_v4(),
            slug: payload.slug().to_owned(),
            name: payload.name().clone(),
            application_ids: vec![],
        })
        .expect("validated payload converts");
        store.push((kind, created.clone()));
        Ok(created)
    }

    async fn update(
        &self,
        kind: TagKind,
        id: Uuid,
        payload: &NewTag,
    ) -> Result<Option<Tag>, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        let Some((_, existing)) = store
            .iter_mut()
            .find(|(stored_kind, tag)| *stored_kind == kind && tag.id() == id)
        else {
            return Ok(None);
        };
        let replacement = Tag::new(TagDraft {
            id,
            slug: payload.slug().to_owned(),
            name: payload.name().clone(),
            application_ids: existing.application_ids().to_vec(),
        })
        .expect("validated payload converts");
        *existing = replacement.clone();
        Ok(Some(replacement))
    }

    async fn delete(&self, kind: TagKind, id: Uuid) -> Result<bool, CatalogRepositoryError> {
        let mut store = self.store.lock().expect("store lock");
        let before = store.len();
        store.retain(|(stored_kind, tag)| !(*stored_kind == kind && tag.id() == id));
        Ok(store.len() < before)
    }
}

/// HTTP state over empty stubs.
pub fn empty_state() -> HttpState {
    HttpState::new(
        Arc::new(StubApplicationRepository::default()),
        Arc::new(StubTagRepository::default()),
        "/media",
    )
}

/// HTTP state over the given stubs.
pub fn state_with(
    applications: StubApplicationRepository,
    tags: StubTagRepository,
) -> HttpState {
    HttpState::new(Arc::new(applications), Arc::new(tags), "/media")
}
