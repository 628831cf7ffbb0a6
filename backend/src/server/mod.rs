//! Server construction and middleware wiring.

mod config;

pub use config::AppSettings;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(debug_assertions)]
use utoipa::OpenApi as _;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::applications::{
    create_application, delete_application, get_application, list_applications,
    update_application,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tags::{
    create_accessibility, create_category, create_platform, delete_accessibility,
    delete_category, delete_platform, get_accessibility, get_category, get_platform,
    list_accessibilities, list_categories, list_platforms, update_accessibility,
    update_category, update_platform,
};
use crate::middleware::Trace;
use crate::outbound::persistence::{DbPool, DieselApplicationRepository, DieselTagRepository};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    media_base: String,
    pool: DbPool,
    #[cfg(feature = "metrics")]
    prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, media_base: impl Into<String>, pool: DbPool) -> Self {
        Self {
            bind_addr,
            media_base: media_base.into(),
            pool,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

/// The versioned API scope with every resource endpoint registered.
///
/// Exposed so integration tests can mount the same routes over stub state.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(list_applications)
        .service(get_application)
        .service(create_application)
        .service(update_application)
        .service(delete_application)
        .service(list_categories)
        .service(get_category)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(list_platforms)
        .service(get_platform)
        .service(create_platform)
        .service(update_platform)
        .service(delete_platform)
        .service(list_accessibilities)
        .service(get_accessibility)
        .service(create_accessibility)
        .service(update_accessibility)
        .service(delete_accessibility)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        media_base,
        pool,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = match prometheus {
        Some(metrics) => metrics,
        None => PrometheusMetricsBuilder::new("appcatalog")
            .endpoint("/metrics")
            .build()
            .map_err(|err| {
                std::io::Error::other(format!("prometheus metrics init failed: {err}"))
            })?,
    };

    let http_state = web::Data::new(HttpState::new(
        Arc::new(DieselApplicationRepository::new(pool.clone())),
        Arc::new(DieselTagRepository::new(pool)),
        media_base,
    ));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
