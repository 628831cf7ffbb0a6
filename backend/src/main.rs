//! Backend entry-point: wires settings, migrations, the pool, and the
//! HTTP server.

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{AppSettings, ServerConfig, create_server};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(database_url: &str) -> Result<(), String> {
    use diesel::Connection as _;

    let mut conn =
        diesel::PgConnection::establish(database_url).map_err(|err| err.to_string())?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            if !applied.is_empty() {
                info!(count = applied.len(), "database migrations applied");
            }
        })
        .map_err(|err| err.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration failed to load: {err}")))?;

    let database_url = settings.database_url.clone().ok_or_else(|| {
        std::io::Error::other("APPCATALOG_DATABASE_URL must point at a PostgreSQL database")
    })?;

    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task panicked: {err}")))?
        .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;

    let mut pool_config = PoolConfig::new(&database_url);
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool failed to build: {err}")))?;

    #[cfg(feature = "example-data")]
    {
        let example_settings = backend::example_data::ExampleDataSettings::load().map_err(
            |err| std::io::Error::other(format!("example data configuration failed: {err}")),
        )?;
        backend::example_data::seed_example_catalog(&example_settings, &pool)
            .await
            .map_err(|err| std::io::Error::other(format!("example data seeding failed: {err}")))?;
    }

    let bind_addr = settings.bind_addr.parse().map_err(|err| {
        std::io::Error::other(format!(
            "bind address '{}' is not valid: {err}",
            settings.bind_addr
        ))
    })?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, settings.media_base.clone(), pool);
    let server = create_server(health_state, config)?;

    info!(addr = %bind_addr, "application catalog backend listening");
    server.await
}
