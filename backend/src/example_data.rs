//! Example catalog seeding at startup.
//!
//! Behind the `example-data` feature: configuration is loaded via
//! OrthoConfig (`EXAMPLE_DATA_*` environment variables or CLI flags), the
//! named seed is resolved from a JSON registry on disk, and the generated
//! catalog is inserted through the seeding adapter unless the database
//! already holds applications.

use std::path::PathBuf;

use example_data::{RegistryError, SeedDefinition, SeedRegistry, generate_example_catalog};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::CatalogRepositoryError;
use crate::outbound::persistence::diesel_seed_repository::{DieselSeedRepository, SeedOutcome};
use crate::outbound::persistence::DbPool;

const DEFAULT_SEED_NAME: &str = "mossy-owl";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Configuration values controlling example data seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable example data seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Optional override for the number of applications generated.
    #[ortho_config(file_key = "application_count")]
    pub count: Option<usize>,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the default.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}

/// Failures while seeding the example catalog.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The registry file could not be read.
    #[error("seed registry at {path} could not be read: {message}")]
    Io {
        /// Registry path attempted.
        path: String,
        /// Underlying failure description.
        message: String,
    },
    /// The registry content was rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The configured seed name is absent from the registry.
    #[error("seed '{name}' not found in registry")]
    UnknownSeed {
        /// Requested seed name.
        name: String,
    },
    /// The seeding insert failed.
    #[error(transparent)]
    Repository(#[from] CatalogRepositoryError),
}

/// Load a seed registry from disk.
///
/// # Errors
///
/// Returns [`SeedError::Io`] when the file cannot be read and
/// [`SeedError::Registry`] when its content is rejected.
pub fn load_registry(path: &std::path::Path) -> Result<SeedRegistry, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|err| SeedError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    Ok(SeedRegistry::from_json(&json)?)
}

/// Seed the example catalog when enabled by configuration.
///
/// # Errors
///
/// Returns [`SeedError`] when the registry cannot be loaded, the seed name
/// is unknown, or the insert fails.
pub async fn seed_example_catalog(
    settings: &ExampleDataSettings,
    pool: &DbPool,
) -> Result<(), SeedError> {
    if !settings.enabled {
        return Ok(());
    }

    let registry = load_registry(&settings.registry_path())?;
    let name = settings.seed_name();
    let named = registry
        .find_seed(name)
        .ok_or_else(|| SeedError::UnknownSeed {
            name: name.to_owned(),
        })?;

    let definition = SeedDefinition {
        application_count: settings.count.unwrap_or(named.application_count),
        ..named.clone()
    };
    let catalog = generate_example_catalog(&definition);

    let repository = DieselSeedRepository::new(pool.clone());
    match repository.seed(&catalog).await? {
        SeedOutcome::Seeded { applications } => {
            info!(seed = name, applications, "example catalog seeded");
        }
        SeedOutcome::SkippedNonEmpty => {
            info!(seed = name, "catalog not empty, example data seeding skipped");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for example data configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_SEED_NAME", None::<String>),
            ("EXAMPLE_DATA_COUNT", None::<String>),
            ("EXAMPLE_DATA_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.enabled);
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert_eq!(settings.registry_path(), default_registry_path());
        assert!(settings.count.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            ("EXAMPLE_DATA_SEED_NAME", Some("rainbow-fox".to_owned())),
            ("EXAMPLE_DATA_COUNT", Some("5".to_owned())),
            (
                "EXAMPLE_DATA_REGISTRY_PATH",
                Some("/tmp/example_registry.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.enabled);
        assert_eq!(settings.seed_name(), "rainbow-fox");
        assert_eq!(
            settings.registry_path(),
            PathBuf::from("/tmp/example_registry.json")
        );
        assert_eq!(settings.count, Some(5));
    }

    #[rstest]
    fn registry_loads_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("seeds.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "seeds": [{"name": "a", "seed": 1, "applicationCount": 2}]}"#,
        )
        .expect("registry written");

        let registry = load_registry(&path).expect("registry loads");
        assert!(registry.find_seed("a").is_some());
    }

    #[rstest]
    fn missing_registry_reports_the_path() {
        let err = load_registry(std::path::Path::new("/nonexistent/seeds.json"))
            .expect_err("missing file rejected");
        assert!(err.to_string().contains("/nonexistent/seeds.json"));
    }

    #[rstest]
    fn bundled_registry_parses() {
        let registry = load_registry(&default_registry_path()).expect("bundled registry loads");
        assert!(registry.find_seed(DEFAULT_SEED_NAME).is_some());
    }
}
