//! Application settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Environment-driven settings for the catalog backend.
///
/// Values come from `APPCATALOG_*` environment variables, CLI flags, or a
/// configuration file, merged by OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APPCATALOG")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Startup fails without one.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// Path prefix under which media files are served.
    #[ortho_config(default = "/media".to_owned())]
    pub media_base: String,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    //! Settings parsing coverage.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_environment_is_empty() {
        let _guard = lock_env([
            ("APPCATALOG_DATABASE_URL", None::<String>),
            ("APPCATALOG_BIND_ADDR", None::<String>),
            ("APPCATALOG_MEDIA_BASE", None::<String>),
            ("APPCATALOG_POOL_MAX_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.media_base, "/media");
        assert!(settings.pool_max_size.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "APPCATALOG_DATABASE_URL",
                Some("postgres://localhost/catalog".to_owned()),
            ),
            ("APPCATALOG_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("APPCATALOG_MEDIA_BASE", Some("/static/media".to_owned())),
            ("APPCATALOG_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/catalog")
        );
        assert_eq!(settings.bind_addr, "127.0.0.1:9090");
        assert_eq!(settings.media_base, "/static/media");
        assert_eq!(settings.pool_max_size, Some(4));
    }
}
