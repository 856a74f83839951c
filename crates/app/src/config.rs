use std::path::PathBuf;

use storefront_observability::LogFormat;

pub const CATALOG_PATH_VAR: &str = "STOREFRONT_CATALOG_PATH";
pub const IDENTITY_DIR_VAR: &str = "STOREFRONT_IDENTITY_DIR";
pub const LOG_FORMAT_VAR: &str = "STOREFRONT_LOG_FORMAT";

pub const DEFAULT_IDENTITY_DIR: &str = "./.storefront/identities";

/// Process configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON product list; `None` starts with an empty catalog.
    pub catalog_path: Option<PathBuf>,
    /// Directory holding one identity record per session.
    pub identity_dir: PathBuf,
    pub log_format: LogFormat,
    defaulted: Vec<&'static str>,
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unusable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut defaulted = Vec::new();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let catalog_path = non_empty(CATALOG_PATH_VAR).map(PathBuf::from);
        if catalog_path.is_none() {
            defaulted.push(CATALOG_PATH_VAR);
        }

        let identity_dir = non_empty(IDENTITY_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                defaulted.push(IDENTITY_DIR_VAR);
                PathBuf::from(DEFAULT_IDENTITY_DIR)
            });

        let log_format = non_empty(LOG_FORMAT_VAR)
            .and_then(|v| v.parse::<LogFormat>().ok())
            .unwrap_or_else(|| {
                defaulted.push(LOG_FORMAT_VAR);
                LogFormat::default()
            });

        Self {
            catalog_path,
            identity_dir,
            log_format,
            defaulted,
        }
    }

    /// Warn about every setting that fell back to its default. Call once tracing
    /// is initialised.
    pub fn log_defaults(&self) {
        for key in &self.defaulted {
            tracing::warn!(variable = *key, "not set or invalid; using default");
        }
    }
}
