use super::{
    types::{Config, StorageBackendKind},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Storage namespace is not empty
/// - SQLite backend has a database path
/// - Catalog page size and search limit are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.storage.namespace.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.namespace cannot be empty".to_string(),
        ));
    }

    if config.storage.backend == StorageBackendKind::Sqlite
        && config.storage.path.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "storage.path is required for the sqlite backend".to_string(),
        ));
    }

    if config.catalog.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.page_size cannot be 0".to_string(),
        ));
    }

    if config.catalog.search_limit == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.search_limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}
