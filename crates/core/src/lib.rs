pub mod catalog;
pub mod config;
pub mod content;
pub mod library;
pub mod metrics;
pub mod storage;
pub mod testing;

pub use catalog::{
    filter, load_catalog, paginate, search, sort, BrowseRequest, CatalogBrowser, CatalogError,
    FieldFilter, FilterCriteria, Page, Section, SortKey, YearFilter,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    LatencyConfig, StorageBackendKind, StorageConfig,
};
pub use content::{image_url, ArtSize, ContentId, ContentRecord};
pub use library::{
    open_library, Collection, LibraryError, LibrarySnapshot, LibraryStore, ProgressRecord,
};
pub use storage::{
    create_backend, LatencyBackend, MemoryBackend, SqliteBackend, StorageBackend, StorageError,
};
