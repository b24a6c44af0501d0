//! Configuration loading, user preferences and path helpers for the menu bar.

pub mod config;
pub mod path_processing;
pub mod preferences;

pub use config::{
    CONFIG_PATH_ENV, ConfigError, DocumentSource, LOG_PATH_ENV, LoadedDocument, builtin_document, default_log_path, load_document,
    load_document_from_path,
};
pub use path_processing::{app_config_dir, expand_tilde};
pub use preferences::{PreferencesError, UserPreferences};
