//! Menu document discovery and loading.
//!
//! Resolution order:
//! 1. an explicit path (the `--config` flag)
//! 2. `MENUBAR_CONFIG_PATH`
//! 3. `<config dir>/menubar/menubar.yaml` when the file exists
//! 4. the built-in sample document
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use menubar_types::MenubarDocument;
use thiserror::Error;
use tracing::debug;

use crate::path_processing::{app_config_dir, path_from_env};

/// Environment variable overriding the menu document path.
pub const CONFIG_PATH_ENV: &str = "MENUBAR_CONFIG_PATH";
/// Default document filename inside the app config directory.
pub const CONFIG_FILE_NAME: &str = "menubar.yaml";
/// Environment variable overriding the log file path.
pub const LOG_PATH_ENV: &str = "MENUBAR_LOG_PATH";
/// Default log filename inside the app config directory.
pub const LOG_FILE_NAME: &str = "menubar.log";

const BUILTIN_DOCUMENT: &str = r#"
menus:
  - label: File
    entries:
      - { tag: new, label: New }
      - { tag: open, label: Open... }
      - { tag: save, label: Save }
      - { divider: true }
      - { tag: autosave, label: Autosave, checked: true }
  - label: Edit
    entries:
      - { tag: undo, label: Undo }
      - { tag: redo, label: Redo }
      - { divider: true }
      - { tag: cut, label: Cut }
      - { tag: copy, label: Copy }
      - { tag: paste, label: Paste }
  - label: View
    action: view
    entries:
      - { tag: statusbar, label: Status Bar, checked: true }
      - { tag: wrap, label: Word Wrap, checked: false }
  - label: Help
    menuStyles:
      listitem: { fontStyle: italic }
    entries:
      - { tag: about, label: About }
    action: null
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("menu document not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::BuiltIn => f.write_str("<built-in>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: MenubarDocument,
    pub source: DocumentSource,
}

/// Locates and parses the menu document following the resolution order above.
pub fn load_document(explicit: Option<&Path>) -> Result<LoadedDocument, ConfigError> {
    let requested = explicit.map(Path::to_path_buf).or_else(|| path_from_env(CONFIG_PATH_ENV));
    if let Some(path) = requested {
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        return load_file(path);
    }

    let default_path = app_config_dir().join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        return load_file(default_path);
    }

    debug!("no menu document configured; using the built-in sample");
    Ok(LoadedDocument {
        document: builtin_document(),
        source: DocumentSource::BuiltIn,
    })
}

/// Parses the document at `path`.
pub fn load_document_from_path(path: &Path) -> Result<MenubarDocument, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The sample document used when nothing is configured.
pub fn builtin_document() -> MenubarDocument {
    serde_yaml::from_str(BUILTIN_DOCUMENT).unwrap_or_default()
}

/// Log file path, honoring `MENUBAR_LOG_PATH`.
pub fn default_log_path() -> PathBuf {
    path_from_env(LOG_PATH_ENV).unwrap_or_else(|| app_config_dir().join(LOG_FILE_NAME))
}

fn load_file(path: PathBuf) -> Result<LoadedDocument, ConfigError> {
    let document = load_document_from_path(&path)?;
    debug!(path = %path.display(), menus = document.menus.len(), "loaded menu document");
    Ok(LoadedDocument {
        document,
        source: DocumentSource::File(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubar_types::ChildDecl;

    #[test]
    fn builtin_document_parses() {
        let document: MenubarDocument = serde_yaml::from_str(BUILTIN_DOCUMENT).unwrap();
        assert_eq!(document.summary().menus, 4);
        assert_eq!(builtin_document(), document);
    }

    #[test]
    fn explicit_json_path_is_parsed_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.json");
        fs::write(&path, r#"{"menus":[{"label":"File"},"|",null]}"#).unwrap();

        let loaded = load_document(Some(&path)).unwrap();

        assert_eq!(loaded.source, DocumentSource::File(path));
        assert!(matches!(&loaded.document.menus[0], Some(ChildDecl::Menu(menu)) if menu.label == "File"));
        assert!(loaded.document.menus[2].is_none());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let error = load_document(Some(&path)).unwrap_err();
        assert!(matches!(error, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn env_path_is_used_when_no_flag_given() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.yaml");
        fs::write(&path, "menus:\n  - label: Tools\n").unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(path.to_str().unwrap()), || {
            let loaded = load_document(None).unwrap();
            assert_eq!(loaded.source, DocumentSource::File(path.clone()));
            assert_eq!(loaded.document.summary().menus, 1);
        });
    }

    #[test]
    fn malformed_children_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.yaml");
        fs::write(&path, "menus:\n  - label: File\n  - 42\n  - { entries: [] }\n").unwrap();

        let document = load_document_from_path(&path).unwrap();

        assert_eq!(document.menus.len(), 3);
        assert!(matches!(&document.menus[1], Some(ChildDecl::Malformed(_))));
        assert_eq!(document.summary().malformed, 2);
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "menus: [ {label: ").unwrap();

        let error = load_document_from_path(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Yaml { .. }));
        assert!(error.to_string().contains("broken.yaml"));
    }
}
