//! User template directory.
//!
//! A template's id is its path relative to the directory root, with `/`
//! separators: `<root>/ci/github/build.yml.hbs` is `ci/github/build.yml.hbs`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use cradle_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::CradleResult,
};

const EXTENSION: &str = "hbs";

/// Store reading `.hbs` files from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn id_for(&self, path: &Path) -> Option<TemplateId> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(TemplateId::new(parts.join("/")))
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn get(&self, id: &TemplateId) -> CradleResult<String> {
        let path = self.root.join(id.as_str());
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                debug!(path = %path.display(), "Loaded user template");
                Ok(source)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into())
            }
            Err(e) => Err(ApplicationError::FileRead {
                path,
                reason: e.to_string(),
            }
            .into()),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> CradleResult<Vec<TemplateId>> {
        if !self.root.is_dir() {
            warn!("Template directory does not exist");
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::FileRead {
                path: e.path().map_or_else(|| self.root.clone(), Path::to_path_buf),
                reason: e.to_string(),
            })?;
            let is_template = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == EXTENSION);
            if is_template {
                ids.extend(self.id_for(entry.path()));
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn lists_hbs_files_by_relative_id() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ci/github")).unwrap();
        fs::write(dir.path().join("ci/github/build.yml.hbs"), "b").unwrap();
        fs::write(dir.path().join("README.md.hbs"), "r").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = DirectoryTemplateStore::new(dir.path());
        let ids: Vec<String> = store.list().unwrap().iter().map(ToString::to_string).collect();

        assert_eq!(ids, ["README.md.hbs", "ci/github/build.yml.hbs"]);
        assert_eq!(store.get(&"ci/github/build.yml.hbs".into()).unwrap(), "b");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryTemplateStore::new(dir.path());
        let err = store.get(&"absent.hbs".into()).unwrap_err();
        assert!(err.to_string().contains("Template not found"));
    }

    #[test]
    fn missing_root_lists_nothing() {
        let store = DirectoryTemplateStore::new("/definitely/not/here");
        assert!(store.list().unwrap().is_empty());
    }
}
