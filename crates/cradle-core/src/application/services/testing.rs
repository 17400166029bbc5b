//! In-crate fakes for service unit tests.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, TemplateRenderer, TemplateStore};
use crate::domain::{Helper, HelperSet, TemplateId};
use crate::error::CradleResult;

#[derive(Default)]
pub struct MapStore {
    templates: HashMap<String, String>,
}

impl MapStore {
    pub fn with(mut self, id: &str, source: &str) -> Self {
        self.templates.insert(id.to_string(), source.to_string());
        self
    }
}

impl TemplateStore for MapStore {
    fn get(&self, id: &TemplateId) -> CradleResult<String> {
        self.templates
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn list(&self) -> CradleResult<Vec<TemplateId>> {
        let mut ids: Vec<_> = self.templates.keys().map(|k| TemplateId::new(k.as_str())).collect();
        ids.sort();
        Ok(ids)
    }
}

/// Substitutes `{{name}}` with the package name and `{{gh}}` with `${{ gh }}`
/// when the GitHub helper is active. Any other `{{` is a missing field.
pub struct NameRenderer;

impl TemplateRenderer for NameRenderer {
    fn render(
        &self,
        id: &TemplateId,
        source: &str,
        context: &Value,
        helpers: &HelperSet,
    ) -> CradleResult<String> {
        let name = context["packageSpec"]["name"].as_str().unwrap_or_default();
        let mut out = source.replace("{{name}}", name);
        if helpers.contains(Helper::GithubExpression) {
            out = out.replace("{{gh}}", "${{ gh }}");
        }
        if out.replace("${{", "").contains("{{") {
            return Err(ApplicationError::TemplateRender {
                id: id.to_string(),
                reason: "unresolved placeholder".into(),
            }
            .into());
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct MemFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl MemFs {
    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().ok()?.get(path.as_ref()).cloned()
    }

    pub fn put(&self, path: impl AsRef<Path>, content: &str) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.as_ref().to_path_buf(), content.to_string());
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        if let Ok(mut files) = self.files.lock() {
            files.remove(path.as_ref());
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().map(|f| f.len()).unwrap_or_default()
    }
}

impl Filesystem for MemFs {
    fn create_dir_all(&self, path: &Path) -> CradleResult<()> {
        let mut dirs = self.dirs.lock().map_err(|_| ApplicationError::LockPoisoned)?;
        dirs.push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CradleResult<()> {
        let mut files = self.files.lock().map_err(|_| ApplicationError::LockPoisoned)?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CradleResult<String> {
        self.read(path).ok_or_else(|| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let in_files = self
            .files
            .lock()
            .map(|f| f.keys().any(|p| p.starts_with(path)))
            .unwrap_or(false);
        let in_dirs = self
            .dirs
            .lock()
            .map(|d| d.iter().any(|p| p.starts_with(path)))
            .unwrap_or(false);
        in_files || in_dirs
    }
}
