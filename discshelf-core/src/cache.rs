use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::CatalogError;
use crate::io::load_catalog;
use crate::models::Catalog;
use crate::schema::AliasTable;

/// Identity of a source file at one point in time.
///
/// The SHA-256 of the contents is part of the key, so a rewrite that keeps
/// the length and lands within the filesystem's mtime resolution is still
/// seen as a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
    pub digest: Vec<u8>,
}

impl SourceKey {
    pub fn probe(path: &Path) -> Result<Self, CatalogError> {
        let metadata = fs::metadata(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                CatalogError::SourceNotFound(path.to_path_buf())
            } else {
                CatalogError::Io(err)
            }
        })?;
        let path = fs::canonicalize(path)?;

        let mut hasher = Sha256::new();
        hasher.update(fs::read(&path)?);

        Ok(Self {
            path,
            modified: metadata.modified().ok(),
            len: metadata.len(),
            digest: hasher.finalize().to_vec(),
        })
    }
}

/// Canonical form of `path`, falling back to the canonical parent directory
/// when the file itself no longer exists
fn canonical_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            fs::canonicalize(parent)
                .map(|dir| dir.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Normalized catalogs keyed by source identity; an entry is reloaded as
/// soon as its file's modification time, length or contents change.
#[derive(Debug, Default)]
pub struct CatalogCache {
    aliases: AliasTable,
    sheet: Option<String>,
    entries: HashMap<PathBuf, (SourceKey, Arc<Catalog>)>,
}

impl CatalogCache {
    pub fn new(aliases: AliasTable, sheet: Option<String>) -> Self {
        Self {
            aliases,
            sheet,
            entries: HashMap::new(),
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Return the cached catalog for `path`, loading it when absent or stale
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Catalog>, CatalogError> {
        let key = match SourceKey::probe(path) {
            Ok(key) => key,
            Err(err) => {
                self.invalidate(path);
                return Err(err);
            }
        };

        if let Some((cached_key, catalog)) = self.entries.get(&key.path) {
            if *cached_key == key {
                debug!("catalog cache hit for {}", key.path.display());
                return Ok(Arc::clone(catalog));
            }
            info!("{} changed on disk, reloading", key.path.display());
        }

        let catalog = Arc::new(load_catalog(&key.path, self.sheet.as_deref(), &self.aliases)?);
        self.entries
            .insert(key.path.clone(), (key, Arc::clone(&catalog)));
        Ok(catalog)
    }

    /// Drop the entry for `path`, if any
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(&canonical_path(path));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
