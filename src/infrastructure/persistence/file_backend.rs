//! JSON file backend.
//!
//! Active links live in the configured file as a single JSON object scoped by
//! person:
//!
//! ```json
//! {"<person>": {"<short_id>": "<long_url>"}}
//! ```
//!
//! Soft-deleted links are kept in a companion file `<path>.deleted` with the
//! same shape. Both files are rewritten wholesale on every mutation through a
//! temporary file and a rename, so a crash mid-write leaves the previous
//! version in place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::{Link, Snapshot};
use crate::domain::error::{StorageError, StorageResult};
use crate::domain::repositories::LinkBackend;

/// `person -> short_id -> long_url`
type ScopedLinks = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Default, Clone)]
struct FileState {
    active: ScopedLinks,
    deleted: ScopedLinks,
}

impl FileState {
    fn contains(&self, short_id: &str) -> bool {
        self.active
            .values()
            .chain(self.deleted.values())
            .any(|links| links.contains_key(short_id))
    }
}

/// Backend persisting links to a JSON file.
///
/// Keeps its own copy of the file contents; the mutex serializes writers so
/// the file always reflects a consistent state.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    deleted_path: PathBuf,
    state: Mutex<FileState>,
}

impl FileBackend {
    /// Opens the backend, reading existing files.
    ///
    /// Missing or empty files are treated as an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] if a file is not valid JSON of
    /// the expected shape, and [`StorageError::BackendUnavailable`] if it
    /// cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let deleted_path = with_suffix(&path, ".deleted");

        let active = read_links(&path).await?;
        let deleted = read_links(&deleted_path).await?;

        info!(
            path = %path.display(),
            persons = active.len(),
            "File storage opened"
        );

        Ok(Self {
            path,
            deleted_path,
            state: Mutex::new(FileState { active, deleted }),
        })
    }

    /// Path of the active-links file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the companion file holding soft-deleted links.
    pub fn deleted_path(&self) -> &Path {
        &self.deleted_path
    }
}

#[async_trait]
impl LinkBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> StorageResult<Snapshot> {
        let state = self.state.lock().await;
        Ok(Snapshot {
            active: flatten(&state.active),
            deleted: flatten(&state.deleted),
        })
    }

    async fn persist(&self, person: &str, short_id: &str, long_url: &str) -> StorageResult<()> {
        let mut state = self.state.lock().await;

        if state.contains(short_id) {
            return Err(StorageError::duplicate(short_id));
        }

        state
            .active
            .entry(person.to_string())
            .or_default()
            .insert(short_id.to_string(), long_url.to_string());

        if let Err(e) = write_links(&self.path, &state.active).await {
            remove_scoped(&mut state.active, person, short_id);
            return Err(e);
        }

        debug!(short_id, "Link written to file storage");
        Ok(())
    }

    async fn mark_deleted(&self, person: &str, short_id: &str) -> StorageResult<()> {
        let mut state = self.state.lock().await;

        let previous = state.clone();
        let Some(long_url) = remove_scoped(&mut state.active, person, short_id) else {
            return Ok(());
        };
        state
            .deleted
            .entry(person.to_string())
            .or_default()
            .insert(short_id.to_string(), long_url);

        // Deleted file first: a crash in between leaves the link in both
        // files, which loads as active and gets deleted again.
        let written = match write_links(&self.deleted_path, &state.deleted).await {
            Ok(()) => write_links(&self.path, &state.active).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            *state = previous;
            return Err(e);
        }

        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::metadata(dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn flatten(links: &ScopedLinks) -> Vec<Link> {
    links
        .iter()
        .flat_map(|(person, links)| {
            links
                .iter()
                .map(move |(short_id, long_url)| Link::new(short_id, long_url, person))
        })
        .collect()
}

fn remove_scoped(links: &mut ScopedLinks, person: &str, short_id: &str) -> Option<String> {
    let person_links = links.get_mut(person)?;
    let removed = person_links.remove(short_id);
    if person_links.is_empty() {
        links.remove(person);
    }
    removed
}

async fn read_links(path: &Path) -> StorageResult<ScopedLinks> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScopedLinks::new()),
        Err(e) => {
            return Err(StorageError::BackendUnavailable(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ScopedLinks::new());
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| StorageError::InvalidData(format!("malformed {}: {e}", path.display())))
}

async fn write_links(path: &Path, links: &ScopedLinks) -> StorageResult<()> {
    let bytes = serde_json::to_vec(links)
        .map_err(|e| StorageError::InvalidData(format!("failed to encode links: {e}")))?;

    let tmp_path = with_suffix(path, ".tmp");
    let unavailable = |e: std::io::Error| {
        StorageError::BackendUnavailable(format!("failed to write {}: {e}", path.display()))
    };

    fs::write(&tmp_path, bytes).await.map_err(unavailable)?;
    fs::rename(&tmp_path, path).await.map_err(unavailable)
}
