//! Store connection strings and the on-disk document collections.
//!
//! Documents live in actors while the process runs. The connection string
//! decides whether they also live on disk:
//!
//! * `memory://` starts empty and keeps nothing.
//! * `file://<dir>` keeps `lessons.json` and `orders.json` in `<dir>`. Each is
//!   a JSON array of documents, rewritten in full after every change and
//!   read back at startup. A missing file is an empty collection, so a fresh
//!   directory with a hand-written `lessons.json` seeds the catalog.

use crate::model::{Lesson, LessonCreate, LessonId, Order};
use actor_framework::{Snapshot, SnapshotError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const LESSONS_FILE: &str = "lessons.json";
pub const ORDERS_FILE: &str = "orders.json";

/// Where the documents are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    Memory,
    Directory(PathBuf),
}

/// The connection string names a scheme this service cannot open.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unsupported connection string {0:?}: expected memory:// or file://<dir>")]
pub struct UnsupportedConnection(pub String);

/// The stored collections could not be loaded; the service cannot start.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store directory {0} does not exist or is not a directory")]
    NotADirectory(PathBuf),

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed collection {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FromStr for Connection {
    type Err = UnsupportedConnection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "memory://" {
            return Ok(Connection::Memory);
        }
        match s.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(Connection::Directory(PathBuf::from(path))),
            _ => Err(UnsupportedConnection(s.to_string())),
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connection::Memory => f.write_str("memory://"),
            Connection::Directory(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Everything read back from a store at startup.
#[derive(Debug, Default)]
pub struct StoredDocuments {
    pub lessons: Vec<Lesson>,
    pub orders: Vec<Order>,
}

impl Connection {
    /// Reads both collections.
    ///
    /// Lessons keep a valid `lesson_<n>` `_id` the first time it appears;
    /// the rest get fresh ids after the largest kept one, in file order.
    pub async fn load(&self) -> Result<StoredDocuments, StoreError> {
        let dir = match self {
            Connection::Memory => return Ok(StoredDocuments::default()),
            Connection::Directory(dir) => dir,
        };
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(StoreError::NotADirectory(dir.clone())),
        }

        let entries: Vec<LessonCreate> = read_collection(&dir.join(LESSONS_FILE)).await?;
        let lessons = assign_ids(entries);
        let orders: Vec<Order> = read_collection(&dir.join(ORDERS_FILE)).await?;
        info!(
            dir = %dir.display(),
            lessons = lessons.len(),
            orders = orders.len(),
            "Loaded store"
        );
        Ok(StoredDocuments { lessons, orders })
    }
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No collection file, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&raw).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn assign_ids(entries: Vec<LessonCreate>) -> Vec<Lesson> {
    let mut taken = BTreeSet::new();
    let kept: Vec<Option<LessonId>> = entries
        .iter()
        .map(|entry| entry.stored_id().filter(|id| taken.insert(*id)))
        .collect();
    let mut next = taken.last().map_or(1, |id: &LessonId| id.0.saturating_add(1));

    entries
        .into_iter()
        .zip(kept)
        .map(|(entry, id)| {
            let id = id.unwrap_or_else(|| {
                let id = LessonId(next);
                next = next.saturating_add(1);
                id
            });
            Lesson::new(id, entry)
        })
        .collect()
}

/// One collection kept as a JSON array in a single file.
///
/// Writes go to `<file>.tmp` first and are renamed over the file, so a crash
/// mid-write leaves the previous copy intact.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl<T: Serialize + Send + Sync + 'static> Snapshot<T> for JsonFile {
    async fn save(&self, documents: Vec<T>) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(&documents)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), count = documents.len(), "Saved collection");
        Ok(())
    }
}
