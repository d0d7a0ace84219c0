use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::schedule::Schedules;
use crate::task::TaskList;

pub const DEFAULT_DATA_FILE: &str = "learning_app_data.json";

/// Everything that survives a restart. Canvas content is not part of it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub schedules: Schedules,
    #[serde(default)]
    pub tasks: TaskList,
}

#[derive(Debug)]
pub enum LoadResult {
    Loaded(Document),
    /// No file yet; first run.
    Missing,
    /// The file exists but could not be read or parsed. When a copy of it
    /// could be taken before it gets overwritten, `backup` names it.
    Corrupt {
        reason: String,
        backup: Option<PathBuf>,
    },
}

impl LoadResult {
    pub fn into_document(self) -> Document {
        match self {
            LoadResult::Loaded(doc) => doc,
            LoadResult::Missing | LoadResult::Corrupt { .. } => Document::default(),
        }
    }
}

/// Flat JSON file holding the whole [`Document`].
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First of `<file>.corrupt`, `<file>.corrupt.1`, ... that does not exist,
    /// so an earlier backup is never overwritten.
    pub fn backup_path(&self) -> PathBuf {
        let first = sibling(&self.path, ".corrupt");
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| sibling(&self.path, &format!(".corrupt.{n}")))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }

    pub fn load(&self) -> LoadResult {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no data file, starting empty");
                return LoadResult::Missing;
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "data file unreadable, starting empty");
                return LoadResult::Corrupt {
                    reason: err.to_string(),
                    backup: None,
                };
            }
        };

        match serde_json::from_str::<Document>(&data) {
            Ok(doc) => {
                info!(
                    path = %self.path.display(),
                    tasks = doc.tasks.len(),
                    schedules = doc.schedules.len(),
                    "data file loaded"
                );
                LoadResult::Loaded(doc)
            }
            Err(err) => {
                let backup = self.backup_path();
                let backup = match fs::copy(&self.path, &backup) {
                    Ok(_) => Some(backup),
                    Err(copy_err) => {
                        warn!(error = %copy_err, "could not back up corrupt data file");
                        None
                    }
                };
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    backup = ?backup,
                    "data file corrupt, starting empty"
                );
                LoadResult::Corrupt {
                    reason: err.to_string(),
                    backup,
                }
            }
        }
    }

    /// Writes the full document, replacing the previous file.
    ///
    /// The bytes go to a temporary sibling first and are then renamed over
    /// the target, so a crash mid-write leaves the old file intact.
    pub fn save(&self, doc: &Document) -> StoreResult<()> {
        let bytes = to_json(doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let tmp = sibling(&self.path, ".tmp");
        fs::write(&tmp, &bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

/// Pretty JSON with a four space indent and no trailing newline.
pub fn to_json(doc: &Document) -> StoreResult<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser)?;
    Ok(out)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
