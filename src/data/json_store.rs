use crate::domain::user::User;
use serde_json::error::Category;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_DATA_FILE: &str = "app_data.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record in data file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize users: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of reading the data file at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<User>),
    /// No file, or the file was not well-formed JSON.
    Fresh,
}

impl LoadOutcome {
    pub fn users(&self) -> &[User] {
        match self {
            LoadOutcome::Loaded(users) => users,
            LoadOutcome::Fresh => &[],
        }
    }
}

/// Whole-document persistence of the roster as a JSON array of users.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the roster.
    ///
    /// A missing file or invalid JSON syntax yields [`LoadOutcome::Fresh`].
    /// Well-formed JSON whose records lack a required field is an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<LoadOutcome, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Data file not found");
                return Ok(LoadOutcome::Fresh);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Vec<User>>(&contents) {
            Ok(users) => {
                info!(users = users.len(), "Data file loaded");
                Ok(LoadOutcome::Loaded(users))
            }
            Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
                warn!(error = %e, "Data file is not valid JSON, ignoring it");
                Ok(LoadOutcome::Fresh)
            }
            Err(source) => Err(StoreError::Malformed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrites the data file with the full roster.
    #[instrument(skip(self, users), fields(path = %self.path.display(), users = users.len()))]
    pub fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let document = serde_json::to_vec(users)?;
        debug!(bytes = document.len(), "Writing data file");
        fs::write(&self.path, document).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Data file written");
        Ok(())
    }
}
