use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::WeatherSnapshot;

/// Snapshot store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read snapshot file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write snapshot file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine platform data directory")]
    NoDataDir,
}

/// Persistence collaborator the renderer reads through.
///
/// Whatever fetches weather writes here; the widget host only ever reads.
pub trait SnapshotStore {
    /// Load the current snapshot. A store with nothing persisted yet returns
    /// the all-defaults snapshot, not an error.
    fn load(&self) -> Result<WeatherSnapshot, StoreError>;

    fn save(&self, snapshot: &WeatherSnapshot) -> Result<(), StoreError>;

    /// Remove the persisted snapshot; subsequent loads see the defaults.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Snapshot store backed by a TOML document on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Path to the snapshot file under the platform data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or(StoreError::NoDataDir)?;

        Ok(dirs.data_dir().join("snapshot.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<WeatherSnapshot, StoreError> {
        if !self.path.exists() {
            // First run: nothing persisted yet, every field takes its default.
            return Ok(WeatherSnapshot::default());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;

        toml::from_str(&contents)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    fn save(&self, snapshot: &WeatherSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        }

        let toml = toml::to_string_pretty(snapshot)?;

        fs::write(&self.path, toml)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Clearing an empty store is a no-op.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path: self.path.clone(), source }),
        }
    }
}
