use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::WeatherError, location::Location, snapshot::WeatherSnapshot};

/// Anything that can produce a forecast for a location. Fetches block, so the
/// run loop calls them from a worker thread.
pub trait WeatherSource: Send + Sync {
    fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError>;
}

pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WeatherSource for SnapshotFile {
    fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(%location, path = %self.path.display(), "reading snapshot");

        let json = fs::read_to_string(&self.path).map_err(|source| WeatherError::Io {
            path: self.path.clone(),
            source,
        })?;

        WeatherSnapshot::from_json(&json)
    }
}
