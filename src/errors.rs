use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("couldn't read snapshot {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0:?} is not a valid location")]
    InvalidLocation(String),
}
