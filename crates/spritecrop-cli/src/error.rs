use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a whole run. Per-image failures never end up here.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Path '{}' does not exist", .0.display())]
    MissingPath(PathBuf),
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
