//! Run settings: defaults, an optional TOML file, then command-line flags.
//!
//! ```toml
//! backup = false
//! alpha_threshold = 32
//! output_dir = "build/sprites"
//! extensions = ["png"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use spritecrop_core::{AlphaThreshold, CropOptions};

use crate::cli::Args;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub backup: bool,
    pub alpha_threshold: AlphaThreshold,
    pub output_dir: Option<PathBuf>,
    /// File extensions picked up when walking a directory, without the dot.
    pub extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup: true,
            alpha_threshold: AlphaThreshold::default(),
            output_dir: None,
            extensions: vec!["png".to_string()],
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings for `args`: the config file if one was given, else defaults,
    /// with explicit flags taking precedence.
    pub fn resolve(args: &Args) -> Result<Self, CliError> {
        let settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(settings.with_args(args))
    }

    fn with_args(mut self, args: &Args) -> Self {
        if args.no_backup {
            self.backup = false;
        }
        if let Some(threshold) = args.alpha_threshold {
            self.alpha_threshold = AlphaThreshold(threshold);
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = Some(dir.clone());
        }
        self
    }

    /// Crop options for `file`, found under `base`.
    ///
    /// With an output directory the file keeps its path relative to `base`.
    pub fn crop_options(&self, file: &Path, base: &Path, dry_run: bool) -> CropOptions {
        let output_path = self.output_dir.as_ref().map(|dir| {
            let relative = file
                .strip_prefix(base)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .or_else(|| file.file_name().map(Path::new))
                .unwrap_or(file);
            dir.join(relative)
        });

        CropOptions {
            backup: self.backup,
            output_path,
            alpha_threshold: self.alpha_threshold,
            dry_run,
        }
    }
}
