//! Per-image crop pipeline: classify, crop, back up, write, report.
//!
//! [`process_one`] is the entry point used by batch drivers. It never
//! returns an error; every failure is folded into a [`CropResult`] with
//! [`CropOutcome::Failed`] so one bad file cannot stop a batch.
//!
//! # Pipeline
//!
//! 1. Decode the file ([`crate::decode::open`])
//! 2. Detect content bounds ([`crate::bounds::detect_bounds`])
//! 3. Classify: fully transparent, already tight, or needs a crop
//! 4. Crop ([`crate::transform::crop_to_bounds`])
//! 5. Unless dry-run: back up the source if overwriting in place, then
//!    encode and write the cropped image in the source format
//!
//! Nothing is kept between calls; run-level totals belong to the caller.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backup::{ensure_backup, BackupStatus};
use crate::bounds::{detect_bounds, AlphaThreshold, BoundingBox, Margins};
use crate::decode::{self, DecodeError, DecodedFile};
use crate::encode::{self, EncodeError};
use crate::transform::crop_to_bounds;

/// Errors that abort processing of a single image.
#[derive(Debug, Error)]
pub enum CropError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Bounds {bounds} do not fit a {width}x{height} image")]
    InvalidBounds {
        bounds: BoundingBox,
        width: u32,
        height: u32,
    },

    #[error("Failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Options for cropping a single image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Copy the source to `<stem>_original.<ext>` before overwriting it.
    pub backup: bool,
    /// Write here instead of overwriting the source.
    pub output_path: Option<PathBuf>,
    /// Pixels with alpha above this value count as content.
    pub alpha_threshold: AlphaThreshold,
    /// Compute and report the result without writing anything.
    pub dry_run: bool,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            backup: true,
            output_path: None,
            alpha_threshold: AlphaThreshold::default(),
            dry_run: false,
        }
    }
}

impl CropOptions {
    /// Create options with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the cropped image for `source` goes.
    pub fn destination_for(&self, source: &Path) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| source.to_path_buf())
    }

    /// True if writing the crop would replace `source`.
    ///
    /// Paths are compared after resolving them, so `./a.png`, `b/../a.png`
    /// or an absolute spelling of `a.png` all count as the source itself.
    pub fn is_in_place(&self, source: &Path) -> bool {
        match self.output_path.as_deref() {
            None => true,
            Some(out) => out == source || resolve_path(out) == resolve_path(source),
        }
    }
}

/// Canonical form of `path`, or a lexically normalized absolute path when
/// it does not exist yet.
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    // The file may be missing while its directory exists under another name
    match (normalized.parent(), normalized.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or(normalized),
        _ => normalized,
    }
}

/// Terminal state of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropOutcome {
    /// Borders were removed (or would be, in dry-run mode).
    Cropped,
    /// The content already spans the whole image.
    NoCropNeeded,
    /// No pixel is above the alpha threshold.
    FullyTransparent,
    /// Decoding, backup or writing failed.
    Failed,
}

impl CropOutcome {
    /// Whether this outcome should be reported as a success.
    pub fn is_success(self) -> bool {
        matches!(self, CropOutcome::Cropped | CropOutcome::NoCropNeeded)
    }
}

/// Pixel-area change between an image and its crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Savings {
    pub original_area: u64,
    pub new_area: u64,
}

impl Savings {
    pub fn between(original: (u32, u32), new: (u32, u32)) -> Self {
        Self {
            original_area: u64::from(original.0) * u64::from(original.1),
            new_area: u64::from(new.0) * u64::from(new.1),
        }
    }

    pub fn pixels_saved(&self) -> u64 {
        self.original_area.saturating_sub(self.new_area)
    }

    /// Share of the original area removed, 0-100. Zero for empty images.
    pub fn percent_saved(&self) -> f64 {
        if self.original_area == 0 {
            return 0.0;
        }
        self.pixels_saved() as f64 / self.original_area as f64 * 100.0
    }
}

/// Classification of detected bounds against the image extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPlan {
    FullyTransparent,
    /// The box is empty or reaches outside the image.
    InvalidBounds(BoundingBox),
    NoCropNeeded(BoundingBox),
    Crop(BoundingBox),
}

/// Decide what to do with an image of `width` x `height` given its bounds.
pub fn classify(bounds: Option<BoundingBox>, width: u32, height: u32) -> CropPlan {
    match bounds {
        None => CropPlan::FullyTransparent,
        Some(b) if !b.fits(width, height) => CropPlan::InvalidBounds(b),
        Some(b) if b.covers(width, height) => CropPlan::NoCropNeeded(b),
        Some(b) => CropPlan::Crop(b),
    }
}

/// Report for one processed image.
#[derive(Debug, Clone)]
pub struct CropResult {
    pub path: PathBuf,
    pub outcome: CropOutcome,
    /// Source dimensions, absent if the file could not be decoded.
    pub original_size: Option<(u32, u32)>,
    /// Output dimensions; equal to `original_size` when nothing was cropped.
    pub new_size: Option<(u32, u32)>,
    pub bounds: Option<BoundingBox>,
    /// One-line human readable summary.
    pub message: String,
    /// Backup handling, when the source was overwritten in place.
    pub backup: Option<BackupStatus>,
    /// File the crop was written to. `None` for dry runs and non-crops.
    pub destination: Option<PathBuf>,
    pub dry_run: bool,
}

impl CropResult {
    fn failed(path: &Path, err: &CropError, dry_run: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome: CropOutcome::Failed,
            original_size: None,
            new_size: None,
            bounds: None,
            message: format!("Error processing {}: {err}", path.display()),
            backup: None,
            destination: None,
            dry_run,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Area statistics, present only for `Cropped` results.
    pub fn savings(&self) -> Option<Savings> {
        match (self.outcome, self.original_size, self.new_size) {
            (CropOutcome::Cropped, Some(original), Some(new)) => {
                Some(Savings::between(original, new))
            }
            _ => None,
        }
    }

    pub fn pixels_saved(&self) -> u64 {
        self.savings().map_or(0, |s| s.pixels_saved())
    }

    /// Transparent border on each side of the detected content.
    pub fn margins(&self) -> Option<Margins> {
        let (width, height) = self.original_size?;
        Some(self.bounds?.margins(width, height))
    }
}

impl fmt::Display for CropResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn format_size((width, height): (u32, u32)) -> String {
    format!("{width}x{height}")
}

/// Crop an already decoded image and, unless `options.dry_run`, write it.
///
/// `bounds` is the output of [`detect_bounds`] for `source.image`. I/O
/// failures during backup or writing yield a `Failed` result.
pub fn transform(
    path: &Path,
    source: &DecodedFile,
    bounds: Option<BoundingBox>,
    options: &CropOptions,
) -> CropResult {
    let image = &source.image;
    let original_size = image.dimensions();

    let mut result = CropResult {
        path: path.to_path_buf(),
        outcome: CropOutcome::Failed,
        original_size: Some(original_size),
        new_size: Some(original_size),
        bounds,
        message: String::new(),
        backup: None,
        destination: None,
        dry_run: options.dry_run,
    };

    let bounds = match classify(bounds, image.width, image.height) {
        CropPlan::FullyTransparent => {
            result.outcome = CropOutcome::FullyTransparent;
            result.message = format!("Image is completely transparent: {}", path.display());
            return result;
        }
        CropPlan::NoCropNeeded(_) => {
            result.outcome = CropOutcome::NoCropNeeded;
            result.message = format!("No cropping needed: {}", path.display());
            return result;
        }
        CropPlan::InvalidBounds(bounds) => {
            let err = CropError::InvalidBounds {
                bounds,
                width: image.width,
                height: image.height,
            };
            log::warn!("{err}");
            return CropResult::failed(path, &err, options.dry_run);
        }
        CropPlan::Crop(bounds) => bounds,
    };

    let new_size = bounds.dimensions();
    let savings = Savings::between(original_size, new_size);
    let summary = format!(
        "{} -> {} | {:.1}% pixels",
        format_size(original_size),
        format_size(new_size),
        savings.percent_saved()
    );

    if options.dry_run {
        result.outcome = CropOutcome::Cropped;
        result.new_size = Some(new_size);
        result.message = format!("Would crop: {} | {summary}", path.display());
        return result;
    }

    let cropped = crop_to_bounds(image, &bounds);
    let destination = options.destination_for(path);

    let backup = if options.backup && options.is_in_place(path) {
        match ensure_backup(path) {
            Ok(status) => Some(status),
            Err(source) => {
                let err = CropError::Backup {
                    path: path.to_path_buf(),
                    source,
                };
                log::warn!("{err}");
                return CropResult::failed(path, &err, options.dry_run);
            }
        }
    } else {
        None
    };

    if let Err(err) = encode::save(&cropped, &destination, source.format) {
        let err = CropError::from(err);
        log::warn!("Failed to write {}: {err}", destination.display());
        let mut failed = CropResult::failed(path, &err, options.dry_run);
        failed.backup = backup;
        return failed;
    }

    log::info!(
        "Cropped {} to {} ({})",
        path.display(),
        bounds,
        destination.display()
    );

    result.outcome = CropOutcome::Cropped;
    result.new_size = Some(new_size);
    result.message = format!("Cropped: {} | {summary} saved", path.display());
    result.backup = backup;
    result.destination = Some(destination);
    result
}

/// Decode, detect and crop the image at `path`.
pub fn process_one(path: &Path, options: &CropOptions) -> CropResult {
    let source = match decode::open(path) {
        Ok(source) => source,
        Err(err) => {
            let err = CropError::from(err);
            log::warn!("Failed to decode {}: {err}", path.display());
            return CropResult::failed(path, &err, options.dry_run);
        }
    };

    let bounds = detect_bounds(&source.image, options.alpha_threshold);
    transform(path, &source, bounds, options)
}

/// Border analysis of one image, without cropping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub path: PathBuf,
    pub size: (u32, u32),
    pub bounds: Option<BoundingBox>,
}

impl Inspection {
    pub fn margins(&self) -> Option<Margins> {
        self.bounds.map(|b| b.margins(self.size.0, self.size.1))
    }

    pub fn plan(&self) -> CropPlan {
        classify(self.bounds, self.size.0, self.size.1)
    }
}

/// Decode `path` and report its content bounds and transparent margins.
pub fn inspect(path: &Path, threshold: AlphaThreshold) -> Result<Inspection, CropError> {
    let source = decode::open(path)?;
    Ok(Inspection {
        path: path.to_path_buf(),
        size: source.image.dimensions(),
        bounds: detect_bounds(&source.image, threshold),
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
