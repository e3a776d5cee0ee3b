//! Console output: one line per image and the end-of-run summary.

use spritecrop_core::{CropError, CropOutcome, CropPlan, CropResult, Inspection};

const SUCCESS_MARK: &str = "✓";
const FAILURE_MARK: &str = "✗";

/// Report line(s) for one processed image.
pub fn format_result(result: &CropResult) -> String {
    let mark = if result.is_success() {
        SUCCESS_MARK
    } else {
        FAILURE_MARK
    };
    let mut line = format!("{mark} {}", result.message);

    if result.dry_run && result.outcome == CropOutcome::Cropped {
        if let Some(margins) = result.margins() {
            line.push_str(&format!("\n  Borders: {margins}"));
        }
    }
    line
}

/// Detailed border analysis for one image.
pub fn format_inspection(inspection: &Inspection) -> Vec<String> {
    let (width, height) = inspection.size;
    let mut lines = vec![
        format!("Inspecting: {}", inspection.path.display()),
        format!("  Original size: {width}x{height}"),
    ];

    if let (Some(bounds), Some(margins)) = (inspection.bounds, inspection.margins()) {
        lines.push(format!("  Content bounds: {bounds}"));
        lines.push(format!("  Transparent borders: {margins}"));
    }

    lines.push(match inspection.plan() {
        CropPlan::Crop(_) => {
            format!("  {SUCCESS_MARK} Cropping needed - transparent borders detected")
        }
        CropPlan::NoCropNeeded(_) => {
            format!("  {SUCCESS_MARK} No transparent borders - already optimally cropped")
        }
        CropPlan::FullyTransparent => format!("  {FAILURE_MARK} Image is completely transparent"),
        CropPlan::InvalidBounds(_) => {
            format!("  {FAILURE_MARK} Content bounds do not fit inside the image")
        }
    });
    lines
}

pub fn format_inspection_error(path: &std::path::Path, err: &CropError) -> String {
    format!("{FAILURE_MARK} Error inspecting {}: {err}", path.display())
}

/// Run-level counters, fed one image at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    /// Files cropped, or that would be cropped in a dry run.
    pub cropped: usize,
    pub pixels_saved: u64,
}

impl BatchSummary {
    pub fn record(&mut self, result: &CropResult) {
        self.processed += 1;
        if result.is_success() {
            self.succeeded += 1;
        }
        if let Some(savings) = result.savings() {
            self.cropped += 1;
            self.pixels_saved += savings.pixels_saved();
        }
    }

    pub fn record_inspection(&mut self, inspection: Option<&Inspection>) {
        self.processed += 1;
        let Some(inspection) = inspection else {
            return;
        };
        self.succeeded += 1;
        if let CropPlan::Crop(bounds) = inspection.plan() {
            let (width, height) = inspection.size;
            self.cropped += 1;
            self.pixels_saved += u64::from(width) * u64::from(height) - bounds.area();
        }
    }

    pub fn dry_run_lines(&self) -> Vec<String> {
        vec![
            "Preview Summary:".to_string(),
            format!("  Files analyzed: {}", self.processed),
            format!("  Files that would be cropped: {}", self.cropped),
            format!(
                "  Total pixels that would be saved: {}",
                group_thousands(self.pixels_saved)
            ),
            String::new(),
            "Run without --dry-run to apply changes".to_string(),
        ]
    }

    pub fn inspection_lines(&self) -> Vec<String> {
        vec![
            "Inspection Summary:".to_string(),
            format!("  Files analyzed: {}", self.processed),
            format!("  Files readable: {}", self.succeeded),
            format!("  Files with transparent borders: {}", self.cropped),
        ]
    }

    pub fn crop_lines(&self, backups_enabled: bool) -> Vec<String> {
        let mut lines = vec![
            "Processing Summary:".to_string(),
            format!("  Files processed: {}", self.processed),
            format!("  Files successfully processed: {}", self.succeeded),
            format!("  Files actually cropped: {}", self.cropped),
            format!("  Total pixels saved: {}", group_thousands(self.pixels_saved)),
        ];
        if backups_enabled && self.cropped > 0 {
            lines.push("  Original files backed up with '_original' suffix".to_string());
        }
        lines
    }
}

/// `1234567` -> `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
