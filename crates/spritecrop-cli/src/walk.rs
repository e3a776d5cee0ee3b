use std::path::{Path, PathBuf};

use spritecrop_core::backup::is_backup_path;
use walkdir::WalkDir;

/// Recursively collect sprite files under `root`, sorted by path.
///
/// A file qualifies when its extension matches one of `extensions`
/// (case-insensitive) and it is not an `_original` backup. Unreadable
/// directories are logged and skipped.
pub fn find_sprite_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions) && !is_backup_path(path))
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
