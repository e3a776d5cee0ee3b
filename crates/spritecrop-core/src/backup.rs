//! Pre-crop backups of source files.
//!
//! A backup sits next to its source and carries an `_original` suffix on the
//! file stem: `hero.png` is backed up as `hero_original.png`. A backup is
//! written at most once. Later runs find the existing file and leave it
//! alone, so it always holds the earliest version of the source.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Suffix appended to the file stem of a backup.
pub const BACKUP_SUFFIX: &str = "_original";

/// What [`ensure_backup`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    /// A new backup was written at this path.
    Created(PathBuf),
    /// A backup already existed at this path and was kept.
    Existing(PathBuf),
}

/// Path of the backup for `source`.
///
/// ```ignore
/// assert_eq!(backup_path_for(Path::new("a/hero.png")), PathBuf::from("a/hero_original.png"));
/// ```
pub fn backup_path_for(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.file_stem().unwrap_or_default());
    name.push(BACKUP_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// True if `path` names a backup produced by [`backup_path_for`].
pub fn is_backup_path(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(BACKUP_SUFFIX))
}

/// Copy `source` to its backup path unless a backup already exists.
///
/// The copy is byte-for-byte, so the backup is the untouched source file
/// rather than a re-encoded image. The backup file is opened with
/// `create_new`, which never truncates an existing backup.
pub fn ensure_backup(source: &Path) -> io::Result<BackupStatus> {
    let backup = backup_path_for(source);

    let mut dest = match OpenOptions::new().write(true).create_new(true).open(&backup) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::debug!("Keeping existing backup {}", backup.display());
            return Ok(BackupStatus::Existing(backup));
        }
        Err(e) => return Err(e),
    };

    let copied = File::open(source).and_then(|mut src| io::copy(&mut src, &mut dest));
    drop(dest);

    if let Err(e) = copied {
        // Don't leave a partial backup that would block the next attempt
        let _ = fs::remove_file(&backup);
        return Err(e);
    }

    log::debug!("Backed up {} to {}", source.display(), backup.display());
    Ok(BackupStatus::Created(backup))
}
