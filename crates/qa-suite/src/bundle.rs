//! Downloaded bundle archive inspection.
//!
//! The bundler delivers its output as a zip archive dropped into the
//! suite's download directory. Validation only inspects member names, not
//! contents. The download directory is shared across scenarios, so the
//! helpers here also handle cleanup: stale archives are purged before a
//! run, and each validated archive is deleted immediately after use so the
//! "most recently modified" selection stays reliable.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

/// Returns true if `path` names a zip file.
fn is_zip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zip")
}

/// Removes every `*.zip` in `dir`, returning how many were deleted.
///
/// A missing directory counts as already clean.
pub fn clear_zips(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_zip(&path) {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    if removed > 0 {
        info!(dir = %dir.display(), removed, "cleared stale archives");
    }
    Ok(removed)
}

/// Selects the most-recently-modified `*.zip` in `dir`.
///
/// The browser may rename or timestamp the archive it writes, so selection
/// goes by modification time rather than a fixed file name.
pub fn latest_zip(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !is_zip(&path) {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        match &newest {
            Some((best, _)) if *best >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Lists the member names of a zip archive.
pub fn member_names(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let archive = zip::ZipArchive::new(file)?;

    Ok(archive.file_names().map(str::to_string).collect())
}
