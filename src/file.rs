// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::roster::RosterTimeline;

/// Write the timeline to `export.out_path` (or the default path).
/// Returns the final path written to.
pub fn export_timeline(export: &ExportOptions, timeline: &RosterTimeline) -> io::Result<PathBuf> {
    let path = export.out_path.clone().unwrap_or_else(|| export.default_path());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(timeline, export.format, export.include_headers);
    fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "roster exported");
    Ok(path)
}

/// Create the directory (and parents) if missing; error if a file is in the way.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is a file", dir.display()),
        ));
    }
    fs::create_dir_all(dir)
}
