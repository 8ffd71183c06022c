//! Stat command - file type and size of the given paths

use anyhow::Result;
use std::fs::{self, FileType};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::commands::emit;
use crate::core::humanize::format_size;
use crate::core::model::{Meta, Record, RecordError, RecordSet};
use crate::core::render::RenderConfig;
use crate::core::util::{get_mtime_ms, normalize_path};

/// Short label for a file type, as used by the renderer's colouring
pub fn file_type_label(file_type: &FileType) -> &'static str {
    if file_type.is_dir() {
        return "dir";
    }
    if file_type.is_symlink() {
        return "symlink";
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_socket() {
            return "socket";
        }
        if file_type.is_fifo() {
            return "fifo";
        }
        if file_type.is_char_device() {
            return "char";
        }
        if file_type.is_block_device() {
            return "block";
        }
    }

    "file"
}

/// Describe one path without following symlinks
pub fn stat_path(path: &Path, human: bool) -> Record {
    let shown = normalize_path(path);
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            warn!(path = %shown, error = %e, "stat failed");
            return Record::error(RecordError::new("STAT_FAILED", e.to_string()))
                .with_path(shown);
        }
    };

    let size = metadata.len();
    let meta = Meta {
        size: Some(size),
        size_human: human.then(|| format_size(size as i64)),
        mtime_ms: get_mtime_ms(&metadata).ok(),
        file_type: Some(file_type_label(&metadata.file_type()).to_string()),
    };

    Record::file(shown).with_meta(meta)
}

/// Stat every path into a record set
pub fn stat_paths(paths: &[PathBuf], human: bool) -> RecordSet {
    paths.iter().map(|p| stat_path(p, human)).collect()
}

/// Run the stat command; returns whether every path could be read
pub fn run_stat(paths: &[PathBuf], human: bool, config: RenderConfig) -> Result<bool> {
    let set = stat_paths(paths, human);
    let all_ok = set.items.iter().all(|r| r.errors.is_empty());
    emit(&set, config)?;
    Ok(all_ok)
}
