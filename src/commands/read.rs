//! Read command - head/tail windows of a file

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::commands::emit;
use crate::core::humanize::format_size;
use crate::core::model::{Record, RecordSet};
use crate::core::render::RenderConfig;
use crate::core::util::normalize_path;
use crate::window::{read_window, Anchor, HeadLines, ReadRequest, Unit, Window};

/// Open a regular file for reading, rejecting directories
pub fn open_file(path: &Path) -> Result<File> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Couldn't read specified file {}", path.display()))?;
    if metadata.is_dir() {
        bail!("Specified path {} is a directory", path.display());
    }

    debug!(
        path = %path.display(),
        size = %format_size(metadata.len() as i64),
        "opened file"
    );
    File::open(path).with_context(|| format!("Couldn't open specified file {}", path.display()))
}

/// Convert a window into output records
pub fn window_records(window: Window) -> RecordSet {
    match window {
        Window::Lines(lines) => lines.into_iter().map(Record::line).collect(),
        Window::Bytes(bytes) => {
            let mut set = RecordSet::new();
            set.push(Record::bytes(bytes));
            set
        }
    }
}

/// Read the requested window of a file into records
pub fn read_records(path: &Path, request: &ReadRequest) -> Result<RecordSet> {
    let mut file = open_file(path)?;
    let window = read_window(&mut file, request)
        .with_context(|| format!("Couldn't read file {}", path.display()))?;
    Ok(window_records(window))
}

/// Run the read command
pub fn run_read(
    path: &Path,
    tail: bool,
    lines: u64,
    bytes: u64,
    line_numbers: bool,
    config: RenderConfig,
) -> Result<()> {
    let anchor = if tail { Anchor::Tail } else { Anchor::Head };
    let request = ReadRequest::from_counts(anchor, lines, bytes, line_numbers);
    debug!(?request, path = %normalize_path(path), "resolved read request");

    if request.anchor == Anchor::Head && request.unit == Unit::Lines {
        return stream_head(path, &request, config);
    }

    let set = read_records(path, &request)?;
    emit(&set, config)
}

/// Head lines are emitted even when the scan later fails
fn stream_head(path: &Path, request: &ReadRequest, config: RenderConfig) -> Result<()> {
    let file = open_file(path)?;
    let mut set = RecordSet::new();

    for line in HeadLines::new(BufReader::new(file), request.count, request.line_numbers) {
        match line {
            Ok(line) => set.push(Record::line(line)),
            Err(e) => {
                emit(&set, config)?;
                return Err(e).with_context(|| format!("Couldn't read file {}", path.display()));
            }
        }
    }

    emit(&set, config)
}
