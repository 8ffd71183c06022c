//! Line/byte windows over a stream
//!
//! A window is measured from the start (head) or the end (tail) of a
//! stream, in lines or in bytes:
//! - head: forward line scan or a bounded byte read
//! - tail: chunked backward scan, or a byte read from an offset near the end

pub mod head;
pub mod source;
pub mod tail;

use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read, Seek};

use crate::core::error::{ReadError, ReadResult};
use crate::core::model::Line;
use crate::core::util::stream_len;

pub use head::{read_head, read_head_bytes, HeadLines};
pub use source::BackwardSource;
pub use tail::{read_tail, read_tail_bytes};

/// Number of lines read when neither a line nor a byte count is given.
pub const DEFAULT_LINE_COUNT: u64 = 10;

/// Which end of the stream the window is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Head,
    Tail,
}

/// What the window count is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Lines,
    Bytes,
}

/// A resolved window request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRequest {
    pub anchor: Anchor,
    pub unit: Unit,
    pub count: u64,
    /// Prefix lines with their 1-based number (ignored for byte windows)
    pub line_numbers: bool,
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self {
            anchor: Anchor::Head,
            unit: Unit::Lines,
            count: DEFAULT_LINE_COUNT,
            line_numbers: false,
        }
    }
}

impl ReadRequest {
    /// Resolve line/byte counts where zero means "unset".
    ///
    /// Lines win over bytes; with neither set the request falls back to
    /// [`DEFAULT_LINE_COUNT`] lines.
    pub fn from_counts(anchor: Anchor, lines: u64, bytes: u64, line_numbers: bool) -> Self {
        let (unit, count) = if lines > 0 {
            (Unit::Lines, lines)
        } else if bytes > 0 {
            (Unit::Bytes, bytes)
        } else {
            (Unit::Lines, DEFAULT_LINE_COUNT)
        };

        Self {
            anchor,
            unit,
            count,
            line_numbers,
        }
    }
}

/// The content selected by a [`ReadRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    Lines(Vec<Line>),
    Bytes(Vec<u8>),
}

impl Window {
    pub fn is_empty(&self) -> bool {
        match self {
            Window::Lines(lines) => lines.is_empty(),
            Window::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// Read the window described by `request` from a seekable stream.
///
/// Head windows read forward from the current position and never seek, so
/// they also work on pipes. Tail windows measure the stream first and read
/// relative to its end.
pub fn read_window<S: Read + Seek>(source: &mut S, request: &ReadRequest) -> ReadResult<Window> {
    let window = match (request.anchor, request.unit) {
        (Anchor::Head, Unit::Lines) => Window::Lines(read_head(
            BufReader::new(&mut *source),
            request.count,
            request.line_numbers,
        )?),
        (Anchor::Head, Unit::Bytes) => Window::Bytes(read_head_bytes(&mut *source, request.count)?),
        (Anchor::Tail, Unit::Lines) => {
            let size = measure(source)?;
            Window::Lines(read_tail(source, size, request.count, request.line_numbers)?)
        }
        (Anchor::Tail, Unit::Bytes) => {
            let size = measure(source)?;
            Window::Bytes(read_tail_bytes(source, size, request.count)?)
        }
    };

    Ok(window)
}

fn measure<S: Seek>(source: &mut S) -> ReadResult<u64> {
    stream_len(source).map_err(|e| ReadError::Seek {
        offset: 0,
        source: e,
    })
}
