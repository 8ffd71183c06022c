//! Unified output model
//!
//! Every command maps its results into [`Record`]s before rendering, so the
//! text, jsonl and json outputs stay consistent across commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Line,
    Bytes,
    Match,
    File,
    Error,
}

/// A half-open `[start, end)` byte range within a line marking one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A line produced by a head/tail window.
///
/// `number` is the 1-based line number in the source, present only when
/// numbering was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub text: String,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            number: None,
            text: text.into(),
        }
    }

    pub fn numbered(number: u64, text: impl Into<String>) -> Self {
        Self {
            number: Some(number),
            text: text.into(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}: {}", n, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Metadata attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Size rendered by `format_size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Modification time in milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime_ms: Option<i64>,

    /// File type label (file/dir/symlink/socket/fifo/char/block)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// Error information for a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    pub code: String,
    pub message: String,
}

impl RecordError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified record every command produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub kind: Kind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// 1-based line number in the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,

    /// Line text, rendered match, or lossy-decoded byte window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Number of match spans on the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<usize>,

    /// Match spans, offsets into the unrendered line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<Span>,

    #[serde(default)]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RecordError>,

    /// Raw bytes of a byte window; written verbatim by the text renderer
    #[serde(skip)]
    pub raw: Option<Vec<u8>>,
}

impl Record {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            line: None,
            text: None,
            matches: None,
            spans: Vec::new(),
            meta: Meta::default(),
            errors: Vec::new(),
            raw: None,
        }
    }

    /// Create a line record from a window line
    pub fn line(line: Line) -> Self {
        Self {
            line: line.number,
            text: Some(line.text),
            ..Self::empty(Kind::Line)
        }
    }

    /// Create a byte-window record
    pub fn bytes(data: Vec<u8>) -> Self {
        Self {
            text: Some(String::from_utf8_lossy(&data).into_owned()),
            meta: Meta {
                size: Some(data.len() as u64),
                ..Default::default()
            },
            raw: Some(data),
            ..Self::empty(Kind::Bytes)
        }
    }

    /// Create a match record
    pub fn match_line(line: Option<u64>, rendered: impl Into<String>, matches: usize) -> Self {
        Self {
            line,
            text: Some(rendered.into()),
            matches: Some(matches),
            ..Self::empty(Kind::Match)
        }
    }

    /// Create a file record
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty(Kind::File)
        }
    }

    /// Create an error record
    pub fn error(error: RecordError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_spans(mut self, spans: Vec<Span>) -> Self {
        self.spans = spans;
        self
    }
}

/// Ordered collection of records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub items: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: Record) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Record>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_display() {
        assert_eq!(Line::plain("hello").to_string(), "hello");
        assert_eq!(Line::numbered(7, "hello").to_string(), "7: hello");
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(3, 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(Span::new(2, 2).is_empty());
    }

    #[test]
    fn test_line_record_serialization() {
        let record = Record::line(Line::numbered(3, "abc"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["line"], 3);
        assert_eq!(json["text"], "abc");
        assert!(json.get("path").is_none());
        assert!(json.get("spans").is_none());
    }

    #[test]
    fn test_bytes_record_keeps_raw_out_of_json() {
        let record = Record::bytes(vec![b'h', b'i', 0xFF]);
        assert_eq!(record.meta.size, Some(3));
        assert_eq!(record.raw.as_deref(), Some(&[b'h', b'i', 0xFF][..]));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "bytes");
        assert!(json.get("raw").is_none());
        assert!(json["text"].as_str().unwrap().starts_with("hi"));
    }

    #[test]
    fn test_match_record_with_spans() {
        let record = Record::match_line(Some(2), "x", 1).with_spans(vec![Span::new(0, 1)]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "match");
        assert_eq!(json["matches"], 1);
        assert_eq!(json["spans"][0]["start"], 0);
        assert_eq!(json["spans"][0]["end"], 1);
    }

    #[test]
    fn test_record_set_collect() {
        let set: RecordSet = vec![Record::file("a"), Record::file("b")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
