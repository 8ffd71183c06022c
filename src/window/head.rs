//! Forward reading from the start of a stream

use std::io::{BufRead, Read};

use crate::core::error::ReadResult;
use crate::core::model::Line;
use crate::core::util::{decode_lossy, trim_line_ending};

/// Streaming iterator over the first `limit` lines of a reader.
///
/// Lines are yielded as they are read, so output produced before an I/O
/// error is never lost. After an error the iterator is exhausted.
pub struct HeadLines<R> {
    reader: R,
    limit: u64,
    emitted: u64,
    numbered: bool,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> HeadLines<R> {
    pub fn new(reader: R, limit: u64, numbered: bool) -> Self {
        Self {
            reader,
            limit,
            emitted: 0,
            numbered,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for HeadLines<R> {
    type Item = ReadResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.emitted >= self.limit {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                trim_line_ending(&mut self.buf);
                self.emitted += 1;
                let text = decode_lossy(&self.buf);
                Some(Ok(if self.numbered {
                    Line::numbered(self.emitted, text)
                } else {
                    Line::plain(text)
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Read the first `line_count` lines, optionally numbered from 1.
///
/// Fewer lines are returned when the stream is shorter; that is not an error.
pub fn read_head<R: BufRead>(
    reader: R,
    line_count: u64,
    with_line_numbers: bool,
) -> ReadResult<Vec<Line>> {
    HeadLines::new(reader, line_count, with_line_numbers).collect()
}

/// Read up to `byte_count` bytes from the current position.
///
/// Hitting end-of-stream early returns whatever was read.
pub fn read_head_bytes<R: Read>(reader: R, byte_count: u64) -> ReadResult<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(byte_count).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReadError;
    use std::io::{self, BufReader, Cursor};

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_read_head_prefix() {
        let data = "a\nb\nc\nd\n";
        let lines = read_head(Cursor::new(data), 2, false).unwrap();
        assert_eq!(texts(&lines), vec!["a", "b"]);
        assert!(lines.iter().all(|l| l.number.is_none()));
    }

    #[test]
    fn test_read_head_more_than_available() {
        let lines = read_head(Cursor::new("a\nb"), 10, false).unwrap();
        assert_eq!(texts(&lines), vec!["a", "b"]);
    }

    #[test]
    fn test_read_head_every_prefix_length() {
        let source: Vec<String> = (1..=7).map(|i| format!("line {}", i)).collect();
        let data = source.join("\n");
        for n in 0..=source.len() {
            let lines = read_head(Cursor::new(&data), n as u64, false).unwrap();
            assert_eq!(texts(&lines), source[..n].iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_read_head_numbered() {
        let lines = read_head(Cursor::new("x\ny\nz\n"), 3, true).unwrap();
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["1: x", "2: y", "3: z"]);
    }

    #[test]
    fn test_read_head_keeps_empty_lines_and_strips_crlf() {
        let lines = read_head(Cursor::new("a\r\n\r\nb\n"), 10, false).unwrap();
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn test_read_head_empty_stream() {
        let lines = read_head(Cursor::new(""), 10, true).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_head_zero_lines() {
        let lines = read_head(Cursor::new("a\nb\n"), 0, false).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_head_invalid_utf8_is_lossy() {
        let lines = read_head(Cursor::new(vec![0x61, 0xFF, b'\n']), 1, false).unwrap();
        assert_eq!(lines[0].text, "a\u{FFFD}");
    }

    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "disk on fire")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_head_lines_yields_partial_output_before_error() {
        let reader = BufReader::with_capacity(
            4,
            FailAfter {
                data: Cursor::new(b"one\ntwo\nthr".to_vec()),
            },
        );
        let results: Vec<_> = HeadLines::new(reader, 10, false).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().text, "one");
        assert_eq!(results[1].as_ref().unwrap().text, "two");
        assert!(matches!(results[2], Err(ReadError::Io(_))));
    }

    #[test]
    fn test_read_head_propagates_error() {
        let reader = BufReader::new(FailAfter {
            data: Cursor::new(Vec::new()),
        });
        assert!(read_head(reader, 5, false).is_err());
    }

    #[test]
    fn test_read_head_bytes() {
        assert_eq!(read_head_bytes(Cursor::new("abcdef"), 3).unwrap(), b"abc");
        assert_eq!(read_head_bytes(Cursor::new("ab"), 10).unwrap(), b"ab");
        assert!(read_head_bytes(Cursor::new("ab"), 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_head_bytes_from_current_position() {
        let mut cursor = Cursor::new("abcdef");
        cursor.set_position(2);
        assert_eq!(read_head_bytes(&mut cursor, 2).unwrap(), b"cd");
    }
}
