//! Backward reading from the end of a stream
//!
//! Lines are found by scanning fixed-size chunks from the last byte toward
//! the first, so only the requested lines (plus one chunk) are resident.

use memchr::{memchr_iter, memrchr};

use crate::core::error::ReadResult;
use crate::core::model::Line;
use crate::core::util::decode_lossy;
use crate::window::source::{read_exact_at, BackwardSource};

/// Bytes fetched per backward read.
pub const TAIL_CHUNK_SIZE: usize = 8 * 1024;

/// Read the last `line_count` lines of a stream of `size` bytes.
///
/// Empty lines are skipped and a trailing `\r` is dropped. With
/// `with_line_numbers`, line `i` of the result is numbered
/// `total_lines - result_len + i + 1`, where `total_lines` comes from an
/// extra forward pass over the whole stream.
pub fn read_tail<S: BackwardSource + ?Sized>(
    source: &mut S,
    size: u64,
    line_count: u64,
    with_line_numbers: bool,
) -> ReadResult<Vec<Line>> {
    read_tail_chunked(source, size, line_count, with_line_numbers, TAIL_CHUNK_SIZE)
}

/// [`read_tail`] with an explicit chunk size.
pub fn read_tail_chunked<S: BackwardSource + ?Sized>(
    source: &mut S,
    size: u64,
    line_count: u64,
    with_line_numbers: bool,
    chunk_size: usize,
) -> ReadResult<Vec<Line>> {
    let texts = scan_backward(source, size, line_count, chunk_size.max(1))?;

    if !with_line_numbers {
        return Ok(texts.into_iter().map(Line::plain).collect());
    }

    let total = count_lines(source, size, chunk_size.max(1))?;
    let first = total.saturating_sub(texts.len() as u64);
    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Line::numbered(first + i as u64 + 1, text))
        .collect())
}

fn scan_backward<S: BackwardSource + ?Sized>(
    source: &mut S,
    size: u64,
    line_count: u64,
    chunk_size: usize,
) -> ReadResult<Vec<String>> {
    // newest line first; reversed before returning
    let mut lines: Vec<String> = Vec::new();
    if line_count == 0 || size == 0 {
        return Ok(lines);
    }

    // bytes of the line being assembled, in reverse order
    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    let mut pos = size;

    'scan: while pos > 0 {
        let start = pos.saturating_sub(chunk_size as u64);
        let data = &mut chunk[..(pos - start) as usize];
        read_exact_at(source, start, data)?;

        let mut end = data.len();
        while let Some(nl) = memrchr(b'\n', &data[..end]) {
            pending.extend(data[nl + 1..end].iter().rev());
            flush_line(&mut pending, &mut lines);
            if lines.len() as u64 == line_count {
                break 'scan;
            }
            end = nl;
        }
        pending.extend(data[..end].iter().rev());
        pos = start;
    }

    if pos == 0 && (lines.len() as u64) < line_count {
        flush_line(&mut pending, &mut lines);
    }

    lines.reverse();
    Ok(lines)
}

fn flush_line(pending: &mut Vec<u8>, lines: &mut Vec<String>) {
    pending.reverse();
    if pending.last() == Some(&b'\r') {
        pending.pop();
    }
    if !pending.is_empty() {
        lines.push(decode_lossy(pending));
    }
    pending.clear();
}

/// Count lines the way a forward line scanner would: every `\n`
/// terminates a line, and trailing bytes without one form a last line.
pub fn count_lines<S: BackwardSource + ?Sized>(
    source: &mut S,
    size: u64,
    chunk_size: usize,
) -> ReadResult<u64> {
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut count = 0u64;
    let mut pos = 0u64;
    let mut last = None;

    while pos < size {
        let want = chunk.len().min((size - pos) as usize);
        let data = &mut chunk[..want];
        read_exact_at(source, pos, data)?;
        count += memchr_iter(b'\n', data).count() as u64;
        last = data.last().copied();
        pos += want as u64;
    }

    if matches!(last, Some(b) if b != b'\n') {
        count += 1;
    }
    Ok(count)
}

/// Offset a byte-tail read starts from.
///
/// Asking for at least the whole stream wraps around to offset 0.
pub fn tail_offset(size: u64, byte_count: u64) -> u64 {
    if byte_count >= size {
        0
    } else {
        size - byte_count
    }
}

/// Read the last `byte_count` bytes of a stream of `size` bytes.
pub fn read_tail_bytes<S: BackwardSource + ?Sized>(
    source: &mut S,
    size: u64,
    byte_count: u64,
) -> ReadResult<Vec<u8>> {
    if byte_count == 0 {
        return Ok(Vec::new());
    }

    let offset = tail_offset(size, byte_count);
    let len = byte_count.min(size - offset) as usize;
    let mut buf = vec![0u8; len];
    let n = source.read_at(offset, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tail(data: &str, n: u64) -> Vec<String> {
        let mut cursor = Cursor::new(data.as_bytes().to_vec());
        read_tail(&mut cursor, data.len() as u64, n, false)
            .unwrap()
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn test_tail_last_lines_in_order() {
        assert_eq!(tail("a\nb\nc\nd\n", 2), vec!["c", "d"]);
        assert_eq!(tail("a\nb\nc\nd", 2), vec!["c", "d"]);
    }

    #[test]
    fn test_tail_more_than_available() {
        assert_eq!(tail("a\nb\n", 10), vec!["a", "b"]);
        assert_eq!(tail("only", 3), vec!["only"]);
    }

    #[test]
    fn test_tail_empty_and_zero() {
        assert!(tail("", 10).is_empty());
        assert!(tail("a\nb\n", 0).is_empty());
    }

    #[test]
    fn test_tail_skips_empty_lines() {
        assert_eq!(tail("a\n\n\nb\n\n", 2), vec!["a", "b"]);
        assert_eq!(tail("\n\n\n", 5), Vec::<String>::new());
    }

    #[test]
    fn test_tail_strips_carriage_return() {
        assert_eq!(tail("a\r\nb\r\n", 5), vec!["a", "b"]);
    }

    #[test]
    fn test_tail_leading_newline() {
        assert_eq!(tail("\nfirst\nsecond", 5), vec!["first", "second"]);
    }

    #[test]
    fn test_tail_chunk_size_does_not_change_result() {
        let data = "alpha\nbeta\n\ngamma delta\nepsilon\nzeta eta theta\n";
        let all = ["alpha", "beta", "gamma delta", "epsilon", "zeta eta theta"];
        for chunk_size in [1, 2, 3, 5, 7, 64, TAIL_CHUNK_SIZE] {
            for n in 0..8usize {
                let mut cursor = Cursor::new(data.as_bytes().to_vec());
                let got: Vec<String> =
                    read_tail_chunked(&mut cursor, data.len() as u64, n as u64, false, chunk_size)
                        .unwrap()
                        .into_iter()
                        .map(|l| l.text)
                        .collect();
                let expected = &all[all.len().saturating_sub(n)..];
                assert_eq!(got, expected, "chunk size {}, n {}", chunk_size, n);
            }
        }
    }

    #[test]
    fn test_tail_multibyte_split_across_chunks() {
        let data = "héllo\nwörld\n";
        let mut cursor = Cursor::new(data.as_bytes().to_vec());
        let lines = read_tail_chunked(&mut cursor, data.len() as u64, 2, false, 1).unwrap();
        assert_eq!(lines[0].text, "héllo");
        assert_eq!(lines[1].text, "wörld");
    }

    #[test]
    fn test_tail_numbered() {
        let data = "one\ntwo\nthree\nfour\n";
        let mut cursor = Cursor::new(data.as_bytes().to_vec());
        let lines = read_tail(&mut cursor, data.len() as u64, 2, true).unwrap();
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["3: three", "4: four"]);
    }

    #[test]
    fn test_tail_numbered_without_trailing_newline() {
        let data = "one\ntwo\nthree";
        let mut cursor = Cursor::new(data.as_bytes().to_vec());
        let lines = read_tail(&mut cursor, data.len() as u64, 1, true).unwrap();
        assert_eq!(lines[0].number, Some(3));
    }

    #[test]
    fn test_count_lines() {
        let mut cursor = Cursor::new(b"a\nb\n\nc".to_vec());
        assert_eq!(count_lines(&mut cursor, 6, 2).unwrap(), 4);

        let mut cursor = Cursor::new(b"a\nb\n".to_vec());
        assert_eq!(count_lines(&mut cursor, 4, 1024).unwrap(), 2);

        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(count_lines(&mut cursor, 0, 1024).unwrap(), 0);
    }

    #[test]
    fn test_tail_declared_size_larger_than_stream() {
        let mut cursor = Cursor::new(b"abc".to_vec());
        assert!(read_tail(&mut cursor, 10, 1, false).is_err());
    }

    #[test]
    fn test_tail_offset() {
        assert_eq!(tail_offset(10, 3), 7);
        assert_eq!(tail_offset(10, 10), 0);
        assert_eq!(tail_offset(10, 25), 0);
        assert_eq!(tail_offset(0, 4), 0);
    }

    #[test]
    fn test_tail_bytes() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        assert_eq!(read_tail_bytes(&mut cursor, 10, 4).unwrap(), b"6789");
        assert!(read_tail_bytes(&mut cursor, 10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_tail_bytes_wraparound_reads_everything() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        assert_eq!(read_tail_bytes(&mut cursor, 10, 10).unwrap(), b"0123456789");
        assert_eq!(read_tail_bytes(&mut cursor, 10, 11).unwrap(), b"0123456789");
        assert_eq!(read_tail_bytes(&mut cursor, 10, u64::MAX).unwrap(), b"0123456789");
    }

    #[test]
    fn test_tail_bytes_empty_stream() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(read_tail_bytes(&mut cursor, 0, 5).unwrap().is_empty());
    }
}
