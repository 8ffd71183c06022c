//! Common utilities

use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::time::SystemTime;

/// Total length of a seekable stream; the position is restored to the start.
pub fn stream_len<S: Seek>(stream: &mut S) -> std::io::Result<u64> {
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(len)
}

/// Strip one trailing `\n` and then one trailing `\r`.
pub fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

/// Decode a line, replacing invalid UTF-8 sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Get file modification time in milliseconds since epoch
pub fn get_mtime_ms(metadata: &std::fs::Metadata) -> std::io::Result<i64> {
    let mtime = metadata.modified()?;
    let duration = mtime
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    Ok(duration.as_millis() as i64)
}

/// Normalize a path to use '/' as separator
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_stream_len_rewinds() {
        let mut cursor = Cursor::new(b"hello".to_vec());
        cursor.set_position(3);
        assert_eq!(stream_len(&mut cursor).unwrap(), 5);

        let mut s = String::new();
        cursor.read_to_string(&mut s).unwrap();
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_trim_line_ending() {
        let mut buf = b"abc\r\n".to_vec();
        trim_line_ending(&mut buf);
        assert_eq!(buf, b"abc");

        let mut buf = b"abc\n".to_vec();
        trim_line_ending(&mut buf);
        assert_eq!(buf, b"abc");

        let mut buf = b"abc".to_vec();
        trim_line_ending(&mut buf);
        assert_eq!(buf, b"abc");
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode_lossy(b"ok"), "ok");
        assert_eq!(decode_lossy(&[0x61, 0xFF]), "a\u{FFFD}");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("src/main.rs")), "src/main.rs");
    }
}
