//! Searching a whole stream line by line

use std::io::BufRead;

use crate::core::error::ReadResult;
use crate::core::model::{Line, Span};
use crate::core::util::{decode_lossy, trim_line_ending};
use crate::search::highlight::{highlight_line, Markers};
use crate::search::matcher::Matcher;

/// Limits and presentation for a stream search
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Stop once this many match spans were found (0 = unlimited)
    pub max_count: usize,
    /// Stop once this many lines matched (0 = unlimited)
    pub max_lines: usize,
    pub line_numbers: bool,
    pub colorize: bool,
    pub markers: Markers,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_count: 0,
            max_lines: 0,
            line_numbers: false,
            colorize: true,
            markers: Markers::ansi(),
        }
    }
}

/// A line that matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// Rendered text, numbered when requested
    pub line: Line,
    /// 1-based position in the stream, always tracked
    pub line_number: u64,
    pub match_count: usize,
    pub spans: Vec<Span>,
}

/// Everything a stream search found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub lines: Vec<MatchedLine>,
    pub total_matches: usize,
    pub lines_scanned: u64,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Run `matcher` over every line of `reader` until a limit is hit.
pub fn search_stream<R: BufRead>(
    mut reader: R,
    matcher: &Matcher,
    options: &SearchOptions,
) -> ReadResult<SearchOutcome> {
    let mut outcome = SearchOutcome::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        trim_line_ending(&mut buf);
        outcome.lines_scanned += 1;

        let text = decode_lossy(&buf);
        let result = highlight_line(matcher, &text, options.colorize, &options.markers);
        if !result.is_match() {
            continue;
        }

        let number = outcome.lines_scanned;
        let line = if options.line_numbers {
            Line::numbered(number, result.rendered_line)
        } else {
            Line::plain(result.rendered_line)
        };

        outcome.total_matches += result.match_count;
        outcome.lines.push(MatchedLine {
            line,
            line_number: number,
            match_count: result.match_count,
            spans: result.spans,
        });

        let count_reached = options.max_count > 0 && outcome.total_matches >= options.max_count;
        let lines_reached = options.max_lines > 0 && outcome.lines.len() >= options.max_lines;
        if count_reached || lines_reached {
            break;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::MatchMode;
    use std::io::Cursor;

    fn plain(max_count: usize, max_lines: usize) -> SearchOptions {
        SearchOptions {
            max_count,
            max_lines,
            colorize: false,
            ..Default::default()
        }
    }

    fn matcher(pattern: &str, insensitive: bool) -> Matcher {
        Matcher::new(pattern, MatchMode::Exact, insensitive).unwrap()
    }

    const USERS: &str = "user\n123\nUser\n456\nUSER";

    #[test]
    fn test_case_sensitive_one_line() {
        let outcome = search_stream(Cursor::new(USERS), &matcher("user", false), &plain(0, 0)).unwrap();
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].line.text, "user");
        assert_eq!(outcome.lines[0].line_number, 1);
        assert_eq!(outcome.lines_scanned, 5);
    }

    #[test]
    fn test_case_insensitive_three_lines() {
        let outcome = search_stream(Cursor::new(USERS), &matcher("user", true), &plain(0, 0)).unwrap();
        let numbers: Vec<u64> = outcome.lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 3, 5]);
        assert_eq!(outcome.total_matches, 3);
    }

    #[test]
    fn test_max_lines() {
        let outcome = search_stream(Cursor::new(USERS), &matcher("user", true), &plain(0, 2)).unwrap();
        assert_eq!(outcome.lines.len(), 2);
        assert_eq!(outcome.lines_scanned, 3);
    }

    #[test]
    fn test_max_count_counts_spans_not_lines() {
        let data = "user\n123\nUser:superuser\n456\nUSER";
        let outcome = search_stream(Cursor::new(data), &matcher("user", true), &plain(3, 0)).unwrap();
        assert_eq!(outcome.lines.len(), 2);
        assert_eq!(outcome.total_matches, 3);
        assert_eq!(outcome.lines[1].match_count, 2);
    }

    #[test]
    fn test_line_numbers_and_color() {
        let options = SearchOptions {
            line_numbers: true,
            markers: Markers::new("[", "]"),
            ..Default::default()
        };
        let outcome = search_stream(Cursor::new("a\nb user\n"), &matcher("user", false), &options).unwrap();
        assert_eq!(outcome.lines[0].line.to_string(), "2: b [user]");
        assert_eq!(outcome.lines[0].spans, vec![Span::new(2, 6)]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let outcome = search_stream(Cursor::new(USERS), &matcher("nobody", true), &plain(0, 0)).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.total_matches, 0);
    }

    #[test]
    fn test_empty_stream() {
        let outcome = search_stream(Cursor::new(""), &matcher("x", false), &plain(0, 0)).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.lines_scanned, 0);
    }
}
