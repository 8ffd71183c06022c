//! Rendering match spans into a line
//!
//! Spans are computed first and rendered second, so the same spans can be
//! turned into terminal escapes, HTML tags or left as structured data.

use serde::{Deserialize, Serialize};

use crate::core::error::PatternError;
use crate::core::model::Span;
use crate::search::matcher::{MatchMode, Matcher};

/// Bold red foreground.
pub const ANSI_MATCH: &str = "\u{1b}[31;1m";
/// Reset all attributes.
pub const ANSI_RESET: &str = "\u{1b}[0m";

/// Text inserted before and after every match span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Terminal colour escapes
    pub fn ansi() -> Self {
        Self::new(ANSI_MATCH, ANSI_RESET)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Insert markers around each span of `line`.
///
/// Spans must be sorted, non-overlapping and on char boundaries. They are
/// spliced from the highest offset down so earlier offsets stay valid.
pub fn render_spans(line: &str, spans: &[Span], markers: &Markers) -> String {
    let extra = spans.len() * (markers.start.len() + markers.end.len());
    let mut out = String::with_capacity(line.len() + extra);
    out.push_str(line);

    for span in spans.iter().rev() {
        out.insert_str(span.end, &markers.end);
        out.insert_str(span.start, &markers.start);
    }
    out
}

/// A single-line highlight request
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub line: &'a str,
    pub pattern: &'a str,
    pub mode: MatchMode,
    pub case_insensitive: bool,
    pub colorize: bool,
}

/// Outcome of highlighting one line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The line with markers inserted (unchanged when not colourised);
    /// empty when nothing matched
    pub rendered_line: String,
    /// Number of non-overlapping match spans
    pub match_count: usize,
    /// The spans, as offsets into the original line
    pub spans: Vec<Span>,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.match_count > 0
    }
}

/// Highlight one line with an already compiled matcher.
pub fn highlight_line(matcher: &Matcher, line: &str, colorize: bool, markers: &Markers) -> MatchResult {
    let spans = matcher.find_spans(line);
    if spans.is_empty() {
        return MatchResult::no_match();
    }

    let rendered_line = if colorize {
        render_spans(line, &spans, markers)
    } else {
        line.to_string()
    };

    MatchResult {
        rendered_line,
        match_count: spans.len(),
        spans,
    }
}

/// Compile the request's pattern and highlight its line with ANSI markers.
pub fn highlight_match(request: &MatchRequest<'_>) -> Result<MatchResult, PatternError> {
    let matcher = Matcher::new(request.pattern, request.mode, request.case_insensitive)?;
    Ok(highlight_line(
        &matcher,
        request.line,
        request.colorize,
        &Markers::ansi(),
    ))
}
