//! Pattern search and match highlighting
//!
//! - matcher: compile a pattern and compute match spans for a line
//! - highlight: render spans with markers, single-line highlight requests
//! - scan: search a whole stream with match/line limits

pub mod highlight;
pub mod matcher;
pub mod scan;

pub use highlight::{highlight_line, highlight_match, render_spans, MatchRequest, MatchResult, Markers};
pub use matcher::{MatchMode, Matcher};
pub use scan::{search_stream, MatchedLine, SearchOptions, SearchOutcome};
