//! linewise - reusable text-stream utilities
//!
//! - [`window`]: bounded head/tail reads of a stream, in lines or bytes
//! - [`search`]: match spans, highlighting and whole-stream search
//! - [`crate::core::humanize`]: compact byte-size and duration strings
//!
//! The core never prints, logs or exits; the [`commands`] layer does.
//!
//! ```
//! use std::io::Cursor;
//! use linewise::window::{read_window, Anchor, ReadRequest, Window};
//!
//! let mut stream = Cursor::new("a\nb\nc\n");
//! let request = ReadRequest::from_counts(Anchor::Tail, 2, 0, true);
//! let Window::Lines(lines) = read_window(&mut stream, &request).unwrap() else {
//!     unreachable!()
//! };
//! let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
//! assert_eq!(rendered, ["2: b", "3: c"]);
//! ```

pub mod commands;
pub mod core;
pub mod search;
pub mod window;

pub use crate::core::error::{PatternError, ReadError};
pub use crate::core::humanize::{format_duration, format_size};
pub use crate::search::{highlight_match, MatchRequest, MatchResult};
pub use crate::window::{read_window, ReadRequest, Window};
