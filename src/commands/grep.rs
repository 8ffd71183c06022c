//! Grep command - highlighted pattern search over a file or stdin

use anyhow::{Context, Result};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use crate::commands::emit;
use crate::commands::read::open_file;
use crate::core::humanize::format_std_duration;
use crate::core::model::{Record, RecordSet};
use crate::core::render::RenderConfig;
use crate::core::util::normalize_path;
use crate::search::{search_stream, MatchMode, Matcher, SearchOptions, SearchOutcome};

/// Options for a grep run
#[derive(Debug, Clone)]
pub struct GrepArgs {
    pub pattern: String,
    /// Read stdin when absent
    pub path: Option<PathBuf>,
    pub mode: MatchMode,
    pub case_insensitive: bool,
    pub max_count: usize,
    pub max_lines: usize,
    pub line_numbers: bool,
}

/// Search the configured input and map matching lines to records
pub fn grep(args: &GrepArgs, colorize: bool) -> Result<RecordSet> {
    let matcher = Matcher::new(&args.pattern, args.mode, args.case_insensitive)?;
    let options = SearchOptions {
        max_count: args.max_count,
        max_lines: args.max_lines,
        line_numbers: args.line_numbers,
        colorize,
        ..Default::default()
    };

    let started = Instant::now();
    let outcome = match &args.path {
        Some(path) => {
            let reader = BufReader::new(open_file(path)?);
            search(reader, &matcher, &options, Some(path))?
        }
        None => {
            let stdin = io::stdin();
            search(stdin.lock(), &matcher, &options, None)?
        }
    };

    debug!(
        matched_lines = outcome.lines.len(),
        matches = outcome.total_matches,
        scanned = outcome.lines_scanned,
        elapsed = %format_std_duration(started.elapsed()),
        "search finished"
    );

    let path = args.path.as_deref().map(normalize_path);
    Ok(outcome
        .lines
        .into_iter()
        .map(|m| {
            let record = Record::match_line(m.line.number, m.line.text, m.match_count)
                .with_spans(m.spans);
            match &path {
                Some(p) => record.with_path(p.clone()),
                None => record,
            }
        })
        .collect())
}

fn search<R: BufRead>(
    reader: R,
    matcher: &Matcher,
    options: &SearchOptions,
    path: Option<&Path>,
) -> Result<SearchOutcome> {
    search_stream(reader, matcher, options).with_context(|| match path {
        Some(p) => format!("failed to read file {}", p.display()),
        None => "failed to read standard input".to_string(),
    })
}

/// Run the grep command; returns whether any line matched
pub fn run_grep(args: &GrepArgs, colorize: bool, config: RenderConfig) -> Result<bool> {
    let set = grep(args, colorize)?;
    if set.is_empty() {
        return Ok(false);
    }
    emit(&set, config)?;
    Ok(true)
}
