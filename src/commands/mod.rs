//! Commands module - CLI shells over the core operations
//!
//! Provides:
//! - read: head/tail windows of a file
//! - grep: highlighted pattern search over a file or stdin
//! - stat: file type and (humanized) size of given paths
//! - humanize: size/duration formatting of raw numbers
//!
//! This is the only layer that opens files, logs or prints.

pub mod grep;
pub mod humanize;
pub mod read;
pub mod stat;

use anyhow::{Context, Result};
use std::io::{self, BufWriter};

use crate::core::model::{Kind, RecordSet};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// Split a record set into what goes to stdout and what goes to stderr.
///
/// Text output sends error records to stderr; structured formats keep
/// every record on stdout so consumers see failures in the same stream.
pub fn split_for_output(set: &RecordSet, format: OutputFormat) -> (RecordSet, RecordSet) {
    if format != OutputFormat::Text {
        return (set.clone(), RecordSet::new());
    }

    let (errors, records): (Vec<_>, Vec<_>) = set
        .items
        .iter()
        .cloned()
        .partition(|item| item.kind == Kind::Error);
    (RecordSet { items: records }, RecordSet { items: errors })
}

/// Render a record set to stdout, and text-mode errors to stderr
pub fn emit(set: &RecordSet, config: RenderConfig) -> Result<()> {
    let (records, errors) = split_for_output(set, config.format);
    let renderer = Renderer::with_config(config);

    if !records.is_empty() || config.format != OutputFormat::Text {
        let stdout = io::stdout();
        renderer
            .render_to(&records, BufWriter::new(stdout.lock()))
            .context("Failed to write output")?;
    }

    if !errors.is_empty() {
        let stderr = io::stderr();
        renderer
            .render_to(&errors, stderr.lock())
            .context("Failed to write errors")?;
    }

    Ok(())
}
