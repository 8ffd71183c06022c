//! Humanize command - format raw byte counts and durations

use anyhow::Result;

use crate::commands::emit;
use crate::core::humanize::{format_duration, format_size};
use crate::core::model::{Line, Record, RecordSet};
use crate::core::render::RenderConfig;

/// What a raw number stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// A byte count
    Size,
    /// A duration in nanoseconds
    Duration,
}

pub fn humanize(quantity: Quantity, value: i64) -> String {
    match quantity {
        Quantity::Size => format_size(value),
        Quantity::Duration => format_duration(value),
    }
}

/// Run the humanize command
pub fn run_humanize(quantity: Quantity, values: &[i64], config: RenderConfig) -> Result<()> {
    let set: RecordSet = values
        .iter()
        .map(|&v| Record::line(Line::plain(humanize(quantity, v))))
        .collect();
    emit(&set, config)
}
