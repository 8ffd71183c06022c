//! Renderer module
//!
//! Renders a RecordSet to text, jsonl or json

use colored::{ColoredString, Colorize};
use std::io::{self, Write};

use crate::core::model::{Kind, Record, RecordSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Colour file paths by type in text output
    pub color: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Renderer for record sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a record set to a string (byte windows are decoded lossily)
    pub fn render(&self, set: &RecordSet) -> String {
        let mut out = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.render_to(set, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, set: &RecordSet, mut writer: W) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => self.render_text(set, &mut writer),
            OutputFormat::Jsonl => self.render_jsonl(set, &mut writer),
            OutputFormat::Json => self.render_json(set, &mut writer),
        }?;
        writer.flush()
    }

    fn render_text<W: Write>(&self, set: &RecordSet, writer: &mut W) -> io::Result<()> {
        for item in &set.items {
            match item.kind {
                Kind::Bytes => {
                    if let Some(raw) = &item.raw {
                        writer.write_all(raw)?;
                    } else if let Some(text) = &item.text {
                        writer.write_all(text.as_bytes())?;
                    }
                }
                Kind::Line | Kind::Match => {
                    let text = item.text.as_deref().unwrap_or("");
                    match item.line {
                        Some(n) => writeln!(writer, "{}: {}", n, text)?,
                        None => writeln!(writer, "{}", text)?,
                    }
                }
                Kind::File => {
                    let path = item.path.as_deref().unwrap_or("");
                    let size = item
                        .meta
                        .size_human
                        .clone()
                        .or_else(|| item.meta.size.map(|s| s.to_string()))
                        .unwrap_or_default();
                    if self.config.color {
                        writeln!(writer, "{} {}", self.paint_path(item, path), size)?;
                    } else {
                        writeln!(writer, "{} {}", path, size)?;
                    }
                }
                Kind::Error => {
                    for error in &item.errors {
                        match &item.path {
                            Some(path) => writeln!(writer, "{}: {}", path, error.message)?,
                            None => writeln!(writer, "{}: {}", error.code, error.message)?,
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn paint_path(&self, item: &Record, path: &str) -> ColoredString {
        match item.meta.file_type.as_deref() {
            Some("dir") => path.blue().bold(),
            Some("symlink") => path.magenta().bold(),
            Some("socket") => path.cyan().bold(),
            Some("fifo") => path.yellow().bold(),
            _ => path.white().bold(),
        }
    }

    /// One JSON object per line
    fn render_jsonl<W: Write>(&self, set: &RecordSet, writer: &mut W) -> io::Result<()> {
        let separator = if self.config.pretty { "\n\n" } else { "\n" };
        let lines = set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>();
        if lines.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", lines.join(separator))
    }

    /// A single JSON array
    fn render_json<W: Write>(&self, set: &RecordSet, writer: &mut W) -> io::Result<()> {
        let body = if self.config.pretty {
            serde_json::to_string_pretty(&set.items)
        } else {
            serde_json::to_string(&set.items)
        }
        .unwrap_or_else(|_| "[]".to_string());
        writeln!(writer, "{}", body)
    }
}
