//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use linewise::commands::grep::GrepArgs;
use linewise::commands::humanize::Quantity;
use linewise::core::render::{OutputFormat, RenderConfig};
use linewise::search::MatchMode;

/// linewise - head/tail windows, highlighted search and humanized sizes.
#[derive(Parser, Debug)]
#[command(name = "linewise")]
#[command(
    author,
    version,
    about,
    long_about = r#"linewise bundles small text-stream utilities behind one binary.

Output formats:
- text: plain lines, like head/tail/grep (default)
- jsonl: one JSON object per line
- json: a single JSON array

Examples:
    linewise read notes.txt --lines 5
    linewise read app.log --tail -n
    linewise grep -i error app.log
    linewise stat -H Cargo.toml src
    linewise humanize duration 3600000000001
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_parser = ["text", "jsonl", "json"],
        value_name = "FORMAT"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        long_help = "Disable colored output: no match highlighting in grep and no file type\n\
colors in stat. Also enabled by a non-empty NO_COLOR environment variable."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. LINEWISE_LOG overrides the filter\n\
with a tracing directive such as `linewise=trace`."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the first or last lines (or bytes) of a file.
    #[command(long_about = "Print a window of FILE measured from its start, or from its end with\n\
--tail. --lines takes precedence over --bytes; with neither, 10 lines are printed.\n\n\
Examples:\n\
  linewise read README.md\n\
  linewise read app.log --tail --lines 20 --line-numbers\n\
  linewise read image.png --bytes 16\n")]
    Read {
        /// File to read.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Start reading from the end of the file.
        #[arg(short = 't', long)]
        tail: bool,

        /// Number of lines to read.
        #[arg(short = 'l', long, default_value_t = 0, value_name = "N")]
        lines: u64,

        /// Number of bytes to read.
        #[arg(
            short = 'b',
            long,
            default_value_t = 0,
            value_name = "N",
            long_help = "Number of bytes to read. With --tail, asking for at least the whole\n\
file prints the whole file."
        )]
        bytes: u64,

        /// Show the number at the beginning of each line.
        #[arg(short = 'n', long)]
        line_numbers: bool,
    },

    /// Search a file (or stdin) and highlight every match.
    #[command(long_about = r#"Print the lines of FILE (or standard input) that contain PATTERN,
with every match highlighted. Exits with status 1 when nothing matched.

By default PATTERN is matched literally. With --ignore-case it is read as a
regular expression once the line is known to contain it.

Examples:
    linewise grep user users.txt
    linewise grep -i -n user users.txt
    linewise grep --regex '\d{3}' users.txt
    cat app.log | linewise grep -m 5 ERROR
"#)]
    Grep {
        /// Pattern to search for.
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// File to search (defaults to stdin).
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Perform case insensitive matching.
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Match PATTERN as a regular expression.
        #[arg(short = 'r', long, conflicts_with = "substring")]
        regex: bool,

        /// Match PATTERN as a substring.
        #[arg(short = 's', long)]
        substring: bool,

        /// Stop reading after N matches.
        #[arg(short = 'm', long, default_value_t = 0, value_name = "N")]
        max_count: usize,

        /// Stop reading after N matching lines.
        #[arg(short = 'l', long, default_value_t = 0, value_name = "N")]
        max_lines: usize,

        /// Prefix each line with its 1-based line number.
        #[arg(short = 'n', long)]
        line_number: bool,
    },

    /// Show the type and size of files.
    #[command(long_about = "Print each PATH colored by its type (directory, symlink, socket,\n\
FIFO, device or regular file) followed by its size. Symlinks are not followed\n\
and directories are not descended into.\n\n\
Examples:\n\
  linewise stat Cargo.toml\n\
  linewise stat -H target/release/linewise\n")]
    Stat {
        /// Paths to describe.
        #[arg(value_name = "PATH", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// Print human readable sizes.
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Format raw numbers as human readable sizes or durations.
    Humanize {
        #[command(subcommand)]
        action: HumanizeCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HumanizeCommands {
    /// Format byte counts (e.g. 1536 -> 2K).
    Size {
        #[arg(value_name = "BYTES", required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Format nanosecond durations (e.g. 450000000 -> 450ms).
    Duration {
        #[arg(value_name = "NANOS", required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let colorize = !cli.no_color;
    if !colorize {
        colored::control::set_override(false);
    }
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(colorize);

    match cli.command {
        Commands::Read {
            path,
            tail,
            lines,
            bytes,
            line_numbers,
        } => {
            linewise::commands::read::run_read(&path, tail, lines, bytes, line_numbers, render_config)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Grep {
            pattern,
            path,
            ignore_case,
            regex,
            substring,
            max_count,
            max_lines,
            line_number,
        } => {
            let mode = if regex {
                MatchMode::Regex
            } else if substring {
                MatchMode::Substring
            } else {
                MatchMode::Exact
            };
            let args = GrepArgs {
                pattern,
                path,
                mode,
                case_insensitive: ignore_case,
                max_count,
                max_lines,
                line_numbers: line_number,
            };
            // escape codes only make sense in text output
            let highlight = colorize && format == OutputFormat::Text;
            let matched = linewise::commands::grep::run_grep(&args, highlight, render_config)?;
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Stat { paths, human } => {
            let all_ok = linewise::commands::stat::run_stat(&paths, human, render_config)?;
            Ok(if all_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Humanize { action } => {
            let (quantity, values) = match action {
                HumanizeCommands::Size { values } => (Quantity::Size, values),
                HumanizeCommands::Duration { values } => (Quantity::Duration, values),
            };
            linewise::commands::humanize::run_humanize(quantity, &values, render_config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
