//! Match span computation
//!
//! Literal and regex patterns both end up as a list of non-overlapping
//! byte spans. The two paths differ:
//! - case-sensitive literal search checks plain containment, then collects
//!   every literal occurrence
//! - case-insensitive search pre-checks containment on lowercased text but
//!   takes its spans from `(?i)` + the pattern read as a regular expression

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::PatternError;
use crate::core::model::Span;

/// How the pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The pattern text as-is; highlighted the same way as `Substring`
    #[default]
    Exact,
    /// Any literal occurrence of the pattern
    Substring,
    /// The pattern is a regular expression
    Regex,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "substring" | "substr" => Ok(MatchMode::Substring),
            "regex" | "re" => Ok(MatchMode::Regex),
            _ => Err(format!("Unknown match mode: {}", s)),
        }
    }
}

/// A compiled pattern ready to be applied to many lines
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    folded_pattern: String,
    mode: MatchMode,
    case_insensitive: bool,
    regex: Regex,
}

impl Matcher {
    /// Compile `pattern`.
    ///
    /// Fails when the pattern is an invalid regular expression, which can
    /// happen in `Regex` mode and in any case-insensitive mode.
    pub fn new(pattern: &str, mode: MatchMode, case_insensitive: bool) -> Result<Self, PatternError> {
        let source = if case_insensitive {
            format!("(?i){}", pattern)
        } else if mode == MatchMode::Regex {
            pattern.to_string()
        } else {
            regex::escape(pattern)
        };

        let regex = Regex::new(&source).map_err(|e| PatternError::new(pattern, e))?;

        Ok(Self {
            pattern: pattern.to_string(),
            folded_pattern: pattern.to_lowercase(),
            mode,
            case_insensitive,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// All non-overlapping match spans in `line`, in ascending order.
    pub fn find_spans(&self, line: &str) -> Vec<Span> {
        let candidate = match (self.case_insensitive, self.mode) {
            (_, MatchMode::Regex) => true,
            (true, _) => line.to_lowercase().contains(&self.folded_pattern),
            (false, _) => line.contains(&self.pattern),
        };

        if !candidate {
            return Vec::new();
        }

        self.regex
            .find_iter(line)
            .map(|m| Span::new(m.start(), m.end()))
            .collect()
    }

    pub fn is_match(&self, line: &str) -> bool {
        !self.find_spans(line).is_empty()
    }
}
