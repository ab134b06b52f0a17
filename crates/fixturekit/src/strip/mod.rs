//! Removes a named parameter from widget declarations with a single regex pass.
//!
//! The edit is textual and not grammar-aware. Assignments the pattern cannot
//! delimit safely (values with unbalanced brackets or quotes, values that run
//! past the end of the line, last arguments without a trailing comma) are
//! left in place and reported instead of being half-removed.
//!
//! Reporting only counts mentions that start at a word boundary, so
//! `myvalue:` is not flagged for `value`. Mentions inside string literals or
//! comments are still flagged.

pub mod sources;

use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, info};
use regex::{Captures, Regex};

use crate::config::StripperConfig;
use crate::error::StripError;

pub use sources::{find_sources, source_pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityReason {
    /// The value up to the first comma has unbalanced brackets or an open quote.
    UnbalancedValue,
    /// The assignment is not terminated by a comma on the same line.
    NotTerminated,
}

impl std::fmt::Display for AmbiguityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmbiguityReason::UnbalancedValue => {
                write!(f, "value contains a nested comma or unbalanced delimiters")
            }
            AmbiguityReason::NotTerminated => {
                write!(f, "value is not terminated by a comma on the same line")
            }
        }
    }
}

/// An occurrence left untouched, with its 1-based line in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub line: usize,
    pub reason: AmbiguityReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    pub content: String,
    pub removed: usize,
    pub ambiguities: Vec<Ambiguity>,
}

impl StripOutcome {
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub modified: bool,
    pub removed: usize,
    pub ambiguities: Vec<Ambiguity>,
}

#[derive(Debug, Default)]
pub struct StripSummary {
    /// One entry per enumerated file, in enumeration order.
    pub entries: Vec<Result<FileOutcome, StripError>>,
}

impl StripSummary {
    pub fn fixed_count(&self) -> usize {
        self.outcomes().filter(|f| f.modified).count()
    }

    pub fn fixed_files(&self) -> impl Iterator<Item = &Path> {
        self.outcomes()
            .filter(|f| f.modified)
            .map(|f| f.path.as_path())
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &FileOutcome> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &StripError> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }
}

pub struct WidgetStripper {
    parameter: String,
    assignment: Regex,
    mention: Regex,
}

impl WidgetStripper {
    pub fn new(parameter: &str) -> Result<Self, StripError> {
        let name = regex::escape(parameter);
        let assignment = Regex::new(&format!(
            r"(?P<lead>\s*){}:\s*(?P<value>[^,\n]+),(?P<trail>\s*)",
            name
        ))?;
        let boundary = if parameter.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let mention = Regex::new(&format!(r"{}{}:", boundary, name))?;

        Ok(Self {
            parameter: parameter.to_string(),
            assignment,
            mention,
        })
    }

    pub fn from_config(config: &StripperConfig) -> Result<Self, StripError> {
        Self::new(&config.parameter)
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// One substitution pass over `content`.
    ///
    /// Each safe match, including the whitespace after it, is replaced by the
    /// whitespace that preceded it.
    pub fn strip_text(&self, content: &str) -> StripOutcome {
        let mut removed_spans: Vec<Range<usize>> = Vec::new();
        let mut unbalanced: Vec<usize> = Vec::new();

        let stripped = self.assignment.replace_all(content, |caps: &Captures<'_>| {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let lead = caps.name("lead").map(|m| m.as_str()).unwrap_or("");
            let value = caps.name("value").map(|m| m.as_str()).unwrap_or("");

            if is_balanced(value) {
                removed_spans.push(whole);
                lead.to_string()
            } else {
                unbalanced.push(whole.start + lead.len());
                caps[0].to_string()
            }
        });
        let stripped = stripped.into_owned();

        let ambiguities = self
            .mention
            .find_iter(content)
            .filter(|m| !removed_spans.iter().any(|span| span.contains(&m.start())))
            .map(|m| Ambiguity {
                line: line_of(content, m.start()),
                reason: if unbalanced.contains(&m.start()) {
                    AmbiguityReason::UnbalancedValue
                } else {
                    AmbiguityReason::NotTerminated
                },
            })
            .collect();

        StripOutcome {
            content: stripped,
            removed: removed_spans.len(),
            ambiguities,
        }
    }

    /// Strips one file, writing it back only when something was removed.
    pub fn strip_file(&self, path: &Path) -> Result<FileOutcome, StripError> {
        let _span = tracing::info_span!("strip.file", path = %path.display()).entered();

        let content = std::fs::read_to_string(path).map_err(|e| StripError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let outcome = self.strip_text(&content);

        if outcome.changed() {
            std::fs::write(path, &outcome.content).map_err(|e| StripError::WriteFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            info!("Removed {} occurrence(s) from {}", outcome.removed, path.display());
        }

        for ambiguity in &outcome.ambiguities {
            debug!(
                "{}:{}: left '{}:' in place ({})",
                path.display(),
                ambiguity.line,
                self.parameter,
                ambiguity.reason
            );
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            modified: outcome.changed(),
            removed: outcome.removed,
            ambiguities: outcome.ambiguities,
        })
    }

    /// Processes every matching file under `root`. A failure on one file is
    /// recorded and the run continues with the next.
    pub fn run(&self, root: &Path, config: &StripperConfig) -> Result<StripSummary, StripError> {
        self.run_with(root, config, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_entry` as soon as each file is
    /// done.
    pub fn run_with<F>(
        &self,
        root: &Path,
        config: &StripperConfig,
        mut on_entry: F,
    ) -> Result<StripSummary, StripError>
    where
        F: FnMut(&Result<FileOutcome, StripError>),
    {
        let mut summary = StripSummary::default();

        for entry in find_sources(root, &config.source_directory, &config.extension)? {
            let result = entry.and_then(|path| self.strip_file(&path));
            if let Err(e) = &result {
                debug!("Continuing after error: {}", e);
            }
            on_entry(&result);
            summary.entries.push(result);
        }

        Ok(summary)
    }
}

/// Brackets balance and no quote is left open. Brackets inside quotes are
/// ignored.
fn is_balanced(value: &str) -> bool {
    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in value.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }

    quote.is_none() && stack.is_empty()
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
