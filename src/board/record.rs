//! Task record types produced by extraction.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tokenizer::{classify, LineKind};

/// Stable task identifier, displayed as `TASK-###`.
///
/// Ordered by number. Parsing is case-insensitive and ignores zero padding,
/// so `task-7` and `TASK-007` are the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u32);

impl TaskId {
    /// Creates an id from its number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The numeric part of the id.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Parses a whole string such as `TASK-012` (surrounding whitespace ignored).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match Self::scan(text).as_slice() {
            [(0, end, id)] if *end == text.len() => Some(*id),
            _ => None,
        }
    }

    /// Every `TASK-<digits>` reference in `text`, in order of appearance.
    #[must_use]
    pub fn find_all(text: &str) -> Vec<Self> {
        Self::scan(text).into_iter().map(|(_, _, id)| id).collect()
    }

    /// Lowercase form used for substring matching against free text.
    #[must_use]
    pub fn search_key(self) -> String {
        self.to_string().to_ascii_lowercase()
    }

    /// `(start, end, id)` for each reference; byte offsets into `text`.
    fn scan(text: &str) -> Vec<(usize, usize, Self)> {
        const PREFIX: &[u8] = b"task-";
        let lower = text.to_ascii_lowercase();
        let bytes = lower.as_bytes();
        let mut found = Vec::new();
        let mut i = 0;
        while i + PREFIX.len() <= bytes.len() {
            if !bytes[i..].starts_with(PREFIX) {
                i += 1;
                continue;
            }
            let digits_start = i + PREFIX.len();
            let digits_end = bytes[digits_start..]
                .iter()
                .position(|b| !b.is_ascii_digit())
                .map_or(bytes.len(), |p| digits_start + p);
            if digits_end > digits_start {
                if let Ok(number) = lower[digits_start..digits_end].parse::<u32>() {
                    found.push((i, digits_end, Self(number)));
                }
                i = digits_end;
            } else {
                i = digits_start;
            }
        }
        found
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TASK-{:03}", self.0)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for TaskId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid task id {value:?}, expected TASK-<n>"))
    }
}

/// Phase grouping key.
///
/// Numeric keys sort by value and come before named keys, which sort
/// lexicographically. This keeps the order total for mixed documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhaseKey {
    /// `Phase 3`.
    Numeric(u64),
    /// `Phase Beta`.
    Named(String),
}

impl PhaseKey {
    /// Parses the token that follows `Phase` in a heading.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        token.parse::<u64>().map_or_else(|_| Self::Named(token.to_string()), Self::Numeric)
    }

    /// Numeric value, if the key is numeric.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Named(_) => None,
        }
    }
}

impl Default for PhaseKey {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

impl fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<String> for PhaseKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PhaseKey> for String {
    fn from(key: PhaseKey) -> Self {
        key.to_string()
    }
}

/// Task priority `P0`, `P1`, `P2`, ... (lower number = more urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Priority(u8);

impl Priority {
    /// Critical.
    pub const P0: Self = Self(0);
    /// High.
    pub const P1: Self = Self(1);
    /// Normal.
    pub const P2: Self = Self(2);

    /// Sort rank; lower sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0
    }

    /// Parses the leading `P<n>` of a field value, e.g. `"P0 (Critical - Legal)"`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix(['P', 'p'])?;
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        let tail = &rest[digits.len()..];
        if tail.chars().next().is_some_and(char::is_alphanumeric) {
            return None;
        }
        digits.parse().ok().map(Self)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.to_string()
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid priority {value:?}, expected P<n>"))
    }
}

/// Coarse size derived from a free-text estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// Measured in hours.
    Small,
    /// One to two days.
    Medium,
    /// Anything longer or unrecognized.
    Large,
}

impl SizeBucket {
    /// Buckets an estimate: hours are small, up to two days is medium,
    /// everything else is large.
    #[must_use]
    pub fn from_estimate(estimate: &str) -> Self {
        let lower = estimate.to_lowercase();
        if lower.contains("hour") {
            return Self::Small;
        }
        if lower.contains("day") {
            let largest = lower
                .split(|c: char| !c.is_ascii_digit())
                .filter_map(|run| run.parse::<u32>().ok())
                .max();
            if matches!(largest, Some(1..=2)) {
                return Self::Medium;
            }
        }
        Self::Large
    }

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Kind of work, classified by keywords in the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Writing or fixing tests.
    Testing,
    /// Fixing or updating existing behavior.
    BugFix,
    /// Documentation and guides.
    Documentation,
    /// Benchmarks and performance work.
    Performance,
    /// Release and packaging work.
    Infrastructure,
    /// Anything else.
    Feature,
}

impl TaskType {
    /// Classification used for checkbox items.
    #[must_use]
    pub fn for_checkbox(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("test") {
            Self::Testing
        } else if lower.contains("fix") || lower.contains("update") {
            Self::BugFix
        } else if lower.contains("document") {
            Self::Documentation
        } else {
            Self::Feature
        }
    }

    /// Classification used for headed task titles.
    #[must_use]
    pub fn for_heading(title: &str) -> Self {
        let lower = title.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if has(&["test"]) {
            Self::Testing
        } else if has(&["fix", "bug"]) {
            Self::BugFix
        } else if has(&["document", "guide"]) {
            Self::Documentation
        } else if has(&["benchmark", "performance"]) {
            Self::Performance
        } else if has(&["release", "package"]) {
            Self::Infrastructure
        } else {
            Self::Feature
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Testing => "Testing",
            Self::BugFix => "Bug Fix",
            Self::Documentation => "Documentation",
            Self::Performance => "Performance",
            Self::Infrastructure => "Infrastructure",
            Self::Feature => "Feature",
        }
    }
}

/// Planning-document dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `### TASK-<n>: <title>` subsections with `**Label**: value` fields.
    Heading,
    /// One task per unchecked `- [ ]` item.
    Checkbox,
}

impl Dialect {
    /// Heading dialect if any line is a task heading, checkbox dialect otherwise.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let headed = text
            .lines()
            .any(|line| matches!(classify(line), LineKind::TaskHeading { .. }));
        if headed {
            Self::Heading
        } else {
            Self::Checkbox
        }
    }
}

/// One unit of work extracted from a planning document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique within one parse.
    pub id: TaskId,
    /// Non-empty summary.
    pub title: String,
    /// Phase the task was found in.
    pub phase: PhaseKey,
    /// Priority, explicit or defaulted.
    pub priority: Priority,
    /// Raw estimate text.
    pub estimate: String,
    /// Estimate normalized to a bucket.
    pub size: SizeBucket,
    /// Keyword classification of the title.
    pub task_type: TaskType,
    /// Free-text description; empty when absent.
    pub description: String,
    /// Raw dependency text; `"None"` when absent.
    pub dependencies: String,
    /// Raw "blocks" text; `"None"` when absent.
    pub blocks: String,
    /// Success criteria in document order.
    pub success_criteria: Vec<String>,
    /// Files the task touches.
    pub files: BTreeSet<String>,
}
