//! Task record extraction for both planning-document dialects.
//!
//! Extraction is a pure function of the document text: the same bytes
//! always produce the same records in the same order. Blocks that cannot
//! yield a title are skipped and reported as [`ExtractWarning`]s.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use super::record::{Dialect, PhaseKey, Priority, SizeBucket, TaskId, TaskRecord, TaskType};
use super::tokenizer::{split_phases, Line, LineKind, PhaseSection};

/// Estimate used by headed tasks without an `**Estimated**` field.
pub const HEADING_DEFAULT_ESTIMATE: &str = "1 day";
/// Estimate used by checkbox tasks when the phase states none.
pub const CHECKBOX_DEFAULT_ESTIMATE: &str = "2-4 hours";
/// Raw dependency / blocks text when the field is absent.
pub const NONE_TEXT: &str = "None";

/// A recoverable problem found while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractWarning {
    /// 1-based line the problem was found on.
    pub line: usize,
    /// What was wrong and what was done about it.
    pub message: String,
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Records and warnings from one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records in order of first appearance.
    pub records: Vec<TaskRecord>,
    /// Skipped blocks and defaulted fields.
    pub warnings: Vec<ExtractWarning>,
    /// Heading title of each phase seen, empty when the heading had none.
    pub phase_titles: BTreeMap<PhaseKey, String>,
}

impl Extraction {
    fn warn(&mut self, line: usize, message: String) {
        tracing::debug!(line, "{message}");
        self.warnings.push(ExtractWarning { line, message });
    }
}

/// Mints sequential ids for one extraction pass, starting at `TASK-001`.
#[derive(Debug)]
struct IdMinter {
    next: u32,
}

impl IdMinter {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn mint(&mut self) -> TaskId {
        let id = TaskId::new(self.next);
        self.next += 1;
        id
    }
}

/// The lines making up one task: the line that opened it and what follows.
#[derive(Debug, Clone, Copy)]
pub struct TaskBlock<'s, 'a> {
    /// Task heading or checkbox line.
    pub head: &'s Line<'a>,
    /// Lines up to the next task heading or the end of the phase.
    pub body: &'s [Line<'a>],
}

/// Lazily yields the task blocks of one phase section.
pub struct Blocks<'s, 'a> {
    lines: &'s [Line<'a>],
    pos: usize,
    dialect: Dialect,
}

impl<'s, 'a> Iterator for Blocks<'s, 'a> {
    type Item = TaskBlock<'s, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let opens = |line: &Line<'_>, dialect: Dialect| match dialect {
            Dialect::Heading => matches!(line.kind, LineKind::TaskHeading { .. }),
            Dialect::Checkbox => matches!(line.kind, LineKind::Checkbox { checked: false, .. }),
        };

        let start = self.pos + self.lines[self.pos..].iter().position(|l| opens(l, self.dialect))?;
        let end = match self.dialect {
            Dialect::Heading => self.lines[start + 1..]
                .iter()
                .position(|l| opens(l, self.dialect))
                .map_or(self.lines.len(), |p| start + 1 + p),
            Dialect::Checkbox => start + 1,
        };
        self.pos = end;
        Some(TaskBlock { head: &self.lines[start], body: &self.lines[start + 1..end] })
    }
}

/// Task blocks of `section` in document order.
#[must_use]
pub fn blocks<'s, 'a>(section: &'s PhaseSection<'a>, dialect: Dialect) -> Blocks<'s, 'a> {
    Blocks { lines: &section.lines, pos: 0, dialect }
}

/// Extracts every task record from `text`.
#[must_use]
pub fn extract(text: &str, dialect: Dialect) -> Extraction {
    let mut out = Extraction::default();
    let mut minter = IdMinter::new();
    let mut seen = HashSet::new();

    for section in split_phases(text) {
        let title = out.phase_titles.entry(section.key.clone()).or_default();
        if title.is_empty() {
            title.clone_from(&section.title);
        }
        let phase_estimate = find_estimate(&section.text())
            .unwrap_or_else(|| CHECKBOX_DEFAULT_ESTIMATE.to_string());

        for block in blocks(&section, dialect) {
            let record = match dialect {
                Dialect::Checkbox => {
                    checkbox_record(block, &section.key, &phase_estimate, &mut minter, &mut out)
                }
                Dialect::Heading => heading_record(block, &section.key, &mut out),
            };
            let Some(record) = record else { continue };
            if !seen.insert(record.id) {
                out.warn(block.head.number, format!("duplicate id {}; block skipped", record.id));
                continue;
            }
            out.records.push(record);
        }
    }
    out
}

fn checkbox_record(
    block: TaskBlock<'_, '_>,
    phase: &PhaseKey,
    estimate: &str,
    minter: &mut IdMinter,
    out: &mut Extraction,
) -> Option<TaskRecord> {
    let LineKind::Checkbox { text, .. } = block.head.kind else { return None };
    if text.is_empty() {
        out.warn(block.head.number, "checkbox item has no description; skipped".to_string());
        return None;
    }
    Some(TaskRecord {
        id: minter.mint(),
        title: text.to_string(),
        phase: phase.clone(),
        priority: phase_priority(phase),
        estimate: estimate.to_string(),
        size: SizeBucket::from_estimate(estimate),
        task_type: TaskType::for_checkbox(text),
        description: String::new(),
        dependencies: NONE_TEXT.to_string(),
        blocks: NONE_TEXT.to_string(),
        success_criteria: Vec::new(),
        files: BTreeSet::new(),
    })
}

/// Priority of a checkbox task: phase 0 is P0, phases 1 and 2 are P1.
fn phase_priority(phase: &PhaseKey) -> Priority {
    match phase.number() {
        Some(0) => Priority::P0,
        Some(1 | 2) => Priority::P1,
        _ => Priority::P2,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Collecting {
    Nothing,
    Criteria,
    Files,
}

fn heading_record(
    block: TaskBlock<'_, '_>,
    phase: &PhaseKey,
    out: &mut Extraction,
) -> Option<TaskRecord> {
    let LineKind::TaskHeading { id, title, .. } = block.head.kind else { return None };
    if title.is_empty() {
        out.warn(block.head.number, format!("{id} heading has no title; skipped"));
        return None;
    }

    let mut priority: Option<(usize, &str)> = None;
    let mut estimate = None;
    let mut dependencies = None;
    let mut blocks = None;
    let mut description = None;
    let mut success_criteria = Vec::new();
    let mut files = BTreeSet::new();
    let mut collecting = Collecting::Nothing;

    for line in block.body {
        match line.kind {
            LineKind::Field { label, value } => {
                collecting = Collecting::Nothing;
                let value = (!value.is_empty()).then_some(value);
                match label.to_ascii_lowercase().as_str() {
                    "priority" => {
                        priority = priority.or(value.map(|v| (line.number, v)));
                    }
                    "estimated" | "estimate" => estimate = estimate.or(value),
                    "dependencies" | "depends on" => dependencies = dependencies.or(value),
                    "blocks" => blocks = blocks.or(value),
                    "description" => description = description.or(value),
                    "success criteria" => collecting = Collecting::Criteria,
                    "files to modify" | "files" => collecting = Collecting::Files,
                    _ => {}
                }
            }
            LineKind::Checkbox { text, .. } if collecting == Collecting::Criteria => {
                if !text.is_empty() {
                    success_criteria.push(text.to_string());
                }
            }
            LineKind::ListItem(text) | LineKind::Checkbox { text, .. }
                if collecting == Collecting::Files =>
            {
                if let Some(path) = backticked(text) {
                    files.insert(path.to_string());
                }
            }
            LineKind::Heading { .. } => collecting = Collecting::Nothing,
            _ => {}
        }
    }

    let priority = match priority {
        None => Priority::P2,
        Some((number, raw)) => Priority::parse(raw).unwrap_or_else(|| {
            out.warn(number, format!("{id}: unrecognized priority {raw:?}; using P2"));
            Priority::P2
        }),
    };
    let estimate = estimate.unwrap_or(HEADING_DEFAULT_ESTIMATE);

    Some(TaskRecord {
        id,
        title: title.to_string(),
        phase: phase.clone(),
        priority,
        estimate: estimate.to_string(),
        size: SizeBucket::from_estimate(estimate),
        task_type: TaskType::for_heading(title),
        description: description.unwrap_or_default().to_string(),
        dependencies: dependencies.unwrap_or(NONE_TEXT).to_string(),
        blocks: blocks.unwrap_or(NONE_TEXT).to_string(),
        success_criteria,
        files,
    })
}

/// First `` `...` `` span in `text`.
fn backticked(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once('`')?;
    let (inner, _) = rest.split_once('`')?;
    (!inner.is_empty()).then_some(inner)
}

/// First parenthetical duration such as `(1 day)` or `(3-4 days)`, without
/// the parentheses.
fn find_estimate(text: &str) -> Option<String> {
    text.split('(').skip(1).find_map(|chunk| {
        let inner = chunk.split_once(')')?.0.trim();
        let unit_start = inner.find(|c: char| !(c.is_ascii_digit() || c == '-'))?;
        let (amount, unit) = inner.split_at(unit_start);
        let amount_ok = amount.starts_with(|c: char| c.is_ascii_digit());
        let unit_ok = matches!(unit.trim(), "day" | "days" | "hour" | "hours");
        (amount_ok && unit_ok).then(|| inner.to_string())
    })
}
