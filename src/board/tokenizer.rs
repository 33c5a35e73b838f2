//! Line classification and phase splitting.
//!
//! Each line is classified once into a [`LineKind`]; phase sections are then
//! cut from the classified stream. Nothing here fails: unrecognized lines
//! are plain text and a document without phase headings is one default phase.

use super::record::{PhaseKey, TaskId};

/// What a single line of a planning document is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only.
    Blank,
    /// `## Phase <key>: <title>`.
    PhaseHeading {
        /// Number of `#`.
        level: usize,
        /// Parsed phase key.
        key: PhaseKey,
        /// Text after the colon, possibly empty.
        title: &'a str,
    },
    /// `### TASK-<n>: <title>` (level 3 or deeper).
    TaskHeading {
        /// Number of `#`.
        level: usize,
        /// Explicit id from the heading.
        id: TaskId,
        /// Text after the colon, possibly empty.
        title: &'a str,
    },
    /// Any other markdown heading.
    Heading {
        /// Number of `#`.
        level: usize,
        /// Heading text.
        text: &'a str,
    },
    /// `- [ ] text` or `- [x] text`.
    Checkbox {
        /// Whether the box is ticked.
        checked: bool,
        /// Item text.
        text: &'a str,
    },
    /// `**Label**: value` or `**Label:** value`.
    Field {
        /// Label without the markup.
        label: &'a str,
        /// Value, possibly empty.
        value: &'a str,
    },
    /// `- text` or `* text`.
    ListItem(&'a str),
    /// Anything else.
    Text(&'a str),
}

/// A classified line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the document.
    pub number: usize,
    /// The raw line.
    pub text: &'a str,
    /// Classification.
    pub kind: LineKind<'a>,
}

/// The lines owned by one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSection<'a> {
    /// Phase key; `0` for the implicit leading phase.
    pub key: PhaseKey,
    /// Heading text after `Phase <key>:`.
    pub title: String,
    /// Lines between the heading and the end of the phase.
    pub lines: Vec<Line<'a>>,
}

impl PhaseSection<'_> {
    /// Heading title followed by every owned line, newline-joined.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        for line in &self.lines {
            text.push('\n');
            text.push_str(line.text);
        }
        text
    }
}

/// Classifies one line.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some((level, text)) = heading(trimmed) {
        return classify_heading(level, text);
    }
    if let Some(kind) = checkbox(trimmed) {
        return kind;
    }
    if let Some(kind) = field(trimmed) {
        return kind;
    }
    if let Some(text) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        return LineKind::ListItem(text.trim());
    }
    LineKind::Text(trimmed)
}

fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.starts_with(char::is_whitespace).then(|| (level, rest.trim()))
}

fn classify_heading(level: usize, text: &str) -> LineKind<'_> {
    if let Some((key, title)) = phase_heading(text) {
        return LineKind::PhaseHeading { level, key, title };
    }
    if level >= 3 {
        let (head, title) = text.split_once(':').unwrap_or((text, ""));
        if let Some(id) = TaskId::parse(head) {
            return LineKind::TaskHeading { level, id, title: title.trim() };
        }
    }
    LineKind::Heading { level, text }
}

fn phase_heading(text: &str) -> Option<(PhaseKey, &str)> {
    let prefix = text.get(..5)?;
    if !prefix.eq_ignore_ascii_case("phase") {
        return None;
    }
    let rest = &text[5..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (token, title) = rest.split_once(':').unwrap_or((rest, ""));
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some((PhaseKey::parse(token), title.trim()))
}

fn checkbox(trimmed: &str) -> Option<LineKind<'_>> {
    let rest = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* "))?;
    let (checked, text) = if let Some(text) = rest.strip_prefix("[ ]") {
        (false, text)
    } else if let Some(text) = rest.strip_prefix("[x]").or_else(|| rest.strip_prefix("[X]")) {
        (true, text)
    } else {
        return None;
    };
    if !text.is_empty() && !text.starts_with(char::is_whitespace) {
        return None;
    }
    Some(LineKind::Checkbox { checked, text: text.trim() })
}

fn field(trimmed: &str) -> Option<LineKind<'_>> {
    let rest = trimmed.strip_prefix("**")?;
    let (inner, after) = rest.split_once("**")?;
    let (label, value) = if let Some(label) = inner.strip_suffix(':') {
        (label, after)
    } else {
        (inner, after.strip_prefix(':')?)
    };
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(LineKind::Field { label, value: value.trim() })
}

/// Splits a document into phase sections in document order.
///
/// A phase runs until the next phase heading or the next non-task heading
/// of the same or higher level. Lines before the first phase heading form an
/// implicit phase `0`, emitted only when it holds non-blank content. Lines
/// after a phase is closed by an unrelated heading stay under the closed
/// phase's key in an untitled section, so malformed phase headings never
/// lose tasks.
#[must_use]
pub fn split_phases(text: &str) -> Vec<PhaseSection<'_>> {
    let mut sections = Vec::new();
    let mut current =
        Some(PhaseSection { key: PhaseKey::default(), title: String::new(), lines: Vec::new() });
    let mut current_level: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = Line { number: index + 1, text: raw, kind: classify(raw) };
        match &line.kind {
            LineKind::PhaseHeading { level, key, title } => {
                flush(&mut sections, current.take(), current_level);
                current = Some(PhaseSection {
                    key: key.clone(),
                    title: (*title).to_string(),
                    lines: Vec::new(),
                });
                current_level = Some(*level);
            }
            LineKind::Heading { level, .. }
                if current_level.is_some_and(|phase_level| *level <= phase_level) =>
            {
                let key = current.as_ref().map(|s| s.key.clone()).unwrap_or_default();
                tracing::debug!(line = line.number, phase = %key, "phase closed by heading");
                flush(&mut sections, current.take(), current_level);
                current = Some(PhaseSection { key, title: String::new(), lines: vec![line] });
                current_level = None;
            }
            _ => {
                if let Some(section) = current.as_mut() {
                    section.lines.push(line);
                }
            }
        }
    }
    flush(&mut sections, current, current_level);
    sections
}

fn flush<'a>(
    sections: &mut Vec<PhaseSection<'a>>,
    section: Option<PhaseSection<'a>>,
    level: Option<usize>,
) {
    let Some(section) = section else { return };
    let implicit = level.is_none();
    if implicit && section.lines.iter().all(|l| l.kind == LineKind::Blank) {
        return;
    }
    sections.push(section);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_headings() {
        assert_eq!(
            classify("### Phase 0: Critical Fixes (1 day)"),
            LineKind::PhaseHeading {
                level: 3,
                key: PhaseKey::Numeric(0),
                title: "Critical Fixes (1 day)"
            }
        );
        assert_eq!(
            classify("## phase Beta"),
            LineKind::PhaseHeading { level: 2, key: PhaseKey::Named("Beta".into()), title: "" }
        );
        assert_eq!(
            classify("### TASK-012: Add cache tests"),
            LineKind::TaskHeading { level: 3, id: TaskId::new(12), title: "Add cache tests" }
        );
        assert_eq!(
            classify("### TASK-5"),
            LineKind::TaskHeading { level: 3, id: TaskId::new(5), title: "" }
        );
        assert_eq!(
            classify("## TASK-5: too shallow"),
            LineKind::Heading { level: 2, text: "TASK-5: too shallow" }
        );
        assert_eq!(
            classify("## Phase out legacy code"),
            LineKind::Heading { level: 2, text: "Phase out legacy code" }
        );
        assert_eq!(classify("#hashtag"), LineKind::Text("#hashtag"));
    }

    #[test]
    fn classifies_items_and_fields() {
        assert_eq!(
            classify("- [ ] Write tests"),
            LineKind::Checkbox { checked: false, text: "Write tests" }
        );
        assert_eq!(classify("  * [x] Done"), LineKind::Checkbox { checked: true, text: "Done" });
        assert_eq!(classify("- [ ]"), LineKind::Checkbox { checked: false, text: "" });
        assert_eq!(
            classify("**Priority**: P0"),
            LineKind::Field { label: "Priority", value: "P0" }
        );
        assert_eq!(
            classify("**Estimated:** 2 days"),
            LineKind::Field { label: "Estimated", value: "2 days" }
        );
        assert_eq!(
            classify("**Success Criteria**:"),
            LineKind::Field { label: "Success Criteria", value: "" }
        );
        assert_eq!(classify("**bold** statement"), LineKind::Text("**bold** statement"));
        assert_eq!(classify("- `src/lib.rs`"), LineKind::ListItem("`src/lib.rs`"));
        assert_eq!(classify("   "), LineKind::Blank);
    }

    #[test]
    fn splits_phases_at_same_level_headings() {
        let doc = "\
# Plan
intro
### Phase 0: Fixes (1 day)
- [ ] a
#### Details
- [ ] b
### Phase 1: Core
- [ ] c
## Appendix
- [ ] not in a phase
";
        let sections = split_phases(doc);
        let keys: Vec<String> = sections.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["0", "0", "1", "1"]);

        assert_eq!(sections[0].title, "");
        assert_eq!(sections[1].title, "Fixes (1 day)");
        assert_eq!(sections[1].lines.len(), 3);
        assert_eq!(sections[2].lines.len(), 1);
        assert_eq!(sections[2].lines[0].number, 8);

        let trailing = &sections[3];
        assert_eq!(trailing.title, "");
        assert_eq!(trailing.lines[0].number, 9);
        assert!(trailing.text().contains("not in a phase"));
    }

    #[test]
    fn malformed_phase_heading_keeps_following_lines() {
        let doc = "\
## Phase 0: Critical
### TASK-001: A
## Phase 1 - Core
### TASK-002: B
## Notes
### TASK-003: C
";
        let sections = split_phases(doc);
        let keys: Vec<String> = sections.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["0", "0"]);
        assert_eq!(sections[1].title, "");

        let numbers: Vec<usize> = sections[1].lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6]);
    }

    #[test]
    fn task_headings_never_close_a_phase() {
        let doc = "### Phase 1: Core\n### TASK-001: One\n**Priority**: P1\n### TASK-002: Two\n";
        let sections = split_phases(doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines.len(), 3);
    }

    #[test]
    fn document_without_phases_is_one_default_phase() {
        let sections = split_phases("- [ ] only task\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, PhaseKey::default());

        assert!(split_phases("").is_empty());
        assert!(split_phases("\n\n").is_empty());
    }

    #[test]
    fn section_text_includes_heading_title() {
        let sections = split_phases("## Phase 2: Cache (3-4 days)\nbody\n");
        assert_eq!(sections[0].text(), "Cache (3-4 days)\nbody");
    }
}
