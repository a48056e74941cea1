//! Line classifier for task notes

use regex::Regex;
use std::sync::LazyLock;

use super::model::LineKind;

const FENCE_OPEN_PREFIX: &str = "```button";
pub(crate) const FENCE_CLOSE: &str = "```";

// - [ ] **Task   /   - [x] **Task
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[([ x])\] \*\*").expect("valid header regex"));

// Exactly four spaces of indentation; "     - [x]" does not match.
static STEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^    - \[([ x])\]").expect("valid step regex"));

/// Classify one line of a task note.
///
/// Pure and content-based: whether the line is inside a button block is
/// tracked by the caller, which only honours `FenceClose` while one is open.
pub fn classify(line: &str) -> LineKind {
    if line.starts_with(FENCE_OPEN_PREFIX) {
        return LineKind::FenceOpen;
    }
    if line == FENCE_CLOSE {
        return LineKind::FenceClose;
    }

    if let Some(caps) = HEADER_RE.captures(line) {
        return LineKind::Header {
            checked: &caps[1] == "x",
        };
    }

    if let Some(caps) = STEP_RE.captures(line) {
        return LineKind::Step {
            checked: &caps[1] == "x",
        };
    }

    LineKind::Plain
}
