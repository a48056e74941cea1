//! Task note data model

/// Checkbox marker of an open checklist item
pub const UNCHECKED: &str = "[ ]";

/// Checkbox marker of a completed checklist item
pub const CHECKED: &str = "[x]";

/// Category of a single task note line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a button block: the line starts with "```button"
    FenceOpen,
    /// Closes an open button block: the line is exactly "```"
    FenceClose,
    /// Top-level task line with a bold label, e.g. `- [ ] **Write report`
    Header { checked: bool },
    /// Sub-step indented by exactly four spaces, e.g. `    - [x] outline`
    Step { checked: bool },
    /// Anything else
    Plain,
}

/// A task block being accumulated: a header line plus every step and plain
/// line that follows it, up to the next header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBlock {
    text: String,
    all_steps_checked: bool,
    has_header: bool,
    steps: usize,
}

impl TaskBlock {
    /// Start a block from its header line
    pub fn start(header: &str) -> Self {
        let mut block = Self {
            text: String::new(),
            all_steps_checked: true,
            has_header: true,
            steps: 0,
        };
        block.push_line(header);
        block
    }

    /// Start a block for steps that appear before any header
    pub fn headerless() -> Self {
        Self {
            text: String::new(),
            all_steps_checked: true,
            has_header: false,
            steps: 0,
        }
    }

    /// Append a plain line
    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Append a sub-step line, tracking its completion
    pub fn push_step(&mut self, line: &str, checked: bool) {
        if !checked {
            self.all_steps_checked = false;
        }
        self.steps += 1;
        self.push_line(line);
    }

    /// True when every step seen so far is checked (vacuously true with no steps)
    pub fn is_complete(&self) -> bool {
        self.all_steps_checked
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// First line of the block, without its line break
    pub fn title(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }

    /// Buffered text, one line break after every line
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the block, rewriting every `[ ]` in its text to `[x]`.
    ///
    /// The rewrite is a plain substring replace over the whole buffer, so a
    /// literal `[ ]` inside prose lines is rewritten too.
    pub fn into_completed_text(self) -> String {
        self.text.replace(UNCHECKED, CHECKED)
    }
}
