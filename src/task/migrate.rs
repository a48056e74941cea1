//! Task migration engine
//!
//! Drives a single forward pass over a task note, accumulating task blocks
//! and deciding per block whether it moves to the new note or stays.

use tracing::debug;

use super::model::{LineKind, TaskBlock};
use super::parser::{classify, FENCE_CLOSE};

/// Result of migrating one task note into a new note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Everything that was not migrated, in original order, trimmed
    pub updated_task_note: String,
    /// The new note's original lines followed by each migrated block, trimmed
    pub new_note: String,
    /// Text of each migrated block after the `[ ]` -> `[x]` rewrite
    pub migrated: Vec<String>,
    /// Number of task blocks left in the task note
    pub retained: usize,
}

impl Migration {
    pub fn moved_anything(&self) -> bool {
        !self.migrated.is_empty()
    }
}

/// Cursor state of the pass
#[derive(Debug)]
enum ParseState {
    /// No task block open
    Scanning,
    /// A task block is being accumulated
    InTask(TaskBlock),
    /// Inside a button block. A task block open at the fence is suspended and
    /// resumes once the fence closes.
    InButtonBlock { suspended: Option<TaskBlock> },
}

impl ParseState {
    fn into_block(self) -> Option<TaskBlock> {
        match self {
            ParseState::Scanning => None,
            ParseState::InTask(block) => Some(block),
            ParseState::InButtonBlock { suspended } => suspended,
        }
    }
}

struct Migrator {
    state: ParseState,
    updated_task_note: String,
    new_note_lines: Vec<String>,
    original_new_note_len: usize,
    retained: usize,
}

impl Migrator {
    fn new(new_note: &str) -> Self {
        let new_note_lines: Vec<String> = new_note.split('\n').map(str::to_string).collect();
        let original_new_note_len = new_note_lines.len();
        Self {
            state: ParseState::Scanning,
            updated_task_note: String::new(),
            new_note_lines,
            original_new_note_len,
            retained: 0,
        }
    }

    fn pass_through(&mut self, line: &str) {
        self.updated_task_note.push_str(line);
        self.updated_task_note.push('\n');
    }

    fn feed(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, ParseState::Scanning);

        self.state = match state {
            ParseState::InButtonBlock { suspended } => {
                self.pass_through(line);
                if line == FENCE_CLOSE {
                    suspended.map_or(ParseState::Scanning, ParseState::InTask)
                } else {
                    ParseState::InButtonBlock { suspended }
                }
            }
            state => match classify(line) {
                LineKind::FenceOpen => {
                    self.pass_through(line);
                    ParseState::InButtonBlock {
                        suspended: state.into_block(),
                    }
                }
                LineKind::Header { .. } => {
                    if let Some(block) = state.into_block() {
                        self.flush(block);
                    }
                    ParseState::InTask(TaskBlock::start(line))
                }
                LineKind::Step { checked } => {
                    let mut block = state.into_block().unwrap_or_else(TaskBlock::headerless);
                    block.push_step(line, checked);
                    ParseState::InTask(block)
                }
                // A bare fence outside a button block is ordinary text
                LineKind::FenceClose | LineKind::Plain => match state {
                    ParseState::InTask(mut block) => {
                        block.push_line(line);
                        ParseState::InTask(block)
                    }
                    _ => {
                        self.pass_through(line);
                        ParseState::Scanning
                    }
                },
            },
        };
    }

    fn flush(&mut self, block: TaskBlock) {
        // Steps with no header are not a task and never leave the task note
        if !block.has_header() {
            debug!(steps = block.step_count(), "Keeping steps without a task header");
            self.updated_task_note.push_str(block.text());
        } else if block.is_complete() {
            debug!(task = block.title(), steps = block.step_count(), "Migrating task");
            self.new_note_lines.push(block.into_completed_text());
        } else {
            debug!(task = block.title(), steps = block.step_count(), "Keeping task");
            self.retained += 1;
            self.updated_task_note.push_str(block.text());
        }
    }

    fn finish(mut self) -> Migration {
        let state = std::mem::replace(&mut self.state, ParseState::Scanning);
        if let Some(block) = state.into_block() {
            self.flush(block);
        }

        let migrated = self.new_note_lines[self.original_new_note_len..].to_vec();
        Migration {
            updated_task_note: self.updated_task_note.trim().to_string(),
            new_note: self.new_note_lines.join("\n").trim().to_string(),
            migrated,
            retained: self.retained,
        }
    }
}

/// Move every fully completed task block from `task_note` to the end of
/// `new_note`.
///
/// A block is complete when none of its four-space sub-steps is unchecked; the
/// header's own checkbox is ignored. Migrated blocks have every `[ ]` rewritten
/// to `[x]`. Button blocks are copied to the task note untouched.
pub fn migrate(task_note: &str, new_note: &str) -> Migration {
    let mut migrator = Migrator::new(new_note);
    for line in task_note.split('\n') {
        migrator.feed(line);
    }
    migrator.finish()
}
