//! note-sweep library - Moves completed checklist tasks out of a task note
//!
//! A task is a top-level `- [ ] **Title` line plus its four-space-indented
//! sub-steps. Tasks whose sub-steps are all checked are appended, fully
//! ticked, to a second note.

pub mod cli;
pub mod config;
pub mod sweep;
pub mod task;
pub mod vault;
pub mod watch;
