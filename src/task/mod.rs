//! Task note processing
//!
//! This module moves finished checklist tasks out of a task note:
//! - Classify each line (button fence, task header, sub-step, plain text)
//! - Accumulate task blocks in a single pass
//! - Migrate blocks whose sub-steps are all checked

pub mod migrate;
pub mod model;
pub mod parser;

pub use migrate::{migrate, Migration};
pub use model::{LineKind, TaskBlock, CHECKED, UNCHECKED};
pub use parser::classify;
