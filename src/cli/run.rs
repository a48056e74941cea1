//! `sweep run` command implementation

use anyhow::{Context as _, Result};
use clap::Args;
use similar::TextDiff;

use super::{plural, Context};
use crate::sweep::{self, Plan, SweepReport};

const DIFF_CONTEXT_LINES: usize = 3;

#[derive(Args)]
pub struct RunArgs {
    /// Show what would change without writing
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    let report = if args.dry_run {
        let plan = sweep::plan(&ctx.vault, &ctx.config).context("Sweep did not complete")?;
        if !args.json {
            print_plan_diff(&plan);
        }
        plan.report(true)
    } else {
        sweep::sweep(&ctx.vault, &ctx.config).context("Sweep did not complete")?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary(&report));
    }

    Ok(())
}

pub fn summary(report: &SweepReport) -> String {
    if report.migrated == 0 {
        return format!(
            "No completed tasks in {} ({} open)",
            report.task_note,
            plural(report.retained, "task")
        );
    }

    let verb = if report.dry_run { "Would move" } else { "✓ Moved" };
    format!(
        "{} {} from {} to {} ({} left)",
        verb,
        plural(report.migrated, "task"),
        report.task_note,
        report.new_note,
        report.retained
    )
}

fn print_plan_diff(plan: &Plan) {
    print_diff(
        plan.task_note.path(),
        &plan.task_note_before,
        &plan.migration.updated_task_note,
    );
    print_diff(
        plan.new_note.path(),
        &plan.new_note_before,
        &plan.migration.new_note,
    );
}

fn print_diff(path: &str, old: &str, new: &str) {
    if old == new {
        return;
    }
    let diff = TextDiff::from_lines(old, new);
    print!(
        "{}",
        diff.unified_diff()
            .context_radius(DIFF_CONTEXT_LINES)
            .header(&format!("a/{}", path), &format!("b/{}", path))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(migrated: usize, retained: usize, dry_run: bool) -> SweepReport {
        SweepReport {
            task_note: "Tasks.md".to_string(),
            new_note: "Done.md".to_string(),
            migrated,
            retained,
            task_note_changed: migrated > 0,
            new_note_changed: migrated > 0,
            dry_run,
        }
    }

    #[test]
    fn test_summary_nothing_moved() {
        assert_eq!(
            summary(&report(0, 2, false)),
            "No completed tasks in Tasks.md (2 tasks open)"
        );
    }

    #[test]
    fn test_summary_moved() {
        assert_eq!(
            summary(&report(1, 0, false)),
            "✓ Moved 1 task from Tasks.md to Done.md (0 left)"
        );
    }

    #[test]
    fn test_summary_dry_run() {
        assert_eq!(
            summary(&report(3, 1, true)),
            "Would move 3 tasks from Tasks.md to Done.md (1 left)"
        );
    }
}
