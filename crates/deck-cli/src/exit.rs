//! Process exit codes.

use deck_model::ReorderReport;

pub const EXIT_SUCCESS: i32 = 0;
/// Any error, including rejected input and aborted reorders.
pub const EXIT_FAILURE: i32 = 1;
/// The deck was saved but at least one slide was skipped.
pub const EXIT_INCOMPLETE: i32 = 2;

pub fn reorder_exit_code(report: &ReorderReport) -> i32 {
    if report.is_complete() {
        EXIT_SUCCESS
    } else {
        EXIT_INCOMPLETE
    }
}

/// Prints a failed command's error chain and maps the outcome to an exit code.
pub fn exit_code(outcome: anyhow::Result<i32>) -> i32 {
    outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        EXIT_FAILURE
    })
}
