//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use scribe_domain::Phase;

/// Callback for progress updates during a research run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain lines, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts. `total_tasks` is the number of units of
    /// work in the phase (queries for `Aggregate`, 1 otherwise).
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when one unit of work inside a phase finishes
    fn on_task_complete(&self, _phase: &Phase, _label: &str, _success: bool) {}

    /// Called when a phase completes. `summary` is a short human-readable
    /// outcome such as "3 queries".
    fn on_phase_complete(&self, phase: &Phase, summary: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _phase: &Phase, _summary: &str) {}
}
