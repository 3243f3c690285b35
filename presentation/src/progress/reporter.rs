//! Progress reporting for research runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use scribe_application::ports::progress::ProgressNotifier;
use scribe_domain::Phase;
use std::sync::Mutex;

/// Reports progress with one indicatif bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// `"Phase 2/4: Source Collection"`
    fn phase_label(phase: &Phase) -> String {
        match phase.step() {
            Some(step) => format!(
                "Phase {}/{}: {}",
                step,
                Phase::PIPELINE.len(),
                phase.display_name()
            ),
            None => phase.display_name().to_string(),
        }
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.phase_bar.lock().ok().and_then(|mut bar| bar.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_label(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase, summary: &str) {
        if *phase == Phase::Done {
            return;
        }
        if let Some(pb) = self.take_bar() {
            pb.set_position(pb.length().unwrap_or(0));
            let message = if summary.is_empty() {
                "complete!".green().to_string()
            } else {
                format!("{} ({})", "complete!".green(), summary)
            };
            pb.finish_with_message(message);
        }
    }
}

/// Plain line-based progress (no fancy UI)
///
/// Writes to stderr so stdout stays clean for the result.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} {})",
            "->".cyan(),
            ProgressReporter::phase_label(phase).bold(),
            total_tasks,
            if total_tasks == 1 { "task" } else { "tasks" }
        );
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_phase_complete(&self, phase: &Phase, summary: &str) {
        if *phase == Phase::Done {
            return;
        }
        if summary.is_empty() {
            eprintln!();
        } else {
            eprintln!("  {}\n", summary.dimmed());
        }
    }
}
