use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use admet_forge::pipeline::StageReport;

/// Per-step spinner and completion lines on stderr. Non-interactive runs
/// only accumulate totals.
pub struct Progress {
    interactive: bool,
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    position: usize,
    total: usize,
    rows_written: usize,
    rows_dropped: usize,
}

impl Progress {
    pub fn new(interactive: bool, total: usize) -> Self {
        let now = Instant::now();
        Self {
            interactive,
            bar: None,
            started: now,
            step_started: now,
            position: 0,
            total,
            rows_written: 0,
            rows_dropped: 0,
        }
    }

    pub fn step(&mut self, title: &str) {
        self.clear_bar();
        self.position += 1;
        self.step_started = Instant::now();
        if !self.interactive {
            return;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!("[{}/{}] {title}...", self.position, self.total));
        self.bar = Some(bar);
    }

    /// Closes the current step with one line per stage report.
    pub fn complete_stage(&mut self, title: &str, reports: &[StageReport]) {
        for report in reports {
            self.rows_written += report.rows_out;
            self.rows_dropped += report.dropped();
        }
        let notes: Vec<String> = reports.iter().map(report_line).collect();
        self.complete_step(title, &notes);
    }

    /// Closes the current step with free-form notes.
    pub fn complete_step(&mut self, title: &str, notes: &[String]) {
        self.clear_bar();
        if !self.interactive {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            title,
            self.step_started.elapsed().as_secs_f64()
        );
        for note in notes {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {note}");
        }
    }

    pub fn finish(mut self, summary: &str) {
        self.clear_bar();
        if !self.interactive {
            return;
        }

        let totals = match (self.rows_written, self.rows_dropped) {
            (0, 0) => String::new(),
            (written, 0) => format!("{written} rows written"),
            (written, dropped) => format!("{written} rows written, {dropped} dropped"),
        };

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  \x1b[2m{}\x1b[0m", "━".repeat(56));
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {summary:<24} {totals:<30} {:>7.2}s",
            self.started.elapsed().as_secs_f64()
        );
        let _ = writeln!(stderr);
    }

    fn clear_bar(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn report_line(report: &StageReport) -> String {
    match report.dropped() {
        0 => format!("{}: {} rows", report.target, report.rows_out),
        n => format!(
            "{}: {} rows \x1b[33m({n} dropped)\x1b[0m",
            report.target, report.rows_out
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admet_forge::Target;
    use admet_forge::pipeline::Stage;

    #[test]
    fn report_line_mentions_drops_only_when_present() {
        let clean = StageReport::new(Stage::Combine, Target::Hlm, 4, 4);
        assert_eq!(report_line(&clean), "HLM: 4 rows");

        let lossy = StageReport::new(Stage::Convert, Target::Ksol, 5, 3);
        assert!(report_line(&lossy).contains("(2 dropped)"));
    }

    #[test]
    fn silent_progress_still_counts_rows() {
        let mut progress = Progress::new(false, 1);
        progress.step("Converting KSOL");
        progress.complete_stage(
            "Converting KSOL",
            &[StageReport::new(Stage::Convert, Target::Ksol, 5, 3)],
        );
        assert_eq!((progress.rows_written, progress.rows_dropped), (3, 2));
        assert_eq!(progress.position, 1);
        progress.finish("Conversion complete");
    }
}
