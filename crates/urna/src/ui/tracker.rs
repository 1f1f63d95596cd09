use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use urna_pipeline::{BatchReport, RunSummary};

pub trait Tracker<Inc> {
    fn step(&self, step: Inc) -> &Self;
    fn finish(self);
}

const PB_STYLE: &str = "{spinner:.blue} {prefix:>6.cyan.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({per_sec}, {eta}) {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

/// Item-level progress for a run, advanced once per finished batch.
#[derive(Clone)]
pub struct BatchTracker {
    pb: ProgressBar,
    ok: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
}

impl BatchTracker {
    fn message(&self) -> String {
        format!(
            "{} ok, {} failed",
            self.ok.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed)
        )
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish_with(self, summary: &RunSummary) {
        self.pb.finish_with_message(format!(
            "{} ok, {} failed in {:.1}s",
            summary.succeeded,
            summary.failed,
            summary.elapsed.as_secs_f64()
        ));
    }
}

impl Tracker<&BatchReport> for BatchTracker {
    fn step(&self, report: &BatchReport) -> &Self {
        self.ok.fetch_add(report.succeeded(), Ordering::Relaxed);
        self.failed.fetch_add(report.failed(), Ordering::Relaxed);
        self.pb.inc(report.attempted as u64);
        self.pb.set_message(self.message());
        self
    }

    fn finish(self) {
        let message = self.message();
        self.pb.finish_with_message(message);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchTrackerBuilder {
    len: u64,
    prefix: Option<String>,
    hidden: bool,
}

impl BatchTrackerBuilder {
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = len;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn build(self) -> BatchTracker {
        let pb = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(self.len)
        };
        let pb = if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.with_style(style.clone())
        } else {
            pb
        };
        pb.set_length(self.len);

        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }
        BatchTracker {
            pb,
            ok: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
        }
    }
}
