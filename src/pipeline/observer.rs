//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. The runner calls [`PipelineObserver::on_stage_start`] and
//! [`PipelineObserver::on_stage_end`] around every stage, and the artifact
//! hooks once the corresponding output exists.

use std::time::{Duration, Instant};

use tracing::info;

use super::artifacts::PipelineResult;

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_CLEAN: &str = "clean";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_STOPWORDS: &str = "remove_stopwords";
pub const STAGE_STEM: &str = "stem";
pub const STAGE_LEMMATIZE: &str = "lemmatize";

/// Every stage, in execution order.
pub const STAGES: [&str; 5] = [
    STAGE_CLEAN,
    STAGE_TOKENIZE,
    STAGE_STOPWORDS,
    STAGE_STEM,
    STAGE_LEMMATIZE,
];

// ─── Clock ──────────────────────────────────────────────────────────────────

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// What a stage did: how long it took and how many items went in and out.
///
/// Counts are characters for the cleaning stage and tokens everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    elapsed: Duration,
    input_len: Option<usize>,
    output_len: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn input_len(&self) -> Option<usize> {
        self.input_len
    }

    pub fn output_len(&self) -> Option<usize> {
        self.output_len
    }
}

/// Builder for a [`StageReport`] with optional counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn input(mut self, len: usize) -> Self {
        self.report.input_len = Some(len);
        self
    }

    pub fn output(mut self, len: usize) -> Self {
        self.report.output_len = Some(len);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Callbacks invoked by [`Pipeline::run_observed`](super::runner::Pipeline::run_observed).
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called after tokenization with the raw token sequence.
    fn on_tokens(&mut self, _tokens: &[String]) {}

    /// Called once with the finished result.
    fn on_result(&mut self, _result: &PipelineResult) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects the report of every stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Sum of all stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Emits one `info` event per finished stage; the CLI attaches it under
/// `--verbose`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl PipelineObserver for LoggingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        info!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            input = report.input_len(),
            output = report.output_len(),
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .input(10)
            .output(7)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.input_len(), Some(10));
        assert_eq!(report.output_len(), Some(7));
    }

    #[test]
    fn test_plain_report_has_no_counts() {
        let report = StageReport::new(Duration::ZERO);
        assert!(report.input_len().is_none());
        assert!(report.output_len().is_none());
    }

    #[test]
    fn test_timing_observer_collects_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_CLEAN, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_TOKENIZE, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_CLEAN, STAGE_TOKENIZE]);
        assert_eq!(obs.total(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
