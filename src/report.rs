//! Flight-report collaborator boundary
//!
//! On termination the driver fires a report request and forgets it: the
//! text comes back out-of-band on an mpsc channel and never gates the tick
//! loop or the next run. Failures resolve to a fixed fallback string at
//! this boundary; nothing here may panic into the game loop.
//!
//! Stale-response guard: every receipt carries the `run_id` it was
//! requested for, and [`ReportChannel::poll`] silently drops receipts from
//! any run other than the current one, so a slow report from a finished
//! run can never overwrite state belonging to a restarted one.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use thiserror::Error;

/// Shown when the reporter returned an error
pub const FAILURE_REPORT: &str = "Engine failure! No report available.";
/// Shown when the reporter answered with an empty string
pub const BLANK_REPORT: &str = "Command lost connection. Keep flying!";

/// Why a flight report could not be produced
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report service unreachable: {0}")]
    Unreachable(String),
    #[error("report request timed out")]
    Timeout,
    #[error("report service rejected the request: {0}")]
    Rejected(String),
}

/// Produces the game-over flavor text from a final score.
///
/// Implementations typically call a remote text-generation service; the
/// engine only sees this trait.
pub trait FlightReporter: Send + Sync + 'static {
    fn flight_report(&self, final_score: u32) -> Result<String, ReportError>;
}

/// A report request, tagged with the run it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub run_id: u64,
    pub final_score: u32,
}

#[derive(Debug, Clone)]
struct ReportReceipt {
    run_id: u64,
    text: String,
}

/// Fire-and-forget dispatch plus out-of-band delivery of flight reports
pub struct ReportChannel {
    tx: Sender<ReportReceipt>,
    rx: Receiver<ReportReceipt>,
}

impl Default for ReportChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportChannel {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Request a report on a detached worker thread. Returns immediately;
    /// the result (or a fallback) arrives later via [`ReportChannel::poll`].
    pub fn dispatch(&self, reporter: Arc<dyn FlightReporter>, request: ReportRequest) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let text = match reporter.flight_report(request.final_score) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => BLANK_REPORT.to_string(),
                Err(err) => {
                    log::warn!("flight report for run {} failed: {err}", request.run_id);
                    FAILURE_REPORT.to_string()
                }
            };
            // The receiver may be gone if the game shut down; that's fine
            let _ = tx.send(ReportReceipt {
                run_id: request.run_id,
                text,
            });
        });
    }

    /// Drain delivered reports, keeping only ones for the current run.
    pub fn poll(&self, current_run_id: u64) -> Option<String> {
        let mut latest = None;
        while let Ok(receipt) = self.rx.try_recv() {
            if receipt.run_id == current_run_id {
                latest = Some(receipt.text);
            } else {
                log::debug!(
                    "dropping stale flight report from run {} (current run {})",
                    receipt.run_id,
                    current_run_id
                );
            }
        }
        latest
    }
}

/// Offline reporter for the demo binary: canned lines, no network.
pub struct CannedReporter;

impl FlightReporter for CannedReporter {
    fn flight_report(&self, final_score: u32) -> Result<String, ReportError> {
        let line = match final_score {
            0 => "Sky Command notes the pilot achieved a perfect record of zero rings.",
            1..=4 => "Sky Command suggests the rings are the large gold circles.",
            5..=9 => "Sky Command observed promising flying right up until the fireball.",
            10..=19 => "Sky Command confirms the drones were, in fact, faster.",
            _ => "Sky Command is framing this flight log next to the coffee machine.",
        };
        Ok(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FailingReporter;
    impl FlightReporter for FailingReporter {
        fn flight_report(&self, _final_score: u32) -> Result<String, ReportError> {
            Err(ReportError::Timeout)
        }
    }

    struct BlankReporter;
    impl FlightReporter for BlankReporter {
        fn flight_report(&self, _final_score: u32) -> Result<String, ReportError> {
            Ok("   ".to_string())
        }
    }

    fn poll_blocking(channel: &ReportChannel, run_id: u64) -> Option<String> {
        for _ in 0..200 {
            if let Some(text) = channel.poll(run_id) {
                return Some(text);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn delivers_report_out_of_band() {
        let channel = ReportChannel::new();
        channel.dispatch(
            Arc::new(CannedReporter),
            ReportRequest { run_id: 1, final_score: 12 },
        );
        let text = poll_blocking(&channel, 1).expect("report should arrive");
        assert!(text.contains("drones"));
    }

    #[test]
    fn failure_maps_to_fallback_string() {
        let channel = ReportChannel::new();
        channel.dispatch(
            Arc::new(FailingReporter),
            ReportRequest { run_id: 1, final_score: 3 },
        );
        assert_eq!(poll_blocking(&channel, 1).as_deref(), Some(FAILURE_REPORT));
    }

    #[test]
    fn blank_response_maps_to_fallback_string() {
        let channel = ReportChannel::new();
        channel.dispatch(
            Arc::new(BlankReporter),
            ReportRequest { run_id: 1, final_score: 3 },
        );
        assert_eq!(poll_blocking(&channel, 1).as_deref(), Some(BLANK_REPORT));
    }

    #[test]
    fn stale_run_reports_are_dropped() {
        let channel = ReportChannel::new();
        channel.dispatch(
            Arc::new(CannedReporter),
            ReportRequest { run_id: 1, final_score: 3 },
        );
        // Wait until the worker has definitely delivered run 1's receipt
        thread::sleep(Duration::from_millis(100));

        // The game has since restarted as run 2
        assert_eq!(channel.poll(2), None);

        // A report for run 2 still comes through afterwards
        channel.dispatch(
            Arc::new(CannedReporter),
            ReportRequest { run_id: 2, final_score: 25 },
        );
        assert!(poll_blocking(&channel, 2).is_some());
    }
}
