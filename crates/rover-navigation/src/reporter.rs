//! Side channel for rovers that were kept stationary.
//!
//! A failed rover never aborts a navigation pass and its error is never
//! returned from [`Navigation::navigate_rovers`][crate::Navigation::navigate_rovers].
//! Instead the coordinator hands it to a [`NavigationReporter`].
//!
//! - [`TracingReporter`] – the default; emits a `warn!` event.
//! - [`RecordingReporter`] – keeps every report in memory so callers can
//!   inspect them afterwards.

use std::sync::{Arc, Mutex};

use rover_types::RoverError;
use tracing::warn;

/// Receives one call per rover left stationary during a navigation pass.
pub trait NavigationReporter: Send + Sync {
    /// `rover_index` is the rover's construction-order position.
    fn rover_stationary(&self, rover_index: usize, reason: &RoverError);
}

// ────────────────────────────────────────────────────────────────────────────
// TracingReporter
// ────────────────────────────────────────────────────────────────────────────

/// Logs each stationary rover through `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl NavigationReporter for TracingReporter {
    fn rover_stationary(&self, rover_index: usize, reason: &RoverError) {
        warn!(rover_index, error = %reason, "rover kept stationary");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RecordingReporter
// ────────────────────────────────────────────────────────────────────────────

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationaryReport {
    pub rover_index: usize,
    pub reason: RoverError,
}

/// Collects reports in memory.
///
/// Clones share the same storage, so keep one handle and give the other to
/// the coordinator:
///
/// ```
/// use rover_navigation::{Navigation, RecordingReporter, Rover};
/// use rover_types::{Heading, PlateauBound};
///
/// let bound = PlateauBound::new(5, 5);
/// let rovers = vec![Rover::new(0, 0, Heading::North, bound).unwrap()];
/// let recorder = RecordingReporter::new();
///
/// let mut navigation = Navigation::new(bound, rovers, &["MMMMMMMM"])
///     .unwrap()
///     .with_reporter(Box::new(recorder.clone()));
/// navigation.navigate_rovers();
///
/// assert_eq!(recorder.reports().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<StationaryReport>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in report order.
    pub fn reports(&self) -> Vec<StationaryReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn clear(&self) {
        match self.reports.lock() {
            Ok(mut reports) => reports.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl NavigationReporter for RecordingReporter {
    fn rover_stationary(&self, rover_index: usize, reason: &RoverError) {
        let report = StationaryReport {
            rover_index,
            reason: reason.clone(),
        };
        match self.reports.lock() {
            Ok(mut reports) => reports.push(report),
            Err(poisoned) => poisoned.into_inner().push(report),
        }
    }
}
