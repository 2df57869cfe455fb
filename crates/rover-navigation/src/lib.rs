//! `rover-navigation` – Rover state machine & multi-rover coordination
//!
//! The engine that moves rovers across a plateau. It does not collect input
//! or format output; it applies already-validated instruction strings and
//! enforces the bounds and collision invariants.
//!
//! # Modules
//!
//! - [`rover`] – [`Rover`][rover::Rover]: one rover's position and heading
//!   with turn, move and compute-then-commit `navigate` operations.
//! - [`occupancy`] – [`OccupancyRegistry`][occupancy::OccupancyRegistry]:
//!   the set of cells currently held by rovers, used for collision checks.
//! - [`reporter`] – [`NavigationReporter`][reporter::NavigationReporter]:
//!   the side channel through which a rover left stationary is reported.
//! - [`navigation`] – [`Navigation`][navigation::Navigation]: validates a
//!   batch of rovers and drives each one in construction order, isolating
//!   per-rover failures.

pub mod navigation;
pub mod occupancy;
pub mod reporter;
pub mod rover;

pub use navigation::{Navigation, RoverOutcome};
pub use occupancy::OccupancyRegistry;
pub use reporter::{NavigationReporter, RecordingReporter, StationaryReport, TracingReporter};
pub use rover::Rover;
