//! [`Navigation`] – multi-rover coordinator.
//!
//! Construction enforces four invariants, in this order, and never returns a
//! partially valid coordinator:
//!
//! 1. the plateau bound is valid,
//! 2. there is exactly one instruction string per rover,
//! 3. every instruction string is a non-empty sequence over `M`, `L`, `R`,
//! 4. no two rovers start on the same cell.
//!
//! Every rover must also start on the coordinator's plateau; rovers built
//! against another bound are moved onto this one.
//!
//! [`Navigation::navigate_rovers`] then drives each rover in construction
//! order against a shared [`OccupancyRegistry`].  A rover whose string would
//! leave the plateau or collide is kept where it was and reported through the
//! configured [`NavigationReporter`]; its siblings are unaffected.
//!
//! # Example
//!
//! ```
//! use rover_navigation::{Navigation, Rover};
//! use rover_types::{Heading, PlateauBound};
//!
//! let bound = PlateauBound::new(5, 5);
//! let rovers = vec![
//!     Rover::new(1, 2, Heading::North, bound).unwrap(),
//!     Rover::new(3, 3, Heading::East, bound).unwrap(),
//! ];
//!
//! let mut navigation = Navigation::new(bound, rovers, &["LMLMLMLMM", "MMRMMRMRRM"]).unwrap();
//! navigation.navigate_rovers();
//! assert_eq!(navigation.positions_and_orientations(), ["1 3 N", "5 1 E"]);
//! ```

use std::collections::HashSet;

use rover_types::{GridCell, Heading, Instructions, MovePolicy, PlateauBound, RoverError};
use tracing::info;

use crate::occupancy::OccupancyRegistry;
use crate::reporter::{NavigationReporter, TracingReporter};
use crate::rover::Rover;

/// What happened to one rover during a navigation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoverOutcome {
    /// The whole instruction string was applied.
    Moved {
        from: GridCell,
        to: GridCell,
        heading: Heading,
    },
    /// The string was rejected; the rover stayed on `at`.
    Stationary {
        at: GridCell,
        heading: Heading,
        reason: RoverError,
    },
}

impl RoverOutcome {
    pub fn is_stationary(&self) -> bool {
        matches!(self, RoverOutcome::Stationary { .. })
    }

    /// Cell the rover occupies once its turn is over.
    pub fn final_cell(&self) -> GridCell {
        match self {
            RoverOutcome::Moved { to, .. } => *to,
            RoverOutcome::Stationary { at, .. } => *at,
        }
    }
}

/// Owns a plateau, its rovers, and one instruction string per rover.
pub struct Navigation {
    bound: PlateauBound,
    rovers: Vec<Rover>,
    instructions: Vec<Instructions>,
    policy: MovePolicy,
    collision_checks: bool,
    reporter: Box<dyn NavigationReporter>,
}

impl Navigation {
    /// Validate and assemble a coordinator.
    ///
    /// Defaults: [`MovePolicy::Fail`], collision checks on, and a
    /// [`TracingReporter`].
    ///
    /// # Errors
    ///
    /// - [`RoverError::InvalidBound`]
    /// - [`RoverError::InstructionCountMismatch`]
    /// - [`RoverError::InvalidInstructionSyntax`], naming the rover
    /// - [`RoverError::DuplicateStartPosition`]
    /// - [`RoverError::InvalidStartPosition`] when a rover was built against a
    ///   different bound and lies off this plateau
    pub fn new<S: AsRef<str>>(
        bound: PlateauBound,
        mut rovers: Vec<Rover>,
        instructions: &[S],
    ) -> Result<Self, RoverError> {
        bound.validate()?;

        if rovers.len() != instructions.len() {
            return Err(RoverError::InstructionCountMismatch {
                rovers: rovers.len(),
                instructions: instructions.len(),
            });
        }

        let instructions = instructions
            .iter()
            .enumerate()
            .map(|(index, raw)| Instructions::parse_for(index, raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(rovers.len());
        for rover in &rovers {
            let cell = rover.cell();
            if !seen.insert(cell) {
                return Err(RoverError::DuplicateStartPosition {
                    x: cell.x,
                    y: cell.y,
                });
            }
        }

        for rover in &mut rovers {
            let cell = rover.cell();
            if !bound.contains(cell) {
                return Err(RoverError::InvalidStartPosition {
                    x: cell.x,
                    y: cell.y,
                });
            }
            rover.rebind(bound);
        }

        Ok(Self {
            bound,
            rovers,
            instructions,
            policy: MovePolicy::default(),
            collision_checks: true,
            reporter: Box::new(TracingReporter),
        })
    }

    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_collision_checks(mut self, enabled: bool) -> Self {
        self.collision_checks = enabled;
        self
    }

    /// Navigate rovers independently; the occupancy registry is never consulted.
    pub fn without_collision_checks(self) -> Self {
        self.with_collision_checks(false)
    }

    pub fn with_reporter(mut self, reporter: Box<dyn NavigationReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn bound(&self) -> PlateauBound {
        self.bound
    }

    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    pub fn rovers(&self) -> &[Rover] {
        &self.rovers
    }

    pub fn instructions(&self) -> &[Instructions] {
        &self.instructions
    }

    /// Run one navigation pass and return every rover, including any that
    /// were kept stationary.
    pub fn navigate_rovers(&mut self) -> &[Rover] {
        let _ = self.navigate_rovers_with_outcomes();
        &self.rovers
    }

    /// Run one navigation pass, returning an outcome per rover in
    /// construction order.
    ///
    /// The occupancy registry is seeded from the rovers' current cells at the
    /// start of every pass.
    pub fn navigate_rovers_with_outcomes(&mut self) -> Vec<RoverOutcome> {
        let mut occupancy = OccupancyRegistry::seeded(self.rovers.iter().map(Rover::cell));
        let mut outcomes = Vec::with_capacity(self.rovers.len());

        for (index, (rover, instructions)) in self
            .rovers
            .iter_mut()
            .zip(self.instructions.iter())
            .enumerate()
        {
            let from = rover.cell();
            occupancy.vacate(from);

            let registry = self.collision_checks.then_some(&mut occupancy);
            match rover.navigate_with(instructions, registry, index, self.policy) {
                Ok(()) => {
                    if !self.collision_checks {
                        occupancy.occupy(rover.cell());
                    }
                    outcomes.push(RoverOutcome::Moved {
                        from,
                        to: rover.cell(),
                        heading: rover.heading(),
                    });
                }
                Err(reason) => {
                    self.reporter.rover_stationary(index, &reason);
                    occupancy.occupy(from);
                    outcomes.push(RoverOutcome::Stationary {
                        at: from,
                        heading: rover.heading(),
                        reason,
                    });
                }
            }
        }

        let stationary = outcomes.iter().filter(|o| o.is_stationary()).count();
        info!(
            rovers = outcomes.len(),
            stationary,
            policy = %self.policy,
            "navigation pass complete"
        );
        outcomes
    }

    /// One `"x y H"` line per rover, in construction order.
    pub fn positions_and_orientations(&self) -> Vec<String> {
        self.rovers
            .iter()
            .map(Rover::position_and_orientation)
            .collect()
    }
}
