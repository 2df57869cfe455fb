//! [`Rover`] – a single rover's position/heading state machine.
//!
//! Turns change the heading immediately and are always legal.  Moves are
//! computed into a candidate cell and only committed once the whole
//! instruction string has been applied, so a rejected string leaves the
//! rover's position untouched.  Headings changed by turns *before* the
//! rejected step are kept.
//!
//! # Example
//!
//! ```
//! use rover_navigation::Rover;
//! use rover_types::{Heading, PlateauBound};
//!
//! let mut rover = Rover::new(2, 2, Heading::East, PlateauBound::new(5, 5)).unwrap();
//! rover.navigate(&"MLMLMRMRM".parse().unwrap()).unwrap();
//! assert_eq!(rover.position_and_orientation(), "3 4 E");
//! ```

use std::fmt;

use rover_types::{
    GridCell, Heading, Instruction, Instructions, MovePolicy, PlateauBound, RoverError,
};
use tracing::debug;

use crate::occupancy::OccupancyRegistry;

/// One rover on a plateau.
///
/// Invariant: the rover's cell always lies inside its [`PlateauBound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rover {
    x: i64,
    y: i64,
    heading: Heading,
    bound: PlateauBound,
}

impl Rover {
    /// Place a rover at `(x, y)` facing `heading`.
    ///
    /// # Errors
    ///
    /// - [`RoverError::InvalidBound`] – `bound` has a non-positive component.
    /// - [`RoverError::InvalidStartPosition`] – `(x, y)` lies off the plateau.
    pub fn new(x: i64, y: i64, heading: Heading, bound: PlateauBound) -> Result<Self, RoverError> {
        bound.validate()?;
        if !bound.contains(GridCell::new(x, y)) {
            return Err(RoverError::InvalidStartPosition { x, y });
        }
        Ok(Self {
            x,
            y,
            heading,
            bound,
        })
    }

    /// Like [`Rover::new`], with the heading given as its letter code.
    ///
    /// # Errors
    ///
    /// Additionally returns [`RoverError::InvalidHeading`] when `heading` is
    /// not one of `N`, `E`, `S`, `W`.
    pub fn from_code(
        x: i64,
        y: i64,
        heading: &str,
        bound: PlateauBound,
    ) -> Result<Self, RoverError> {
        bound.validate()?;
        if !bound.contains(GridCell::new(x, y)) {
            return Err(RoverError::InvalidStartPosition { x, y });
        }
        Self::new(x, y, heading.parse()?, bound)
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn bound(&self) -> PlateauBound {
        self.bound
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.x, self.y)
    }

    /// Formatted as `"{x} {y} {heading}"`, e.g. `"1 3 N"`.
    pub fn position_and_orientation(&self) -> String {
        self.to_string()
    }

    // ------------------------------------------------------------------ primitives

    pub fn turn_left(&mut self) {
        self.heading = self.heading.turned_left();
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turned_right();
    }

    /// Advance one cell, silently clamped to the plateau edge.
    pub fn move_forward(&mut self) {
        let next = self.clamped_step(self.cell());
        self.x = next.x;
        self.y = next.y;
    }

    /// Advance one cell, or fail with [`RoverError::OutOfBounds`] without
    /// moving if the step would leave the plateau.
    pub fn try_move_forward(&mut self) -> Result<(), RoverError> {
        let next = self.checked_step(self.cell())?;
        self.x = next.x;
        self.y = next.y;
        Ok(())
    }

    // ------------------------------------------------------------------ navigation

    /// Apply `instructions`, failing fast on the first step that would leave
    /// the plateau.  Position is only updated if every step succeeds.
    pub fn navigate(&mut self, instructions: &Instructions) -> Result<(), RoverError> {
        self.navigate_with(instructions, None, 0, MovePolicy::Fail)
    }

    /// Apply `instructions` with clamping moves.  Never fails.
    pub fn navigate_clamped(&mut self, instructions: &Instructions) {
        let mut candidate = self.cell();
        for instruction in instructions.iter() {
            match instruction {
                Instruction::TurnLeft => self.turn_left(),
                Instruction::TurnRight => self.turn_right(),
                Instruction::Move => candidate = self.clamped_step(candidate),
            }
        }
        self.commit(candidate, 0);
    }

    /// Collision-aware [`Rover::navigate`].
    ///
    /// Each step is checked against `occupancy` before it is checked against
    /// the bound, so a step that is both occupied and off the plateau reports
    /// [`RoverError::Collision`].  On success the final cell is registered in
    /// `occupancy`.
    pub fn navigate_avoiding(
        &mut self,
        instructions: &Instructions,
        occupancy: &mut OccupancyRegistry,
        rover_index: usize,
    ) -> Result<(), RoverError> {
        self.navigate_with(instructions, Some(occupancy), rover_index, MovePolicy::Fail)
    }

    /// General form behind every `navigate*` method.
    ///
    /// `occupancy` of `None` disables collision checks; `rover_index` only
    /// appears in [`RoverError::Collision`].
    pub fn navigate_with(
        &mut self,
        instructions: &Instructions,
        mut occupancy: Option<&mut OccupancyRegistry>,
        rover_index: usize,
        policy: MovePolicy,
    ) -> Result<(), RoverError> {
        let mut candidate = self.cell();

        for instruction in instructions.iter() {
            match instruction {
                Instruction::TurnLeft => self.turn_left(),
                Instruction::TurnRight => self.turn_right(),
                Instruction::Move => {
                    let next = match policy {
                        MovePolicy::Clamp => self.clamped_step(candidate),
                        MovePolicy::Fail => match candidate.step(self.heading) {
                            Some(next) => next,
                            None => return Err(self.out_of_bounds(candidate)),
                        },
                    };
                    if let Some(registry) = occupancy.as_deref()
                        && registry.is_occupied(next)
                    {
                        return Err(RoverError::Collision {
                            rover_index,
                            x: next.x,
                            y: next.y,
                        });
                    }
                    if !self.bound.contains(next) {
                        return Err(RoverError::OutOfBounds { x: next.x, y: next.y });
                    }
                    candidate = next;
                }
            }
        }

        self.commit(candidate, rover_index);
        if let Some(registry) = occupancy.as_deref_mut() {
            registry.occupy(candidate);
        }
        Ok(())
    }

    // ------------------------------------------------------------------ helpers

    /// Move onto the coordinator's plateau; the cell is already known to lie
    /// on `bound`.
    pub(crate) fn rebind(&mut self, bound: PlateauBound) {
        self.bound = bound;
    }

    fn commit(&mut self, cell: GridCell, rover_index: usize) {
        self.x = cell.x;
        self.y = cell.y;
        debug!(rover_index, x = self.x, y = self.y, heading = %self.heading, "rover committed");
    }

    fn clamped_step(&self, from: GridCell) -> GridCell {
        from.step(self.heading).map_or(from, |next| self.bound.clamp(next))
    }

    fn checked_step(&self, from: GridCell) -> Result<GridCell, RoverError> {
        match from.step(self.heading) {
            Some(next) if self.bound.contains(next) => Ok(next),
            Some(next) => Err(RoverError::OutOfBounds { x: next.x, y: next.y }),
            None => Err(self.out_of_bounds(from)),
        }
    }

    /// Overflowing steps are reported at the last representable cell.
    fn out_of_bounds(&self, from: GridCell) -> RoverError {
        let (dx, dy) = self.heading.offset();
        RoverError::OutOfBounds {
            x: from.x.saturating_add(dx),
            y: from.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.heading)
    }
}
