//! `rover-types` – shared plateau, heading and instruction types.
//!
//! Every crate in the workspace speaks in these values: the navigation engine
//! mutates rovers expressed with [`GridCell`] and [`Heading`], the CLI parses
//! raw text into [`PlateauBound`] and [`Instructions`], and all failures are
//! reported through the single [`RoverError`] taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod validation;

// ────────────────────────────────────────────────────────────────────────────
// Plateau
// ────────────────────────────────────────────────────────────────────────────

/// Inclusive upper-right corner of a zero-indexed plateau whose lower-left
/// corner is `(0, 0)`.
///
/// A bound is only usable when both components are strictly positive; see
/// [`PlateauBound::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlateauBound {
    pub max_x: i64,
    pub max_y: i64,
}

impl PlateauBound {
    pub const fn new(max_x: i64, max_y: i64) -> Self {
        Self { max_x, max_y }
    }

    pub const fn is_valid(&self) -> bool {
        self.max_x > 0 && self.max_y > 0
    }

    /// Returns [`RoverError::InvalidBound`] unless both components are > 0.
    pub fn validate(&self) -> Result<(), RoverError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(RoverError::InvalidBound {
                max_x: self.max_x,
                max_y: self.max_y,
            })
        }
    }

    /// `true` when `cell` lies on the plateau (edges included).
    pub const fn contains(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x <= self.max_x && cell.y <= self.max_y
    }

    /// Pull `cell` back onto the plateau, component-wise.
    pub fn clamp(&self, cell: GridCell) -> GridCell {
        GridCell {
            x: cell.x.clamp(0, self.max_x),
            y: cell.y.clamp(0, self.max_y),
        }
    }
}

impl fmt::Display for PlateauBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.max_x, self.max_y)
    }
}

/// A single integer cell on the plateau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step toward `heading`.
    ///
    /// Returns `None` only when the step would overflow the coordinate type.
    pub fn step(self, heading: Heading) -> Option<GridCell> {
        let (dx, dy) = heading.offset();
        Some(GridCell {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heading
// ────────────────────────────────────────────────────────────────────────────

/// Cardinal heading of a rover, written as its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Counter-clockwise quarter turn: N → W → S → E → N.
    pub const fn turned_left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Clockwise quarter turn: N → E → S → W → N.
    pub const fn turned_right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Unit `(dx, dy)` displacement of one forward step. North is `+y`.
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    pub const fn code(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Heading {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Heading::North),
            "E" => Ok(Heading::East),
            "S" => Ok(Heading::South),
            "W" => Ok(Heading::West),
            other => Err(RoverError::InvalidHeading(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Instructions
// ────────────────────────────────────────────────────────────────────────────

/// One navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `M` – advance one cell toward the current heading.
    Move,
    /// `L` – quarter turn counter-clockwise.
    TurnLeft,
    /// `R` – quarter turn clockwise.
    TurnRight,
}

impl Instruction {
    pub const fn code(self) -> char {
        match self {
            Instruction::Move => 'M',
            Instruction::TurnLeft => 'L',
            Instruction::TurnRight => 'R',
        }
    }
}

impl TryFrom<char> for Instruction {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'M' => Ok(Instruction::Move),
            'L' => Ok(Instruction::TurnLeft),
            'R' => Ok(Instruction::TurnRight),
            other => Err(other),
        }
    }
}

/// A non-empty, syntactically valid instruction string such as `"LMLMLMLMM"`.
///
/// (De)serialises as its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instructions(Vec<Instruction>);

impl Instructions {
    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a successfully parsed value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }
}

impl Instructions {
    /// Parse the instruction string belonging to rover `index`.
    ///
    /// # Errors
    ///
    /// [`RoverError::InvalidInstructionSyntax`] carrying `index` when `raw` is
    /// empty or holds anything but `M`, `L` and `R`.
    pub fn parse_for(index: usize, raw: &str) -> Result<Self, RoverError> {
        let invalid = || RoverError::InvalidInstructionSyntax {
            index,
            instructions: raw.to_string(),
        };
        if raw.is_empty() {
            return Err(invalid());
        }
        raw.chars()
            .map(Instruction::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Instructions)
            .map_err(|_| invalid())
    }
}

/// Parses as the string of rover 0.
impl FromStr for Instructions {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instructions::parse_for(0, s)
    }
}

impl TryFrom<String> for Instructions {
    type Error = RoverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Instructions> for String {
    fn from(value: Instructions) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.0 {
            write!(f, "{}", instruction.code())?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Move policy
// ────────────────────────────────────────────────────────────────────────────

/// How a forward step that would leave the plateau is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// The step is rejected with [`RoverError::OutOfBounds`] and the whole
    /// instruction string is abandoned.
    #[default]
    Fail,
    /// The step is clamped onto the plateau edge and navigation continues.
    Clamp,
}

impl fmt::Display for MovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovePolicy::Fail => write!(f, "fail"),
            MovePolicy::Clamp => write!(f, "clamp"),
        }
    }
}

impl FromStr for MovePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(MovePolicy::Fail),
            "clamp" => Ok(MovePolicy::Clamp),
            other => Err(format!("unknown move policy '{other}', expected 'fail' or 'clamp'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Every failure the navigation engine can produce.
///
/// Construction-time variants are fatal to the object being built. Only
/// [`RoverError::OutOfBounds`] and [`RoverError::Collision`] are raised while
/// rovers are moving, and the coordinator recovers from those per rover.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoverError {
    #[error("Invalid plateau size {max_x} {max_y}, x and y must be numbers greater than 0")]
    InvalidBound { max_x: i64, max_y: i64 },

    #[error(
        "Invalid rover position {x} {y}, x and y must be numbers greater than zero and within the bounds of the plateau"
    )]
    InvalidStartPosition { x: i64, y: i64 },

    #[error("Invalid rover orientation '{0}', must be one of N, E, S, W")]
    InvalidHeading(String),

    #[error(
        "Invalid instructions, there must be an equal number of rovers and instructions ({rovers} rovers, {instructions} instructions)"
    )]
    InstructionCountMismatch { rovers: usize, instructions: usize },

    #[error(
        "Invalid instructions for rover {index}, must be a string of M, L, R (got {instructions:?})"
    )]
    InvalidInstructionSyntax { index: usize, instructions: String },

    #[error("Two or more rovers have been constructed at the same position: {x},{y}")]
    DuplicateStartPosition { x: i64, y: i64 },

    #[error(
        "Invalid instructions, rover would go out of bounds at {x} {y}. Keeping this rover stationary."
    )]
    OutOfBounds { x: i64, y: i64 },

    #[error(
        "Collision for Rover {rover_index} would occur at {x} {y}. Keeping this rover stationary."
    )]
    Collision { rover_index: usize, x: i64, y: i64 },
}

impl RoverError {
    /// `true` for the errors raised mid-navigation, which leave the rover
    /// stationary instead of aborting the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RoverError::OutOfBounds { .. } | RoverError::Collision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------ PlateauBound

    #[test]
    fn bound_requires_positive_components() {
        assert!(PlateauBound::new(5, 5).is_valid());
        assert!(PlateauBound::new(1, 1).validate().is_ok());
        assert_eq!(
            PlateauBound::new(0, 0).validate(),
            Err(RoverError::InvalidBound { max_x: 0, max_y: 0 })
        );
        assert_eq!(
            PlateauBound::new(-1, -1).validate(),
            Err(RoverError::InvalidBound { max_x: -1, max_y: -1 })
        );
        assert_eq!(
            PlateauBound::new(5, 0).validate(),
            Err(RoverError::InvalidBound { max_x: 5, max_y: 0 })
        );
    }

    #[test]
    fn bound_contains_edges_inclusively() {
        let bound = PlateauBound::new(5, 5);
        assert!(bound.contains(GridCell::new(0, 0)));
        assert!(bound.contains(GridCell::new(5, 5)));
        assert!(!bound.contains(GridCell::new(6, 5)));
        assert!(!bound.contains(GridCell::new(0, -1)));
    }

    #[test]
    fn bound_clamp_pulls_cells_onto_plateau() {
        let bound = PlateauBound::new(5, 3);
        assert_eq!(bound.clamp(GridCell::new(-1, 4)), GridCell::new(0, 3));
        assert_eq!(bound.clamp(GridCell::new(2, 2)), GridCell::new(2, 2));
    }

    // ------------------------------------------------------------------ GridCell

    #[test]
    fn step_follows_heading_offsets() {
        let origin = GridCell::new(2, 2);
        assert_eq!(origin.step(Heading::North), Some(GridCell::new(2, 3)));
        assert_eq!(origin.step(Heading::East), Some(GridCell::new(3, 2)));
        assert_eq!(origin.step(Heading::South), Some(GridCell::new(2, 1)));
        assert_eq!(origin.step(Heading::West), Some(GridCell::new(1, 2)));
    }

    #[test]
    fn step_reports_overflow_as_none() {
        assert_eq!(GridCell::new(i64::MAX, 0).step(Heading::East), None);
    }

    // ------------------------------------------------------------------ Heading

    #[test]
    fn right_turns_cycle_clockwise() {
        assert_eq!(Heading::North.turned_right(), Heading::East);
        assert_eq!(Heading::East.turned_right(), Heading::South);
        assert_eq!(Heading::South.turned_right(), Heading::West);
        assert_eq!(Heading::West.turned_right(), Heading::North);
    }

    #[test]
    fn left_then_right_is_identity() {
        for heading in Heading::ALL {
            assert_eq!(heading.turned_left().turned_right(), heading);
            assert_eq!(heading.turned_right().turned_left(), heading);
        }
    }

    #[test]
    fn heading_parses_single_letter_codes() {
        for heading in Heading::ALL {
            assert_eq!(heading.to_string().parse::<Heading>(), Ok(heading));
        }
        assert_eq!(
            "Z".parse::<Heading>(),
            Err(RoverError::InvalidHeading("Z".to_string()))
        );
        assert!("n".parse::<Heading>().is_err());
    }

    #[test]
    fn heading_serializes_as_code() {
        let json = serde_json::to_string(&Heading::West).unwrap();
        assert_eq!(json, "\"W\"");
    }

    // ------------------------------------------------------------------ Instructions

    #[test]
    fn instructions_parse_valid_string() {
        let parsed: Instructions = "LMR".parse().unwrap();
        assert_eq!(
            parsed.as_slice(),
            &[Instruction::TurnLeft, Instruction::Move, Instruction::TurnRight]
        );
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.to_string(), "LMR");
    }

    #[test]
    fn empty_instructions_are_rejected() {
        assert_eq!(
            "".parse::<Instructions>(),
            Err(RoverError::InvalidInstructionSyntax {
                index: 0,
                instructions: String::new()
            })
        );
    }

    #[test]
    fn indexed_parse_names_the_rover() {
        assert_eq!(
            Instructions::parse_for(3, "MQ"),
            Err(RoverError::InvalidInstructionSyntax {
                index: 3,
                instructions: "MQ".to_string()
            })
        );
        assert_eq!(Instructions::parse_for(3, "MLR").map(|i| i.len()), Ok(3));
    }

    #[test]
    fn foreign_characters_are_rejected() {
        assert!("Z".parse::<Instructions>().is_err());
        assert!("MMMZ".parse::<Instructions>().is_err());
        assert!("mlr".parse::<Instructions>().is_err());
    }

    #[test]
    fn instructions_deserialize_from_text() {
        let parsed: Instructions = serde_json::from_str("\"MMRM\"").unwrap();
        assert_eq!(parsed.to_string(), "MMRM");
        assert!(serde_json::from_str::<Instructions>("\"MXM\"").is_err());
    }

    // ------------------------------------------------------------------ MovePolicy

    #[test]
    fn move_policy_defaults_to_fail() {
        assert_eq!(MovePolicy::default(), MovePolicy::Fail);
        assert_eq!("Clamp".parse::<MovePolicy>(), Ok(MovePolicy::Clamp));
        assert!("wrap".parse::<MovePolicy>().is_err());
    }

    // ------------------------------------------------------------------ RoverError

    #[test]
    fn only_runtime_errors_are_recoverable() {
        assert!(RoverError::OutOfBounds { x: 0, y: 6 }.is_recoverable());
        assert!(
            RoverError::Collision {
                rover_index: 1,
                x: 0,
                y: 1
            }
            .is_recoverable()
        );
        assert!(!RoverError::InvalidBound { max_x: 0, max_y: 5 }.is_recoverable());
        assert!(!RoverError::DuplicateStartPosition { x: 1, y: 1 }.is_recoverable());
    }

    #[test]
    fn collision_message_names_rover_and_cell() {
        let err = RoverError::Collision {
            rover_index: 1,
            x: 0,
            y: 1,
        };
        assert_eq!(
            err.to_string(),
            "Collision for Rover 1 would occur at 0 1. Keeping this rover stationary."
        );
    }

    #[test]
    fn construction_errors_carry_rejected_values() {
        assert!(
            RoverError::InvalidBound { max_x: 0, max_y: 5 }
                .to_string()
                .starts_with("Invalid plateau size 0 5")
        );
        assert!(
            RoverError::InvalidStartPosition { x: 9, y: 1 }
                .to_string()
                .starts_with("Invalid rover position 9 1")
        );
        let err = RoverError::InvalidInstructionSyntax {
            index: 1,
            instructions: "Q".to_string(),
        };
        assert!(err.to_string().contains("for rover 1"));
        assert!(err.to_string().contains("\"Q\""));
    }

    #[test]
    fn error_serialization_roundtrip() {
        let err = RoverError::DuplicateStartPosition { x: 2, y: 3 };
        let json = serde_json::to_string(&err).unwrap();
        let back: RoverError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
