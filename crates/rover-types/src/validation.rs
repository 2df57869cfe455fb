//! Pre-construction checks on raw operator input.
//!
//! The navigation engine assumes it receives well-formed numbers and
//! instruction strings. The predicates here are what front-ends run first,
//! and the `parse_*` helpers turn the line-oriented text format
//! (`"5 5"`, `"1 2 N"`, `"LMLMLMLMM"`) into typed values.

use crate::{Heading, Instructions, PlateauBound, RoverError};

/// Both components finite and strictly positive.
pub fn is_valid_plateau_size(x: f64, y: f64) -> bool {
    x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite()
}

/// Finite, non-negative and inside `bound` (edges included).
pub fn is_valid_start_position(x: f64, y: f64, bound: &PlateauBound) -> bool {
    x >= 0.0
        && y >= 0.0
        && x <= bound.max_x as f64
        && y <= bound.max_y as f64
        && x.is_finite()
        && y.is_finite()
}

pub fn is_valid_orientation(orientation: &str) -> bool {
    matches!(orientation, "N" | "E" | "S" | "W")
}

/// Every entry non-empty and made only of `M`, `L` and `R`.
pub fn is_valid_instructions<S: AsRef<str>>(instructions: &[S]) -> bool {
    instructions.iter().all(|instruction| {
        let instruction = instruction.as_ref();
        !instruction.is_empty() && instruction.chars().all(|c| matches!(c, 'M' | 'L' | 'R'))
    })
}

/// Parse a plateau line such as `"5 5"`.
///
/// # Errors
///
/// [`RoverError::InvalidBound`] when the line does not hold exactly two
/// positive whole numbers. The payload echoes whatever numbers were readable,
/// with `0` standing in for the rest.
pub fn parse_plateau(line: &str) -> Result<PlateauBound, RoverError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let invalid = || RoverError::InvalidBound {
        max_x: reported(&tokens, 0),
        max_y: reported(&tokens, 1),
    };
    let [x, y] = tokens.as_slice() else {
        return Err(invalid());
    };
    let (Some(x), Some(y)) = (parse_number(x), parse_number(y)) else {
        return Err(invalid());
    };
    if !is_valid_plateau_size(x, y) {
        return Err(invalid());
    }
    match (whole(x), whole(y)) {
        (Some(max_x), Some(max_y)) => Ok(PlateauBound::new(max_x, max_y)),
        _ => Err(invalid()),
    }
}

/// Parse a rover line such as `"1 2 N"` against `bound`.
///
/// # Errors
///
/// - [`RoverError::InvalidStartPosition`] – malformed line or coordinates
///   outside the plateau.
/// - [`RoverError::InvalidHeading`] – the third token is not `N`, `E`, `S` or `W`.
pub fn parse_rover_position(
    line: &str,
    bound: &PlateauBound,
) -> Result<(i64, i64, Heading), RoverError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let invalid = || RoverError::InvalidStartPosition {
        x: reported(&tokens, 0),
        y: reported(&tokens, 1),
    };
    let [x, y, heading] = tokens.as_slice() else {
        return Err(invalid());
    };
    let (Some(x), Some(y)) = (parse_number(x), parse_number(y)) else {
        return Err(invalid());
    };
    if !is_valid_start_position(x, y, bound) {
        return Err(invalid());
    }
    if !is_valid_orientation(heading) {
        return Err(RoverError::InvalidHeading((*heading).to_string()));
    }
    match (whole(x), whole(y)) {
        (Some(x), Some(y)) => Ok((x, y, heading.parse()?)),
        _ => Err(invalid()),
    }
}

/// Parse the instruction line of rover `index`, ignoring surrounding
/// whitespace.
pub fn parse_instructions(index: usize, line: &str) -> Result<Instructions, RoverError> {
    Instructions::parse_for(index, line.trim())
}

/// Best-effort integer view of `tokens[position]` for error payloads.
fn reported(tokens: &[&str], position: usize) -> i64 {
    tokens
        .get(position)
        .and_then(|token| parse_number(token))
        .filter(|value| value.is_finite())
        .map_or(0, |value| value as i64)
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

/// Whole-number view of `value`; `None` for fractions and values outside `i64`.
fn whole(value: f64) -> Option<i64> {
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}
