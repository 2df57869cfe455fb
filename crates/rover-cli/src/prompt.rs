//! Interactive mission entry.
//!
//! Asks for the plateau, the number of rovers, then each rover's start line
//! and instructions.  Invalid answers are explained and asked again; nothing
//! reaches the navigation engine until every line has passed validation.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use rover_types::validation;

use crate::mission::{Mission, MissionRover};

/// Collect a complete [`Mission`] from `input`, writing prompts to `output`.
///
/// # Errors
///
/// I/O errors from either stream, or [`io::ErrorKind::UnexpectedEof`] when
/// `input` ends before the mission is complete.
pub fn collect_mission<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Mission> {
    let (plateau, bound) = ask(input, output, "Plateau size (e.g. 5 5): ", |line| {
        validation::parse_plateau(line)
            .map(|bound| (bound.to_string(), bound))
            .map_err(|e| e.to_string())
    })?;

    // Rovers start on distinct cells, so the plateau caps the count.
    let cells = (bound.max_x as u128 + 1) * (bound.max_y as u128 + 1);
    let count = ask(input, output, "Number of rovers: ", |line| {
        match line.trim().parse::<usize>() {
            Ok(n) if n > 0 && n as u128 <= cells => Ok(n),
            _ => Err(format!("Enter a whole number between 1 and {cells}")),
        }
    })?;

    let mut taken = HashSet::new();
    let mut rovers = Vec::new();
    for index in 0..count {
        let (x, y, heading) = ask(
            input,
            output,
            &format!("Rover {index} position (e.g. 1 2 N): "),
            |line| {
                let (x, y, heading) =
                    validation::parse_rover_position(line, &bound).map_err(|e| e.to_string())?;
                if taken.contains(&(x, y)) {
                    return Err(format!("Another rover already starts at {x},{y}"));
                }
                Ok((x, y, heading))
            },
        )?;
        taken.insert((x, y));

        let instructions = ask(
            input,
            output,
            &format!("Rover {index} instructions (e.g. LMLMLMLMM): "),
            |line| {
                validation::parse_instructions(index, line)
                    .map(|parsed| parsed.to_string())
                    .map_err(|e| e.to_string())
            },
        )?;

        rovers.push(MissionRover {
            position: format!("{x} {y} {heading}"),
            instructions,
        });
    }

    Ok(Mission { plateau, rovers })
}

/// Prompt until `parse` accepts a line.
fn ask<R, W, T, F>(input: &mut R, output: &mut W, prompt: &str, mut parse: F) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, String>,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the mission was complete",
            ));
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(output, "  {} {}", "✗".red(), message)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(script: &str) -> (io::Result<Mission>, String) {
        let mut input = io::Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = collect_mission(&mut input, &mut output);
        (result, String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn collects_a_complete_mission() {
        let (result, _) = collect("5 5\n2\n1 2 N\nLMLMLMLMM\n3 3 E\nMMRMMRMRRM\n");
        let mission = result.expect("mission");
        assert_eq!(mission.plateau, "5 5");
        assert_eq!(mission.rovers.len(), 2);
        assert_eq!(mission.rovers[0].position, "1 2 N");
        assert_eq!(mission.rovers[1].instructions, "MMRMMRMRRM");
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let (result, output) = collect("0 0\n5 5\nzero\n1\n9 9 N\n0 0 Z\n0 0 N\n\nMXM\nMM\n");
        let mission = result.expect("mission");
        assert_eq!(mission.rovers[0].position, "0 0 N");
        assert_eq!(mission.rovers[0].instructions, "MM");
        assert!(output.contains("Invalid plateau size"));
        assert!(output.contains("Enter a whole number between 1 and 36"));
        assert!(output.contains("Invalid rover position"));
        assert!(output.contains("Invalid rover orientation"));
        assert!(output.contains("must be a string of M, L, R"));
    }

    #[test]
    fn duplicate_start_cells_are_refused() {
        let (result, output) = collect("5 5\n2\n1 1 N\nM\n1 1 E\n2 2 E\nM\n");
        let mission = result.expect("mission");
        assert_eq!(mission.rovers[1].position, "2 2 E");
        assert!(output.contains("Another rover already starts at 1,1"));
    }

    #[test]
    fn early_end_of_input_is_an_error() {
        let (result, _) = collect("5 5\n1\n");
        let err = result.expect_err("incomplete input");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn rover_count_is_capped_by_plateau_cells() {
        let (result, output) = collect("1 1\n18446744073709551615\n5\n4\n");
        let err = result.expect_err("input ends before any rover line");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(
            output.matches("Enter a whole number between 1 and 4").count(),
            2
        );
    }

    #[test]
    fn collected_mission_runs() {
        let (result, _) = collect("5 5\n1\n2 2 E\nMLMLMRMRM\n");
        let navigation = result
            .expect("mission")
            .build(&crate::config::Config::default())
            .expect("valid");
        assert_eq!(crate::mission::run(navigation).render(), "3 4 E");
    }
}
