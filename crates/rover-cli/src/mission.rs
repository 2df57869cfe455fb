//! Mission files – a plateau plus rover start lines and instruction strings.
//!
//! ```toml
//! plateau = "5 5"
//!
//! [[rovers]]
//! position = "1 2 N"
//! instructions = "LMLMLMLMM"
//!
//! [[rovers]]
//! position = "3 3 E"
//! instructions = "MMRMMRMRRM"
//! ```

use std::fs;
use std::path::Path;

use rover_navigation::{Navigation, RecordingReporter, Rover, RoverOutcome, StationaryReport};
use rover_types::{RoverError, validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mission {
    /// Upper-right plateau corner, e.g. `"5 5"`.
    pub plateau: String,
    #[serde(default)]
    pub rovers: Vec<MissionRover>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRover {
    /// Start cell and heading, e.g. `"1 2 N"`.
    pub position: String,
    pub instructions: String,
}

/// Final state of a mission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionReport {
    /// One `"x y H"` line per rover, in mission order.
    pub lines: Vec<String>,
    pub outcomes: Vec<RoverOutcome>,
    /// Every rover kept stationary, as reported during the pass.
    pub stationary: Vec<StationaryReport>,
}

impl MissionReport {
    /// Lines joined for display.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl Mission {
    /// Read a TOML mission file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read mission at {}: {}", path.display(), e))?;
        toml::from_str(&raw).map_err(|e| format!("Failed to parse mission: {}", e))
    }

    /// Validate every line and assemble a configured [`Navigation`].
    ///
    /// # Errors
    ///
    /// Any construction-time [`RoverError`]; nothing is navigated.
    pub fn build(&self, cfg: &Config) -> Result<Navigation, RoverError> {
        let bound = validation::parse_plateau(&self.plateau)?;

        let rovers = self
            .rovers
            .iter()
            .map(|rover| {
                let (x, y, heading) = validation::parse_rover_position(&rover.position, &bound)?;
                Rover::new(x, y, heading, bound)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let instructions: Vec<&str> = self
            .rovers
            .iter()
            .map(|rover| rover.instructions.trim())
            .collect();

        Ok(Navigation::new(bound, rovers, &instructions)?
            .with_policy(cfg.move_policy)
            .with_collision_checks(cfg.collision_checks))
    }
}

/// Run one navigation pass and collect the results.
///
/// Stationary rovers are captured by a [`RecordingReporter`] in place of the
/// coordinator's reporter, so the caller decides how to surface them.
pub fn run(navigation: Navigation) -> MissionReport {
    let recorder = RecordingReporter::new();
    let mut navigation = navigation.with_reporter(Box::new(recorder.clone()));
    let outcomes = navigation.navigate_rovers_with_outcomes();
    MissionReport {
        lines: navigation.positions_and_orientations(),
        outcomes,
        stationary: recorder.reports(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_types::MovePolicy;

    fn mission(plateau: &str, rovers: &[(&str, &str)]) -> Mission {
        Mission {
            plateau: plateau.to_string(),
            rovers: rovers
                .iter()
                .map(|(position, instructions)| MissionRover {
                    position: position.to_string(),
                    instructions: instructions.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn load_from_reads_toml_mission() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("mission.toml");
        std::fs::write(
            &path,
            r#"
plateau = "5 5"

[[rovers]]
position = "1 2 N"
instructions = "LMLMLMLMM"

[[rovers]]
position = "3 3 E"
instructions = "MMRMMRMRRM"
"#,
        )
        .expect("write");

        let loaded = Mission::load_from(&path).expect("load");
        assert_eq!(
            loaded,
            mission("5 5", &[("1 2 N", "LMLMLMLMM"), ("3 3 E", "MMRMMRMRRM")])
        );
    }

    #[test]
    fn load_from_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let err = Mission::load_from(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(err.contains("Failed to read mission"));
    }

    #[test]
    fn run_produces_final_lines() {
        let navigation = mission("5 5", &[("1 2 N", "LMLMLMLMM"), ("3 3 E", "MMRMMRMRRM")])
            .build(&Config::default())
            .expect("valid mission");
        let report = run(navigation);
        assert_eq!(report.render(), "1 3 N\n5 1 E");
        assert!(report.stationary.is_empty());
        assert!(report.outcomes.iter().all(|o| !o.is_stationary()));
    }

    #[test]
    fn stationary_rovers_are_listed_with_reasons() {
        let navigation = mission("5 5", &[("0 0 N", "MMMMMMMMMMMMMMMMMMMMMMMM")])
            .build(&Config::default())
            .expect("valid mission");
        let report = run(navigation);
        assert_eq!(report.render(), "0 0 N");
        assert_eq!(
            report.stationary,
            vec![StationaryReport {
                rover_index: 0,
                reason: RoverError::OutOfBounds { x: 0, y: 6 },
            }]
        );
        assert!(report.outcomes[0].is_stationary());
    }

    #[test]
    fn build_applies_configured_policy() {
        let cfg = Config {
            move_policy: MovePolicy::Clamp,
            ..Config::default()
        };
        let navigation = mission("5 5", &[("0 0 N", "MMMMMMMM")])
            .build(&cfg)
            .expect("valid mission");
        assert_eq!(run(navigation).render(), "0 5 N");
    }

    #[test]
    fn build_trims_instruction_whitespace() {
        let navigation = mission("5 5", &[("0 0 N", "  MRM \n")])
            .build(&Config::default())
            .expect("valid mission");
        assert_eq!(navigation.instructions()[0].to_string(), "MRM");
    }

    #[test]
    fn build_rejects_invalid_lines() {
        let cfg = Config::default();
        assert!(matches!(
            mission("0 0", &[]).build(&cfg),
            Err(RoverError::InvalidBound { max_x: 0, max_y: 0 })
        ));
        assert!(matches!(
            mission("5 5", &[("9 9 N", "M")]).build(&cfg),
            Err(RoverError::InvalidStartPosition { x: 9, y: 9 })
        ));
        assert!(matches!(
            mission("5 5", &[("1 1 Q", "M")]).build(&cfg),
            Err(RoverError::InvalidHeading(_))
        ));
        assert!(matches!(
            mission("5 5", &[("1 1 N", "M"), ("2 2 N", "MXM")]).build(&cfg),
            Err(RoverError::InvalidInstructionSyntax { index: 1, .. })
        ));
        assert!(matches!(
            mission("5 5", &[("1 1 N", "M"), ("1 1 E", "L")]).build(&cfg),
            Err(RoverError::DuplicateStartPosition { x: 1, y: 1 })
        ));
    }
}
