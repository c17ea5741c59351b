// ABOUTME: Execution stage definitions and ordering for the task workflow
// ABOUTME: Defines the six stages, their rank along the main line, and name parsing

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ParseError;

/// One node in the fixed execution workflow.
///
/// Stages form a single forward line from `NotStarted` to `Completed`;
/// `Review` is a side branch reachable only from `LiveDone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NotStarted,
    Started,
    LocalDone,
    LiveDone,
    Review,
    Completed,
}

impl Stage {
    /// All stages, in rank order with the review branch beside live_done.
    pub const ALL: [Stage; 6] = [
        Stage::NotStarted,
        Stage::Started,
        Stage::LocalDone,
        Stage::LiveDone,
        Stage::Review,
        Stage::Completed,
    ];

    /// Position along the main execution line, 0..=4.
    /// Review does not advance past live_done.
    pub fn rank(&self) -> u8 {
        match self {
            Stage::NotStarted => 0,
            Stage::Started => 1,
            Stage::LocalDone => 2,
            Stage::LiveDone => 3,
            Stage::Review => 3,
            Stage::Completed => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::NotStarted => "not_started",
            Stage::Started => "started",
            Stage::LocalDone => "local_done",
            Stage::LiveDone => "live_done",
            Stage::Review => "review",
            Stage::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Stage::NotStarted),
            "started" => Ok(Stage::Started),
            "local_done" => Ok(Stage::LocalDone),
            "live_done" => Ok(Stage::LiveDone),
            "review" => Ok(Stage::Review),
            "completed" => Ok(Stage::Completed),
            other => Err(ParseError::UnknownStage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert_eq!(Stage::NotStarted.rank(), 0);
        assert_eq!(Stage::Started.rank(), 1);
        assert_eq!(Stage::LocalDone.rank(), 2);
        assert_eq!(Stage::LiveDone.rank(), 3);
        assert_eq!(Stage::Completed.rank(), 4);

        // The review branch never advances past live_done
        assert_eq!(Stage::Review.rank(), Stage::LiveDone.rank());
    }

    #[test]
    fn test_stage_name_round_trip() {
        for stage in Stage::ALL {
            let parsed: Stage = stage.as_str().parse().unwrap();
            assert_eq!(parsed, stage);
        }
    }

    #[test]
    fn test_unknown_stage_name() {
        let err = "shipped".parse::<Stage>().unwrap_err();
        assert!(err.to_string().contains("shipped"));
    }

    #[test]
    fn test_stage_serde_names() {
        let yaml = serde_yaml::to_string(&Stage::LocalDone).unwrap();
        assert!(yaml.contains("local_done"));

        let parsed: Stage = serde_yaml::from_str("live_done").unwrap();
        assert_eq!(parsed, Stage::LiveDone);
    }
}
