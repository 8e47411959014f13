//! Points-to-stage progression ladder.
//!
//! # Responsibility
//! - Map a signed point total onto the ordered "sky" stages.
//! - Compute progress toward the next stage.
//!
//! # Invariants
//! - Stage thresholds start at 0 and strictly increase.
//! - Stage is a pure function of points and is never persisted.
//! - A total equal to a threshold belongs to that threshold's stage.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reference ladder: (name, minimum points).
const REFERENCE_STAGES: [(&str, i64); 8] = [
    ("Ground Level", 0),
    ("First Sky", 11),
    ("Second Sky", 77),
    ("Third Sky", 222),
    ("Fourth Sky", 777),
    ("Fifth Sky", 1555),
    ("Sixth Sky", 3333),
    ("Seventh Sky", 7777),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Ordinal position in the ladder.
    pub id: usize,
    pub name: String,
    pub min_points: i64,
}

/// Ladder construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    Empty,
    FirstThresholdNotZero(i64),
    NotIncreasing {
        index: usize,
        previous: i64,
        current: i64,
    },
}

impl Display for LadderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "stage ladder must contain at least one stage"),
            Self::FirstThresholdNotZero(value) => {
                write!(f, "first stage threshold must be 0, got {value}")
            }
            Self::NotIncreasing {
                index,
                previous,
                current,
            } => write!(
                f,
                "stage {index} threshold {current} must be greater than {previous}"
            ),
        }
    }
}

impl Error for LadderError {}

/// Where a point total sits on the ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress<'a> {
    pub points: i64,
    pub current: &'a Stage,
    pub next: Option<&'a Stage>,
    /// Progress toward `next` in `[0, 100]`; `100` on the last stage.
    pub percent: f64,
}

/// Ordered, validated stage thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLadder {
    stages: Vec<Stage>,
}

impl Default for StageLadder {
    fn default() -> Self {
        Self {
            stages: REFERENCE_STAGES
                .iter()
                .enumerate()
                .map(|(id, (name, min_points))| Stage {
                    id,
                    name: (*name).to_string(),
                    min_points: *min_points,
                })
                .collect(),
        }
    }
}

impl StageLadder {
    /// Builds a ladder from `(name, min_points)` pairs in display order.
    ///
    /// # Errors
    /// - `Empty` when no stages are given.
    /// - `FirstThresholdNotZero` when the lowest stage does not start at 0.
    /// - `NotIncreasing` when thresholds are not strictly increasing.
    pub fn new<N: Into<String>>(
        stages: impl IntoIterator<Item = (N, i64)>,
    ) -> Result<Self, LadderError> {
        let stages: Vec<Stage> = stages
            .into_iter()
            .enumerate()
            .map(|(id, (name, min_points))| Stage {
                id,
                name: name.into(),
                min_points,
            })
            .collect();

        let first = stages.first().ok_or(LadderError::Empty)?;
        if first.min_points != 0 {
            return Err(LadderError::FirstThresholdNotZero(first.min_points));
        }
        for pair in stages.windows(2) {
            if pair[1].min_points <= pair[0].min_points {
                return Err(LadderError::NotIncreasing {
                    index: pair[1].id,
                    previous: pair[0].min_points,
                    current: pair[1].min_points,
                });
            }
        }

        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage with the greatest threshold `<= points`, or the first stage when
    /// `points` is below every threshold.
    pub fn current_stage(&self, points: i64) -> &Stage {
        self.stages
            .iter()
            .rev()
            .find(|stage| points >= stage.min_points)
            .unwrap_or(&self.stages[0])
    }

    pub fn next_stage(&self, current: &Stage) -> Option<&Stage> {
        self.stages.get(current.id + 1)
    }

    pub fn progress(&self, points: i64) -> Progress<'_> {
        let current = self.current_stage(points);
        let next = self.next_stage(current);
        let percent = match next {
            Some(next) => {
                let span = (next.min_points - current.min_points) as f64;
                let earned = (points - current.min_points) as f64;
                (earned / span * 100.0).clamp(0.0, 100.0)
            }
            None => 100.0,
        };

        Progress {
            points,
            current,
            next,
            percent,
        }
    }
}
