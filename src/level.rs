use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::snake::START_BODY;
use crate::timer::CycleConfig;

/// Bounds every level starts from.
pub const DEFAULT_BOUNDS: GridSize = GridSize::new(23, 18);

/// Smallest wall floor a shrinking level may configure.
pub const MIN_FLOOR: GridSize = GridSize::new(5, 5);

/// Bonus apple cycle shared by the built-in levels.
pub const DEFAULT_BONUS_CYCLE: CycleConfig = CycleConfig {
    interval: 10.0,
    visible_for: 3.0,
};

/// Bomb cycle used by the built-in hazard levels.
pub const DEFAULT_HAZARD_CYCLE: CycleConfig = CycleConfig {
    interval: 8.0,
    visible_for: 3.0,
};

/// Wall-shrink cadence and the bounds it stops at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShrinkConfig {
    pub interval: f32,
    #[serde(default = "default_floor")]
    pub floor: GridSize,
}

fn default_floor() -> GridSize {
    MIN_FLOOR
}

/// Immutable per-level rules consumed by a round.
///
/// Optional systems are `None` when disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelProfile {
    pub name: String,
    /// Seconds per grid step.
    pub move_interval: f32,
    pub small_score: u32,
    pub bonus_score: u32,
    pub bounds: GridSize,
    pub bonus: CycleConfig,
    pub hazard: Option<CycleConfig>,
    pub shrink: Option<ShrinkConfig>,
}

impl Default for LevelProfile {
    fn default() -> Self {
        Self {
            name: "Level 1".to_owned(),
            move_interval: 0.15,
            small_score: 1,
            bonus_score: 2,
            bounds: DEFAULT_BOUNDS,
            bonus: DEFAULT_BONUS_CYCLE,
            hazard: None,
            shrink: None,
        }
    }
}

impl LevelProfile {
    /// Returns true when bombs cycle in and out on this level.
    #[must_use]
    pub fn hazard_enabled(&self) -> bool {
        self.hazard.is_some()
    }

    /// Returns true when the walls close in on this level.
    #[must_use]
    pub fn shrink_enabled(&self) -> bool {
        self.shrink.is_some()
    }

    /// Checks the profile can host a round; `level` is the 1-based number
    /// used in error messages.
    pub fn validate(&self, level: usize) -> Result<(), ConfigError> {
        if !is_positive_seconds(self.move_interval) {
            return Err(ConfigError::MoveInterval {
                level,
                value: self.move_interval,
            });
        }

        check_cycle(level, "bonus interval", self.bonus.interval)?;
        check_cycle(level, "bonus visible duration", self.bonus.visible_for)?;
        if let Some(hazard) = self.hazard {
            check_cycle(level, "hazard interval", hazard.interval)?;
            check_cycle(level, "hazard visible duration", hazard.visible_for)?;
        }

        if !START_BODY.iter().all(|cell| cell.is_within_bounds(self.bounds))
            || self.bounds.total_cells() <= START_BODY.len()
        {
            return Err(ConfigError::BoundsTooSmall {
                level,
                bounds: self.bounds,
            });
        }

        if let Some(shrink) = self.shrink {
            check_cycle(level, "shrink interval", shrink.interval)?;

            if !shrink.floor.covers(MIN_FLOOR) {
                return Err(ConfigError::FloorTooSmall {
                    level,
                    floor: shrink.floor,
                    minimum: MIN_FLOOR,
                });
            }

            if shrink.floor.width >= self.bounds.width || shrink.floor.height >= self.bounds.height
            {
                return Err(ConfigError::FloorNotBelowBounds {
                    level,
                    floor: shrink.floor,
                    bounds: self.bounds,
                });
            }
        }

        Ok(())
    }
}

fn is_positive_seconds(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_cycle(level: usize, name: &'static str, value: f32) -> Result<(), ConfigError> {
    if is_positive_seconds(value) {
        Ok(())
    } else {
        Err(ConfigError::CycleTiming { level, name, value })
    }
}

/// Ordered set of playable levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<LevelProfile>,
}

impl LevelTable {
    /// The three stock levels: plain, bombs, bombs plus shrinking walls.
    #[must_use]
    pub fn builtin() -> Self {
        let level_one = LevelProfile::default();
        let level_two = LevelProfile {
            name: "Level 2".to_owned(),
            move_interval: 0.1,
            small_score: 2,
            bonus_score: 4,
            hazard: Some(DEFAULT_HAZARD_CYCLE),
            ..LevelProfile::default()
        };
        let level_three = LevelProfile {
            name: "Level 3".to_owned(),
            move_interval: 0.1,
            small_score: 3,
            bonus_score: 6,
            hazard: Some(DEFAULT_HAZARD_CYCLE),
            shrink: Some(ShrinkConfig {
                interval: 5.0,
                floor: MIN_FLOOR,
            }),
            ..LevelProfile::default()
        };

        Self {
            levels: vec![level_one, level_two, level_three],
        }
    }

    /// Builds a validated table; an invalid profile rejects the whole table.
    pub fn new(levels: Vec<LevelProfile>) -> Result<Self, ConfigError> {
        let table = Self { levels };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }

        for (index, profile) in self.levels.iter().enumerate() {
            profile.validate(index + 1)?;
        }

        Ok(())
    }

    /// Returns the profile at a 0-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LevelProfile> {
        self.levels.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns true when `index` is the last level (no "next level" exists).
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelProfile> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::builtin()
    }
}
