use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::GridSize;

/// Reasons a level table or a single level profile is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level {level}: move interval must be a positive number of seconds, got {value}")]
    MoveInterval { level: usize, value: f32 },

    #[error("level {level}: {name} must be a positive number of seconds, got {value}")]
    CycleTiming {
        level: usize,
        name: &'static str,
        value: f32,
    },

    #[error("level {level}: {bounds} bounds do not fit the starting snake")]
    BoundsTooSmall { level: usize, bounds: GridSize },

    #[error("level {level}: wall floor {floor} must stay below the initial {bounds} bounds")]
    FloorNotBelowBounds {
        level: usize,
        floor: GridSize,
        bounds: GridSize,
    },

    #[error("level {level}: wall floor {floor} is below the {minimum} minimum")]
    FloorTooSmall {
        level: usize,
        floor: GridSize,
        minimum: GridSize,
    },

    #[error("level table is empty")]
    NoLevels,

    #[error("no level {0} in the level table")]
    UnknownLevel(usize),

    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse level file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
