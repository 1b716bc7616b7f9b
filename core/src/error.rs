use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Difficulty {name:?} cannot fit {mines} mines on a {edge}x{edge} board")]
    InvalidDifficulty {
        name: String,
        mines: CellCount,
        edge: Coord,
    },
    #[error("Mine layout must be square with at most 255 cells per side, got {width}x{height}")]
    InvalidLayout { width: usize, height: usize },
    #[error("Difficulty table is empty")]
    EmptyDifficultyTable,
    #[error("Phase key {0:?} is already registered")]
    PhaseKeyOccupied(String),
}

pub type Result<T> = core::result::Result<T, Error>;
