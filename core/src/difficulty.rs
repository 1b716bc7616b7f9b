use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named board preset. Boards are always square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    name: String,
    #[serde(rename = "mines")]
    mine_count: CellCount,
    #[serde(rename = "edge")]
    edge_size: Coord,
}

impl Difficulty {
    /// Builds a preset without checking that the mines fit, callers must keep `mine_count < edge_size²`.
    pub fn new_unchecked(name: impl Into<String>, mine_count: CellCount, edge_size: Coord) -> Self {
        Self {
            name: name.into(),
            mine_count,
            edge_size,
        }
    }

    pub fn new(name: impl Into<String>, mine_count: CellCount, edge_size: Coord) -> Result<Self> {
        let difficulty = Self::new_unchecked(name, mine_count, edge_size);
        difficulty.validate()?;
        Ok(difficulty)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn edge_size(&self) -> Coord {
        self.edge_size
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.edge_size)
    }

    /// There must be at least one mine and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.edge_size == 0 || self.mine_count == 0 || self.mine_count >= self.total_cells() {
            return Err(Error::InvalidDifficulty {
                name: self.name.clone(),
                mines: self.mine_count,
                edge: self.edge_size,
            });
        }
        Ok(())
    }
}

/// Ordered, read-only set of presets, selected by index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifficultyTable {
    entries: Vec<Difficulty>,
}

impl DifficultyTable {
    pub fn new(entries: Vec<Difficulty>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyDifficultyTable);
        }
        for entry in &entries {
            entry.validate()?;
        }
        log::debug!("difficulty table with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Difficulty> {
        self.entries.iter()
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            entries: vec![
                Difficulty::new_unchecked("Easy", 10, 8),
                Difficulty::new_unchecked("Medium", 20, 10),
                Difficulty::new_unchecked("Hard", 70, 20),
            ],
        }
    }
}

/// Selecting a preset that does not exist is a bug in the caller, so this panics.
impl Index<usize> for DifficultyTable {
    type Output = Difficulty;

    fn index(&self, index: usize) -> &Self::Output {
        match self.entries.get(index) {
            Some(difficulty) => difficulty,
            None => panic!(
                "difficulty index {} out of range, table has {} entries",
                index,
                self.entries.len()
            ),
        }
    }
}
