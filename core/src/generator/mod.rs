use core::ops::Index;
use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Strategy used by [`Board::generate`] to decide where the mines go.
///
/// Implementations must keep `start` free of mines and place exactly `mines` of them.
pub trait MineGenerator {
    fn generate(self, edge: Coord, mines: CellCount, start: Coord2) -> MineLayout;
}

/// Mine positions on a square board.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Fails unless the mask is square and its edge fits a [`Coord`].
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (width, height) = mine_mask.dim();
        if width != height || Coord::try_from(width).is_err() {
            return Err(Error::InvalidLayout { width, height });
        }
        Ok(Self::from_square_mask(mine_mask))
    }

    /// Caller guarantees a square mask of at most `Coord::MAX` per side.
    fn from_square_mask(mine_mask: Array2<bool>) -> Self {
        // at most 255² mines, always fits a CellCount
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Out-of-bounds coordinates are skipped with a warning.
    pub fn from_mine_coords(edge: Coord, mine_coords: &[Coord2]) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default((edge, edge).to_nd_index());
        for &coords in mine_coords {
            if in_bounds(coords, edge) {
                mine_mask[coords.to_nd_index()] = true;
            } else {
                log::warn!("ignoring mine at {:?} outside a {}x{} layout", coords, edge, edge);
            }
        }
        Self::from_square_mask(mine_mask)
    }

    pub fn edge(&self) -> Coord {
        self.mine_mask.dim().0.try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// `false` for coordinates outside the layout.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.edge())
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// A fixed layout generates itself, the requested size and start are checked by the board.
impl MineGenerator for MineLayout {
    fn generate(self, _edge: Coord, _mines: CellCount, _start: Coord2) -> MineLayout {
        self
    }
}
