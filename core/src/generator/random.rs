use super::*;

/// Purely random placement that only keeps the starting cell safe.
///
/// Each mine is drawn uniformly from the cells that are still free, without replacement, which is
/// done as a partial Fisher-Yates shuffle over the candidate indices.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, edge: Coord, mines: CellCount, start: Coord2) -> MineLayout {
        use rand::prelude::*;

        let excluded = linear_index(start, edge);
        let mut candidates: Vec<CellCount> =
            (0..area(edge)).filter(|&index| index != excluded).collect();
        assert!(
            usize::from(mines) <= candidates.len(),
            "cannot place {} mines next to a safe start on a {}x{} board",
            mines,
            edge,
            edge
        );

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mines = usize::from(mines);
        for placed in 0..mines {
            let pick = rng.random_range(placed..candidates.len());
            candidates.swap(placed, pick);
        }

        let mut mine_mask: Array2<bool> = Array2::default((edge, edge).to_nd_index());
        for &index in &candidates[..mines] {
            mine_mask[from_linear_index(index, edge).to_nd_index()] = true;
        }
        log::debug!(
            "placed {} mines on a {}x{} board, start {:?} kept safe (seed {})",
            mines,
            edge,
            edge,
            start,
            self.seed
        );

        MineLayout::from_square_mask(mine_mask)
    }
}
