/// Single coordinate axis, used for the board edge and for positions on it.
///
/// Boards are therefore at most 255 cells per side, so a cell count always fits a [`CellCount`].
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, that is `(column, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board with the given edge.
pub const fn area(edge: Coord) -> CellCount {
    let edge = edge as CellCount;
    edge.saturating_mul(edge)
}

/// Row-major linear index, `0` is the top-left cell.
pub const fn linear_index((x, y): Coord2, edge: Coord) -> CellCount {
    (y as CellCount) * (edge as CellCount) + (x as CellCount)
}

pub const fn from_linear_index(index: CellCount, edge: Coord) -> Coord2 {
    let edge = edge as CellCount;
    ((index % edge) as Coord, (index / edge) as Coord)
}

pub const fn in_bounds((x, y): Coord2, edge: Coord) -> bool {
    x < edge && y < edge
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the up-to-8 neighbors of `center` that lie on a square board of side `edge`.
///
/// Positions that would fall off the board are skipped rather than reported.
pub fn neighbors(center: Coord2, edge: Coord) -> impl Iterator<Item = Coord2> + use<> {
    let (x, y) = center;
    DISPLACEMENTS.into_iter().filter_map(move |(dx, dy)| {
        let pos = (x.checked_add_signed(dx)?, y.checked_add_signed(dy)?);
        in_bounds(pos, edge).then_some(pos)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_edge_and_center_neighbor_counts() {
        assert_eq!(neighbors((0, 0), 3).count(), 3);
        assert_eq!(neighbors((1, 0), 3).count(), 5);
        assert_eq!(neighbors((1, 1), 3).count(), 8);
        assert_eq!(neighbors((2, 2), 3).count(), 3);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), 1).count(), 0);
    }

    #[test]
    fn linear_index_is_row_major() {
        assert_eq!(linear_index((1, 2), 8), 17);
        assert_eq!(from_linear_index(17, 8), (1, 2));
        assert_eq!(area(20), 400);
    }
}
