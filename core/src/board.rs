use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square minefield as seen by the player, owned by the play phase.
///
/// A board starts empty and receives its mines on the first reveal, see [`Board::generate`]. Every
/// other mutating operation requires the mines to be placed first and panics otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_remaining: i32,
    mines_placed: bool,
    revealed_count: CellCount,
    correctly_flagged: CellCount,
    detonated: Option<Coord2>,
}

impl Board {
    pub fn new(difficulty: &Difficulty) -> Self {
        let edge = difficulty.edge_size();
        Self {
            cells: Array2::default((edge, edge).to_nd_index()),
            mine_count: difficulty.mine_count(),
            mines_remaining: i32::from(difficulty.mine_count()),
            mines_placed: false,
            revealed_count: 0,
            correctly_flagged: 0,
            detonated: None,
        }
    }

    pub fn edge_size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mines minus flags, negative once the player places more flags than there are mines.
    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Flags that sit on actual mines.
    pub fn correctly_flagged(&self) -> CellCount {
        self.correctly_flagged
    }

    pub fn all_mines_flagged(&self) -> bool {
        self.mines_placed && self.correctly_flagged == self.mine_count
    }

    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.edge_size())
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// `false` off the board.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cell_at(coords)
            .is_some_and(|cell| cell.content.is_mine())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.edge_size())
            .filter(|&pos| self.has_mine_at(pos))
            .count()
            .try_into()
            .unwrap()
    }

    /// Cells in row-major order, the order a renderer walks them in.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let edge = self.edge_size();
        (0..edge).flat_map(move |y| (0..edge).map(move |x| ((x, y), self.cells[(x, y).to_nd_index()])))
    }

    /// Places the mines, keeping `start` safe, and fills in the adjacency numbers.
    pub fn generate<G: MineGenerator>(&mut self, generator: G, start: Coord2) {
        assert!(!self.mines_placed, "mines are already placed on this board");
        let edge = self.edge_size();
        assert!(in_bounds(start, edge), "start {:?} is off a {}x{} board", start, edge, edge);

        let layout = generator.generate(edge, self.mine_count, start);
        assert_eq!(layout.edge(), edge, "layout does not match the board size");
        assert_eq!(
            layout.mine_count(),
            self.mine_count,
            "layout does not match the difficulty"
        );
        assert!(!layout.contains_mine(start), "start {:?} holds a mine", start);

        for (x, y) in layout.iter_mines() {
            self.cells[(x, y).to_nd_index()].content = Content::Mine;
        }
        for x in 0..edge {
            for y in 0..edge {
                let coords = (x, y);
                if layout[coords] {
                    continue;
                }
                self.cells[coords.to_nd_index()].content =
                    Content::from_adjacent_mines(layout.adjacent_mine_count(coords));
            }
        }
        self.mines_placed = true;
        log::debug!("board generated, start {:?}", start);
    }

    /// Reveals `coords` and, when it is empty, the whole connected empty region around it along
    /// with the numbered cells bordering that region.
    pub fn reveal_from(&mut self, coords: Coord2) -> RevealOutcome {
        self.check_mines_placed();

        let Some(cell) = self.cell_at(coords) else {
            return RevealOutcome::NoChange;
        };
        if !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }

        self.mark_revealed(coords);
        if cell.content.is_mine() {
            log::debug!("mine hit at {:?}", coords);
            self.detonated = Some(coords);
            return RevealOutcome::HitMine;
        }
        log::debug!("reveal at {:?}: {:?}", coords, cell.content);

        // visibility is the visited set: a cell is revealed before it is pushed
        let edge = self.edge_size();
        let mut to_visit = vec![coords];
        while let Some(visit_coords) = to_visit.pop() {
            if self.cells[visit_coords.to_nd_index()].content != Content::Empty {
                continue;
            }
            for pos in neighbors(visit_coords, edge) {
                if self.cells[pos.to_nd_index()].is_hidden() {
                    self.mark_revealed(pos);
                    log::trace!("flood revealed {:?}", pos);
                    to_visit.push(pos);
                }
            }
        }

        RevealOutcome::Revealed
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.check_mines_placed();

        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            return MarkOutcome::NoChange;
        };
        let on_mine = cell.content.is_mine();
        match cell.visibility {
            Visibility::Hidden => {
                cell.visibility = Visibility::Flagged;
                self.mines_remaining -= 1;
                if on_mine {
                    self.correctly_flagged += 1;
                }
            }
            Visibility::Flagged => {
                cell.visibility = Visibility::Hidden;
                self.mines_remaining += 1;
                if on_mine {
                    self.correctly_flagged -= 1;
                }
            }
            Visibility::Revealed => return MarkOutcome::NoChange,
        }
        log::debug!(
            "flag toggled at {:?}, {} mines remaining",
            coords,
            self.mines_remaining
        );
        MarkOutcome::Changed
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].visibility = Visibility::Revealed;
        self.revealed_count += 1;
    }

    fn check_mines_placed(&self) {
        assert!(self.mines_placed, "board used before its mines were placed");
    }
}
