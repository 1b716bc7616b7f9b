use serde::Serialize;

use crate::*;

/// Render data handed to the [`Renderer`], borrowed from the phase that produced it.
#[derive(Copy, Clone, Debug, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum View<'a> {
    Blank,
    Menu(MenuView<'a>),
    Play(PlayView<'a>),
    GameOver(GameOverView),
}

/// Selectable rows, row `i` is picked by a primary click with the pointer on row `i`.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct MenuView<'a> {
    pub items: &'a [String],
}

#[derive(Copy, Clone, Debug, Serialize)]
pub struct PlayView<'a> {
    pub difficulty: &'a str,
    pub mines_remaining: i32,
    pub elapsed_secs: u32,
    #[serde(skip)]
    pub board: &'a Board,
}

impl PlayView<'_> {
    /// Tiles row by row, hidden cells masked unless `reveal_all` is set.
    pub fn tiles(&self, reveal_all: bool) -> Vec<Vec<Tile>> {
        let edge = self.board.edge_size();
        let detonated = self.board.detonated();
        (0..edge)
            .map(|y| {
                (0..edge)
                    .map(|x| {
                        let cell = self.board.cell_at((x, y)).unwrap_or_default();
                        Tile::for_cell(cell, detonated == Some((x, y)), reveal_all)
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameOverView {
    pub outcome: Outcome,
    pub mines_found: CellCount,
}

/// Which picture a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Unknown,
    Flag,
    Empty,
    Number(u8),
    Mine,
    Detonated,
}

impl Tile {
    pub fn for_cell(cell: Cell, detonated: bool, reveal_all: bool) -> Self {
        use Visibility::*;
        match cell.visibility {
            Flagged if !reveal_all => Tile::Flag,
            Hidden if !reveal_all => Tile::Unknown,
            _ => match cell.content {
                Content::Empty => Tile::Empty,
                Content::Number(count) => Tile::Number(count),
                Content::Mine if detonated => Tile::Detonated,
                Content::Mine => Tile::Mine,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_mask_hidden_cells() {
        let layout = MineLayout::from_mine_coords(2, &[(0, 0)]);
        let mut board = Board::new(&Difficulty::new_unchecked("t", 1, 2));
        board.generate(layout, (1, 1));
        board.reveal_from((1, 1));
        board.toggle_flag((1, 0));

        let view = PlayView {
            difficulty: "t",
            mines_remaining: board.mines_remaining(),
            elapsed_secs: 0,
            board: &board,
        };
        assert_eq!(
            view.tiles(false),
            vec![
                vec![Tile::Unknown, Tile::Flag],
                vec![Tile::Unknown, Tile::Number(1)],
            ]
        );
        assert_eq!(
            view.tiles(true),
            vec![
                vec![Tile::Mine, Tile::Number(1)],
                vec![Tile::Number(1), Tile::Number(1)],
            ]
        );
    }

    #[test]
    fn detonated_mine_is_marked() {
        let layout = MineLayout::from_mine_coords(2, &[(0, 0)]);
        let mut board = Board::new(&Difficulty::new_unchecked("t", 1, 2));
        board.generate(layout, (1, 1));
        board.reveal_from((0, 0));

        let cell = board.cell_at((0, 0)).unwrap();
        assert_eq!(Tile::for_cell(cell, true, false), Tile::Detonated);
        assert_eq!(Tile::for_cell(cell, false, false), Tile::Mine);
    }

    #[test]
    fn views_serialize_with_phase_tag() {
        let view = View::GameOver(GameOverView {
            outcome: Outcome::Win,
            mines_found: 10,
        });
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["phase"], "game_over");
        assert_eq!(json["outcome"], "win");
        assert_eq!(json["mines_found"], 10);
    }
}
