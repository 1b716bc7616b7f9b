use crate::*;
pub use game_over::*;
pub use menu::*;
pub use play::*;

mod game_over;
mod menu;
mod play;

pub const MENU_KEY: &str = "menu";
pub const PLAY_KEY: &str = "game";
pub const GAME_OVER_KEY: &str = "over";

/// Registers the main menu, the entry point of the flow.
pub fn start(registry: &mut Registry) -> Result<()> {
    registry.insert(MENU_KEY, Box::new(MenuPhase::new()))
}

/// Row picked by a primary click this frame, if it lands on one of `rows` items.
fn clicked_row(ctx: &Context<'_>, rows: usize) -> Option<usize> {
    if !ctx.input().primary_released() {
        return None;
    }
    let (_, row) = ctx.pointer()?;
    let row = usize::from(row);
    (row < rows).then_some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Snapshot {
        Blank,
        Menu(Vec<String>),
        Play { mines_remaining: i32, board: Board },
        GameOver(GameOverView),
    }

    #[derive(Default)]
    struct Recorder {
        frame: Vec<(String, Snapshot)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, key: &str, view: View<'_>) {
            let snapshot = match view {
                View::Blank => Snapshot::Blank,
                View::Menu(menu) => Snapshot::Menu(menu.items.to_vec()),
                View::Play(play) => Snapshot::Play {
                    mines_remaining: play.mines_remaining,
                    board: play.board.clone(),
                },
                View::GameOver(over) => Snapshot::GameOver(over),
            };
            self.frame.push((key.to_owned(), snapshot));
        }
    }

    struct Driver {
        registry: Registry,
        session: Session,
        input: InputEdgeTracker,
        recorder: Recorder,
    }

    impl Driver {
        fn new() -> Self {
            let mut registry = Registry::new();
            start(&mut registry).unwrap();
            let mut driver = Self {
                registry,
                session: Session::new(DifficultyTable::default(), 42),
                input: InputEdgeTracker::default(),
                recorder: Recorder::default(),
            };
            driver.idle();
            driver
        }

        fn frame(&mut self, pressed: MouseButtons, pointer: Option<Coord2>) {
            self.recorder.frame.clear();
            self.input.refresh(pressed);
            self.registry
                .update(
                    &mut self.session,
                    Frame::new(&self.input, pointer),
                    &mut self.recorder,
                )
                .unwrap();
        }

        fn idle(&mut self) {
            self.frame(MouseButtons::empty(), None);
        }

        fn press(&mut self, button: MouseButtons, pointer: Coord2) {
            self.frame(button, Some(pointer));
            self.frame(MouseButtons::empty(), Some(pointer));
        }

        fn click(&mut self, pointer: Coord2) {
            self.press(MouseButtons::PRIMARY, pointer);
        }

        fn flag(&mut self, pointer: Coord2) {
            self.press(MouseButtons::SECONDARY, pointer);
        }

        fn drawn(&self, key: &str) -> Option<&Snapshot> {
            self.recorder
                .frame
                .iter()
                .find(|(drawn_key, _)| drawn_key == key)
                .map(|(_, snapshot)| snapshot)
        }

        fn board(&self) -> Board {
            match self.drawn(PLAY_KEY) {
                Some(Snapshot::Play { board, .. }) => board.clone(),
                other => panic!("no board drawn: {other:?}"),
            }
        }

        /// Picks a difficulty from the menu and lets the play phase enter.
        fn start_game(&mut self, level: Coord) {
            self.click((0, level));
            self.idle();
            assert!(!self.registry.contains(MENU_KEY));
            assert_eq!(self.registry.status(PLAY_KEY), Some(Status::Active));
        }
    }

    fn mines(board: &Board) -> Vec<Coord2> {
        board
            .iter_cells()
            .filter(|(_, cell)| cell.content.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn menu_lists_difficulties_and_exit() {
        let mut driver = Driver::new();
        driver.idle();

        assert_eq!(
            driver.drawn(MENU_KEY),
            Some(&Snapshot::Menu(vec![
                "Easy".into(),
                "Medium".into(),
                "Hard".into(),
                "Exit".into(),
            ]))
        );
    }

    #[test]
    fn menu_exit_requests_quit() {
        let mut driver = Driver::new();

        driver.click((0, 3));
        assert!(driver.session.quit_requested());
        assert!(driver.registry.contains(MENU_KEY));
    }

    #[test]
    fn first_click_generates_a_safe_board() {
        let mut driver = Driver::new();
        driver.start_game(1);

        driver.click((4, 5));
        let board = driver.board();
        assert!(board.mines_placed());
        assert_eq!(board.edge_size(), 10);
        assert_eq!(mines(&board).len(), 20);
        assert!(board.cell_at((4, 5)).unwrap().is_revealed());
        assert!(!board.has_mine_at((4, 5)));
    }

    #[test]
    fn clicks_before_generation_only_count_when_primary_and_on_board() {
        let mut driver = Driver::new();
        driver.start_game(0);

        driver.flag((0, 0));
        driver.click((8, 0));
        let board = driver.board();
        assert!(!board.mines_placed());
        assert!(board.cell_at((0, 0)).unwrap().is_hidden());
    }

    #[test]
    fn flagging_all_mines_wins() {
        let mut driver = Driver::new();
        driver.start_game(0);
        driver.click((0, 0));
        let board = driver.board();

        let safe_hidden = board
            .iter_cells()
            .find(|(_, cell)| cell.is_hidden() && !cell.content.is_mine())
            .map(|(coords, _)| coords);
        if let Some(coords) = safe_hidden {
            // a misplaced flag neither counts nor blocks the win
            driver.flag(coords);
        }
        for coords in mines(&board) {
            assert!(driver.registry.contains(PLAY_KEY));
            driver.flag(coords);
        }
        assert_eq!(driver.registry.status(PLAY_KEY), Some(Status::PendingDelete));
        assert_eq!(driver.registry.status(GAME_OVER_KEY), Some(Status::PendingCreate));

        driver.idle();
        driver.idle();
        assert!(!driver.registry.contains(PLAY_KEY));
        assert_eq!(
            driver.drawn(GAME_OVER_KEY),
            Some(&Snapshot::GameOver(GameOverView {
                outcome: Outcome::Win,
                mines_found: 10,
            }))
        );
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut driver = Driver::new();
        driver.start_game(2);
        driver.click((10, 10));
        let board = driver.board();
        let mines = mines(&board);

        driver.flag(mines[0]);
        driver.flag(mines[1]);
        match driver.drawn(PLAY_KEY) {
            Some(Snapshot::Play { mines_remaining, .. }) => assert_eq!(*mines_remaining, 68),
            other => panic!("no board drawn: {other:?}"),
        }
        driver.click(mines[2]);
        driver.idle();
        driver.idle();

        assert_eq!(
            driver.drawn(GAME_OVER_KEY),
            Some(&Snapshot::GameOver(GameOverView {
                outcome: Outcome::Lose,
                mines_found: 2,
            }))
        );
    }

    #[test]
    fn game_over_exit_returns_to_menu() {
        let mut driver = Driver::new();
        driver.start_game(0);
        driver.click((0, 0));
        let board = driver.board();
        let mine = mines(&board)[0];
        driver.click(mine);
        driver.idle();

        driver.click((0, 1));
        assert_eq!(driver.registry.status(GAME_OVER_KEY), Some(Status::Active));

        driver.click((0, 0));
        driver.idle();
        assert!(!driver.registry.contains(GAME_OVER_KEY));
        assert_eq!(driver.registry.status(MENU_KEY), Some(Status::Active));
        assert_eq!(driver.registry.len(), 1);
    }
}
