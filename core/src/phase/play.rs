use web_time::Instant;

use super::*;

/// A single game on one difficulty.
///
/// The board is created empty on enter and receives its mines on the first primary click, so the
/// first revealed cell is always safe. The phase replaces itself with a [`GameOverPhase`] as soon
/// as a mine is revealed or every mine carries a flag.
#[derive(Debug)]
pub struct PlayPhase {
    level: usize,
    difficulty: String,
    board: Option<Board>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    outcome: Option<Outcome>,
}

impl PlayPhase {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            difficulty: String::new(),
            board: None,
            started_at: None,
            ended_at: None,
            outcome: None,
        }
    }

    /// How many seconds have passed since the first reveal, 0 if there was none yet
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            let until = self.ended_at.unwrap_or_else(Instant::now);
            until.duration_since(started_at).as_secs().try_into().unwrap_or(u32::MAX)
        } else {
            0
        }
    }

    fn handle_click(board: &mut Board, ctx: &mut Context<'_>, coords: Coord2) -> bool {
        let input = *ctx.input();
        if input.primary_released() {
            if !board.mines_placed() {
                let seed = ctx.session_mut().next_seed();
                board.generate(RandomMineGenerator::new(seed), coords);
            }
            board.reveal_from(coords).has_update()
        } else if input.secondary_released() {
            if !board.mines_placed() {
                log::debug!("flag at {:?} ignored before the first reveal", coords);
                return false;
            }
            board.toggle_flag(coords).has_update()
        } else {
            false
        }
    }

    fn evaluate(board: &Board) -> Option<Outcome> {
        if board.detonated().is_some() {
            Some(Outcome::Lose)
        } else if board.all_mines_flagged() {
            Some(Outcome::Win)
        } else {
            None
        }
    }
}

impl Phase for PlayPhase {
    fn on_enter(&mut self, ctx: &mut Context<'_>) {
        let difficulty = &ctx.difficulties()[self.level];
        log::debug!(
            "new game: {} ({}x{}, {} mines)",
            difficulty.name(),
            difficulty.edge_size(),
            difficulty.edge_size(),
            difficulty.mine_count()
        );
        self.difficulty = difficulty.name().to_owned();
        self.board = Some(Board::new(difficulty));
    }

    fn step(&mut self, ctx: &mut Context<'_>) {
        if self.outcome.is_some() {
            return;
        }
        let Some(board) = self.board.as_mut() else {
            log::warn!("play phase stepped without a board");
            return;
        };
        let Some(coords) = ctx.pointer().filter(|&coords| board.contains(coords)) else {
            return;
        };

        let was_placed = board.mines_placed();
        if !Self::handle_click(board, ctx, coords) {
            return;
        }
        if !was_placed && board.mines_placed() {
            self.started_at = Some(Instant::now());
        }

        let Some(outcome) = Self::evaluate(board) else {
            return;
        };
        let mines_found = board.correctly_flagged();
        log::debug!("game ended: {:?}, {} mines found", outcome, mines_found);
        self.outcome = Some(outcome);
        self.ended_at = Some(Instant::now());
        ctx.erase(PLAY_KEY);
        ctx.insert(
            GAME_OVER_KEY,
            Box::new(GameOverPhase::new(outcome, mines_found)),
        );
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_>) {
        self.board = None;
    }

    fn view(&self) -> View<'_> {
        match &self.board {
            Some(board) => View::Play(PlayView {
                difficulty: &self.difficulty,
                mines_remaining: board.mines_remaining(),
                elapsed_secs: self.elapsed_secs(),
                board,
            }),
            None => View::Blank,
        }
    }
}
