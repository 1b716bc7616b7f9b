use super::*;

/// End-of-game summary. Its only row, `0`, is the exit back to the menu.
#[derive(Debug)]
pub struct GameOverPhase {
    outcome: Outcome,
    mines_found: CellCount,
}

impl GameOverPhase {
    pub fn new(outcome: Outcome, mines_found: CellCount) -> Self {
        Self {
            outcome,
            mines_found,
        }
    }
}

impl Phase for GameOverPhase {
    fn on_enter(&mut self, _ctx: &mut Context<'_>) {
        log::info!(
            "you {}, {} mines found",
            match self.outcome {
                Outcome::Win => "win",
                Outcome::Lose => "lose",
            },
            self.mines_found
        );
    }

    fn step(&mut self, ctx: &mut Context<'_>) {
        if clicked_row(ctx, 1).is_some() {
            ctx.erase(GAME_OVER_KEY);
            ctx.insert(MENU_KEY, Box::new(MenuPhase::new()));
        }
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_>) {}

    fn view(&self) -> View<'_> {
        View::GameOver(GameOverView {
            outcome: self.outcome,
            mines_found: self.mines_found,
        })
    }
}
