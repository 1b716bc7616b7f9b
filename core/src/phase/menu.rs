use super::*;

/// Difficulty picker. Rows are the difficulties in table order, followed by `Exit`.
#[derive(Debug, Default)]
pub struct MenuPhase {
    items: Vec<String>,
}

impl MenuPhase {
    pub const EXIT_LABEL: &'static str = "Exit";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for MenuPhase {
    fn on_enter(&mut self, ctx: &mut Context<'_>) {
        self.items = ctx
            .difficulties()
            .iter()
            .map(|difficulty| difficulty.name().to_owned())
            .chain([Self::EXIT_LABEL.to_owned()])
            .collect();
    }

    fn step(&mut self, ctx: &mut Context<'_>) {
        let Some(row) = clicked_row(ctx, self.items.len()) else {
            return;
        };

        if row < ctx.difficulties().len() {
            log::debug!("menu: {} selected", self.items[row]);
            ctx.insert(PLAY_KEY, Box::new(PlayPhase::new(row)));
            ctx.erase(MENU_KEY);
        } else {
            ctx.session_mut().request_quit();
        }
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_>) {
        self.items.clear();
    }

    fn view(&self) -> View<'_> {
        View::Menu(MenuView { items: &self.items })
    }
}
