use color_eyre::eyre::Result;

use duckboard_app::ports::Renderer;
use duckboard_app::state::AppState;

use crate::components::layout::MainLayout;
use crate::tui::TuiRunner;

pub struct TuiRenderer<'a> {
    tui: &'a mut TuiRunner,
}

impl<'a> TuiRenderer<'a> {
    pub fn new(tui: &'a mut TuiRunner) -> Self {
        Self { tui }
    }
}

impl Renderer for TuiRenderer<'_> {
    fn draw(&mut self, state: &AppState) -> Result<()> {
        self.tui.terminal().draw(|frame| {
            MainLayout::render(frame, state, None);
        })?;
        Ok(())
    }
}
