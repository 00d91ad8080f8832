use super::focused_pane::FocusedPane;
use super::input_mode::InputMode;

/// Selection and input state for the terminal front end.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub input_mode: InputMode,
    pub focused_pane: FocusedPane,
    pub command_line_input: String,
    pub database_selected: usize,
    pub panel_selected: usize,
    pub history_selected: usize,
    pub terminal_height: u16,
}

impl UiState {
    pub fn selected_index(&self, pane: FocusedPane) -> usize {
        match pane {
            FocusedPane::Databases => self.database_selected,
            FocusedPane::Panels => self.panel_selected,
            FocusedPane::History => self.history_selected,
        }
    }

    /// Moves the focused pane's cursor by `delta`, clamped to `len` items.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        let current = self.selected_mut();
        if len == 0 {
            *current = 0;
            return;
        }
        *current = current.saturating_add_signed(delta).min(len - 1);
    }

    pub fn clamp_selection(&mut self, pane: FocusedPane, len: usize) {
        let idx = match pane {
            FocusedPane::Databases => &mut self.database_selected,
            FocusedPane::Panels => &mut self.panel_selected,
            FocusedPane::History => &mut self.history_selected,
        };
        *idx = (*idx).min(len.saturating_sub(1));
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Databases => &mut self.database_selected,
            FocusedPane::Panels => &mut self.panel_selected,
            FocusedPane::History => &mut self.history_selected,
        }
    }
}
