use duckboard_domain::{ChartKind, ColumnarResult, PanelId, PanelPatch};

use crate::ports::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Render,
    Resize(u16, u16),
    ToggleFocus,
    SelectNext,
    SelectPrevious,
    Escape,

    // Command line
    EnterCommandLine,
    ExitCommandLine,
    CommandLineInput(char),
    CommandLineBackspace,
    CommandLineSubmit,

    // Databases
    OpenDatabase(String),
    DatabaseOpened {
        database_path: String,
        tables: Vec<String>,
    },
    DatabaseOpenFailed {
        database_path: String,
        error: String,
    },
    CloseDatabase(String),
    RefreshTables(String),
    TablesLoaded {
        database_path: String,
        tables: Vec<String>,
    },
    TablesFailed {
        database_path: String,
        error: String,
    },

    // Panels
    AddPanel(ChartKind),
    RemovePanel(PanelId),
    UpdatePanel {
        id: PanelId,
        patch: PanelPatch,
    },
    ToggleFilter {
        id: PanelId,
        category: String,
        value: String,
    },
    /// Removes whatever is selected in the focused pane
    RemoveSelected,
    /// Refreshes the table list of the selected database
    RefreshSelected,

    // Queries
    /// A debounce deadline passed; issue every query that is due
    DispatchDueQueries,
    QueryCompleted {
        panel_id: PanelId,
        generation: u64,
        database_path: String,
        sql: String,
        outcome: Result<ColumnarResult, QueryError>,
    },
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
