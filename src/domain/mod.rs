pub mod chart;
pub mod database;
pub mod panel;
pub mod query_result;

pub use chart::{ChartOption, Series};
pub use database::{Database, MetadataState};
pub use panel::{
    ChangedInputs, ChartKind, FilterSelection, Panel, PanelId, PanelPatch, PanelStatus,
    UnknownChartKind,
};
pub use query_result::ColumnarResult;
