mod command_line;
mod database;
mod navigation;
mod panel;
mod query;

pub use command_line::reduce_command_line;
pub use database::reduce_database;
pub use navigation::reduce_navigation;
pub use panel::reduce_panel;
pub use query::reduce_query;
