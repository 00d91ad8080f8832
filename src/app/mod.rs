//! Application layer: state, reducers, the query orchestrator, and the
//! ports the infrastructure implements.

pub mod action;
pub mod cache;
pub mod command;
pub mod config;
pub mod database_registry;
pub mod effect;
pub mod effect_runner;
pub mod error;
pub mod focused_pane;
pub mod input_mode;
pub mod message_state;
pub mod orchestrator;
pub mod panel_registry;
pub mod ports;
pub mod query_builder;
pub mod query_history;
pub mod reducer;
pub mod reducers;
pub mod render_schedule;
pub mod state;
pub mod ui_state;
