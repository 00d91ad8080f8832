pub mod atoms;
pub mod command_line;
pub mod databases;
pub mod footer;
pub mod header;
pub mod history;
pub mod layout;
pub mod panels;
pub mod status_message;
pub mod text_utils;
