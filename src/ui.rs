//! Ratatui front-end for the catalog. The menu, record forms, index prompt
//! and result panels are modes of a single `App`; `terminal` owns the raw
//! terminal and feeds key presses into it.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
