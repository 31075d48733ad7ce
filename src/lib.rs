//! Core library surface for the digital library catalog.
//!
//! The domain layer (`models`, `catalog`, `error`) has no terminal
//! dependencies and can be driven directly; `ui` wraps it in the interactive
//! session used by the binary.
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{CatalogError, ValidationError};
pub use models::{
    current_year, Audiobook, Digital, Ebook, EbookFormat, Publication, Record, MIN_YEAR,
};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
