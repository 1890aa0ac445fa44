//! Employee registry console.
//!
//! Loads the employee collection from the registry backend, renders it as a
//! table and drives create, update and delete through forms, an edit overlay
//! and confirmation prompts. Presentation is behind [`surface::Surface`]; the
//! shipped front end is the line-oriented [`terminal`] one.

pub mod config;
pub mod feedback;
pub mod form;
pub mod overlay;
pub mod registry;
pub mod surface;
pub mod table;
pub mod terminal;

pub use registry::{Registry, UiEvent};
