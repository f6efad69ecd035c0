//! Presentation layer for the infusion calculator.
//!
//! This crate owns everything the engine must not know about: language
//! tables, theme, turning an engine outcome into display text, and the
//! interactive session that recalculates on every input change.

pub mod calculator;
pub mod locale;
pub mod logging;
pub mod preferences;
pub mod render;

pub use calculator::*;
pub use locale::*;
pub use preferences::*;
pub use render::*;
