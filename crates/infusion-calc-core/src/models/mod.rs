//! Domain models for the infusion calculator.

mod calculation;
mod drug;
mod input;

pub use calculation::*;
pub use drug::*;
pub use input::*;
