//! Building blocks for scene processes.

pub mod gate;
pub mod results;
pub mod rules;
pub mod select;

pub use gate::{Gate, NextButton};
pub use results::ResultsScreen;
pub use select::{ConfirmOnly, MultiSelectAll, PickOne, TapThrough};
