pub mod cell;
pub mod grid;

pub use cell::{Cell, CellId, CellInstance, Position};
pub use grid::Grid;
