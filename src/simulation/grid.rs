use rand::Rng;

use crate::simulation::cell::{Cell, CellId, Position};

/// Ordered collection of cells, addressed by slot index `0..len`.
///
/// When `cols` divides the length the grid also supports row/column
/// addressing (`row = i / cols`, `col = i % cols`).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub cells: Vec<Cell>,
    cols: usize,
    scale: [f32; 3],
}

impl Grid {
    /// Build a `cols x rows` grid whose values start sorted ascending in
    /// row-major order.
    ///
    /// Each value is `255 - ceil(255 * u)` for `u` drawn uniformly from
    /// `[0, 1)`. Zero dimensions are raised to 1.
    pub fn new<R: Rng + ?Sized>(cols: u32, rows: u32, scale: [f32; 3], rng: &mut R) -> Self {
        let cols = cols.max(1) as usize;
        let rows = rows.max(1) as usize;
        let mut values: Vec<u8> = (0..cols * rows)
            .map(|_| random_value(rng.gen::<f64>()))
            .collect();
        values.sort_unstable();
        Self::from_values(&values, cols, scale)
    }

    /// Build a grid from explicit values, laid out row-major over `cols`
    /// columns. Values keep the given order.
    pub fn from_values(values: &[u8], cols: usize, scale: [f32; 3]) -> Self {
        let cols = cols.max(1);
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let position = Position::new(
                    (i % cols) as f32 * scale[0],
                    (i / cols) as f32 * scale[1],
                    0.0,
                );
                Cell::new(CellId(i as u32), value, position)
            })
            .collect();

        Self { cells, cols, scale }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row count when the grid is rectangular.
    pub fn rows(&self) -> Option<usize> {
        self.is_rectangular().then(|| self.len() / self.cols)
    }

    /// True when 2D addressing applies.
    pub fn is_rectangular(&self) -> bool {
        self.cols > 0 && !self.is_empty() && self.len() % self.cols == 0
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale
    }

    /// `(row, col)` of a slot.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn value(&self, index: usize) -> u8 {
        self.cells[index].value
    }

    /// Values in slot order.
    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.value).collect()
    }

    /// Exchange values only; identities and positions stay in their slots.
    pub fn swap_values(&mut self, a: usize, b: usize) {
        let value_a = self.cells[a].value;
        self.cells[a].value = self.cells[b].value;
        self.cells[b].value = value_a;
    }

    /// Exchange whole slot contents (identity and value).
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Values read in slot order are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.cells.windows(2).all(|pair| pair[0].value <= pair[1].value)
    }
}

fn random_value(u: f64) -> u8 {
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
    (255.0 - (255.0 * u).ceil()) as u8
}
