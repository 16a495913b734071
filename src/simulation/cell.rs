/// Stable identity of a cell. Travels with the value on sort swaps and stays
/// put on diffusion swaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Position, t: f32) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            z: self.z + (to.z - self.z) * t,
        }
    }
}

/// A value-bearing grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub id: CellId,
    /// Sort key in `[0, 255]`, rendered as greyscale intensity
    pub value: u8,
    pub position: Position,
}

impl Cell {
    pub fn new(id: CellId, value: u8, position: Position) -> Self {
        Self { id, value, position }
    }

    /// Greyscale intensity in `[0, 1]` derived from the value.
    pub fn shade(&self) -> f32 {
        self.value as f32 / 255.0
    }
}

/// GPU instance record for one cell.
///
/// Layout: 16 bytes total.
/// - position: [f32; 2] = 8 bytes - Display centre in grid space (x, y)
/// - shade: f32 = 4 bytes - Greyscale intensity [0, 1]
/// - size: f32 = 4 bytes - Edge length of the drawn quad
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellInstance {
    pub position: [f32; 2],
    pub shade: f32,
    pub size: f32,
}

impl CellInstance {
    /// Build an instance for `cell`, drawn at `display` (which may differ
    /// from the cell's resting position while a swap is animating).
    pub fn new(cell: &Cell, display: Position, size: f32) -> Self {
        Self {
            position: [display.x, display.y],
            shade: cell.shade(),
            size,
        }
    }
}
