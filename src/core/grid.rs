//! Grid geometry: cell identifiers, palette colours and the level → size table.
//!
//! The board grows with the level in five-level tiers:
//!
//! | Levels | Grid |
//! |--------|------|
//! | 1–5    | 2×2  |
//! | 6–10   | 3×3  |
//! | 11–15  | 4×4  |
//! | 16–20  | 5×5  |
//! | 21+    | 6×6  |

use serde::{Deserialize, Serialize};

/// Smallest board side length (the board of level 1).
pub const MIN_GRID_SIZE: u8 = 2;

/// Largest board side length.
pub const MAX_GRID_SIZE: u8 = 6;

/// Levels spent on each board size before it grows.
pub const LEVELS_PER_GRID_TIER: u32 = 5;

/// Board side length for a level.
///
/// Pure step function of the level; level 0 is treated as level 1.
///
/// ```
/// use memory_grid::core::grid_size_for_level;
///
/// assert_eq!(grid_size_for_level(1), 2);
/// assert_eq!(grid_size_for_level(6), 3);
/// assert_eq!(grid_size_for_level(40), 6);
/// ```
#[must_use]
pub fn grid_size_for_level(level: u32) -> u8 {
    let tier = level.saturating_sub(1) / LEVELS_PER_GRID_TIER;
    let size = u32::from(MIN_GRID_SIZE) + tier;
    size.min(u32::from(MAX_GRID_SIZE)) as u8
}

/// Index of a cell on the current board, row-major from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u16);

impl CellId {
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Raw index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// 24-bit RGB colour, displayed as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    #[must_use]
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Default cyclic cell palette.
pub const DEFAULT_PALETTE: [Color; 9] = [
    Color::rgb(0xFF0055),
    Color::rgb(0x00E5FF),
    Color::rgb(0x76FF03),
    Color::rgb(0xFFD600),
    Color::rgb(0xD500F9),
    Color::rgb(0xFF9100),
    Color::rgb(0xFFFFFF),
    Color::rgb(0x333333),
    Color::rgb(0x8800FF),
];

/// One cell of a rendered board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpec {
    pub id: CellId,
    pub color: Color,
}

/// A complete board handed to the presenter on every rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    size: u8,
    cells: Vec<CellSpec>,
}

impl GridLayout {
    /// Build a `size × size` board, colouring cell `i` with `palette[i % len]`.
    ///
    /// An empty palette falls back to [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn new(size: u8, palette: &[Color]) -> Self {
        let palette = if palette.is_empty() {
            &DEFAULT_PALETTE[..]
        } else {
            palette
        };
        let count = usize::from(size) * usize::from(size);
        let cells = (0..count)
            .map(|i| CellSpec {
                id: CellId(i as u16),
                color: palette[i % palette.len()],
            })
            .collect();
        Self { size, cells }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> &[CellSpec] {
        &self.cells
    }

    /// Colour of a cell, `None` if it is not on this board.
    #[must_use]
    pub fn color_of(&self, cell: CellId) -> Option<Color> {
        self.cells.get(cell.index()).map(|c| c.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_table() {
        let expected = [(1, 2), (5, 2), (6, 3), (10, 3), (11, 4), (15, 4), (16, 5), (20, 5), (21, 6), (99, 6)];
        for (level, size) in expected {
            assert_eq!(grid_size_for_level(level), size, "level {}", level);
        }
    }

    #[test]
    fn test_level_zero_behaves_like_level_one() {
        assert_eq!(grid_size_for_level(0), MIN_GRID_SIZE);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0xFF0055).to_string(), "#FF0055");
        assert_eq!(Color::rgb(0x333333).to_string(), "#333333");
    }

    #[test]
    fn test_layout_palette_is_cyclic() {
        let grid = GridLayout::new(4, &DEFAULT_PALETTE);
        assert_eq!(grid.cell_count(), 16);
        assert_eq!(grid.color_of(CellId(0)), Some(DEFAULT_PALETTE[0]));
        assert_eq!(grid.color_of(CellId(9)), Some(DEFAULT_PALETTE[0]));
        assert_eq!(grid.color_of(CellId(15)), Some(DEFAULT_PALETTE[6]));
        assert_eq!(grid.color_of(CellId(16)), None);
    }

    #[test]
    fn test_layout_empty_palette_falls_back() {
        let grid = GridLayout::new(2, &[]);
        assert_eq!(grid.color_of(CellId(1)), Some(DEFAULT_PALETTE[1]));
    }
}
