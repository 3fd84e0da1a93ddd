//! Grid module - the playing field
//!
//! The grid is `height x width` cells stored as a flat row-major vector.
//! Dimensions are fixed at construction. Coordinates are `(row, col)` with
//! row 0 at the top.

use arrayvec::ArrayVec;

use crate::piece::{Piece, MAX_EXTENT};
use crate::types::{Cell, EMPTY};

/// Row indices cleared by a single placement (a piece spans at most 4 rows)
pub type ClearedRows = ArrayVec<usize, MAX_EXTENT>;

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be positive.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![EMPTY; height * width],
        }
    }

    /// Build a grid from explicit rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == width),
            "grid rows must all have the same width"
        );
        Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Copy out as rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.width).map(<[Cell]>::to_vec).collect()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`. Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `piece`, anchored at `(row, col)`, is blocked.
    ///
    /// Blocked means the bounding box leaves the field on any side, or an
    /// occupied piece cell overlaps a non-empty field cell.
    pub fn collides(&self, piece: &Piece, row: i32, col: i32) -> bool {
        if row < 0
            || col < 0
            || row as usize + piece.height() > self.height
            || col as usize + piece.width() > self.width
        {
            return true;
        }
        piece
            .cells()
            .any(|(dr, dc)| self.get(row + dr as i32, col + dc as i32) != Some(EMPTY))
    }

    /// Write the piece's occupied cells into the field with its fill value.
    ///
    /// Cells that fall outside the field are skipped.
    pub fn insert(&mut self, piece: &Piece) {
        let fill = piece.kind.fill();
        for (dr, dc) in piece.cells() {
            self.set(piece.row + dr as i32, piece.col + dc as i32, fill);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Remove a row, shift every row above it down by one and empty the top row
    pub fn clear_row(&mut self, row: usize) {
        debug_assert!(row < self.height, "row {} out of range", row);
        let width = self.width;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src = (r - 1) * width;
            self.cells.copy_within(src..src + width, r * width);
        }
        self.cells[..width].fill(EMPTY);
    }

    /// Remove all of `rows` in one compaction pass.
    ///
    /// Equivalent to clearing them one at a time in ascending order; the order
    /// of `rows` does not matter.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let width = self.width;
        let mut write = self.height;

        // Scan bottom to top, sliding every kept row down to the write cursor.
        for read in (0..self.height).rev() {
            if rows.contains(&read) {
                continue;
            }
            write -= 1;
            if write != read {
                let src = read * width;
                self.cells.copy_within(src..src + width, write * width);
            }
        }

        self.cells[..write * width].fill(EMPTY);
    }

    /// Full rows in `range`, ascending
    pub fn full_rows_in(&self, range: std::ops::Range<usize>) -> ClearedRows {
        range
            .filter(|&row| self.is_row_full(row))
            .take(MAX_EXTENT)
            .collect()
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Raw cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_index_calculation() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 3), Some(3));
        assert_eq!(grid.index(1, 0), Some(4));
        assert_eq!(grid.index(4, 3), Some(19));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 4), None);
        assert_eq!(grid.index(5, 0), None);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = vec![vec![0, 1, 0], vec![2, 0, 3]];
        let grid = Grid::from_rows(rows.clone());
        assert_eq!((grid.height(), grid.width()), (2, 3));
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(grid.get(1, 2), Some(3));
    }

    #[test]
    fn test_clear_rows_matches_sequential_ascending_clears() {
        let rows = vec![
            vec![0, 0, 1],
            vec![1, 1, 1],
            vec![0, 2, 0],
            vec![1, 1, 1],
            vec![3, 0, 0],
        ];
        let mut batch = Grid::from_rows(rows.clone());
        batch.clear_rows(&[3, 1]);

        let mut one_by_one = Grid::from_rows(rows);
        one_by_one.clear_row(1);
        one_by_one.clear_row(3);

        assert_eq!(batch, one_by_one);
        assert_eq!(
            batch.to_rows(),
            vec![
                vec![0, 0, 0],
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![0, 2, 0],
                vec![3, 0, 0],
            ]
        );
    }

    #[test]
    fn test_collides_uses_bounding_box() {
        let grid = Grid::new(4, 4);
        let i = Piece::new(PieceKind::I, 0, 0);
        assert!(!grid.collides(&i, 3, 0));
        assert!(grid.collides(&i, 0, 1));
        assert!(grid.collides(&i, 4, 0));
        assert!(grid.collides(&i, -1, 0));
    }

    #[test]
    fn test_full_rows_in() {
        let grid = Grid::from_rows(vec![vec![1, 1], vec![0, 1], vec![2, 2]]);
        assert_eq!(grid.full_rows_in(0..3).as_slice(), &[0, 2]);
        assert_eq!(grid.full_rows_in(1..2).as_slice(), &[] as &[usize]);
    }
}
