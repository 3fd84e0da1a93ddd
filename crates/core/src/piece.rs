//! Piece module - the falling shape and its occupancy map
//!
//! A piece is a kind, a top-left anchor `(row, col)` and a rectangular
//! occupancy mask of at most 4x4 cells. The mask lives inline so that pieces
//! are `Copy` and can be handed to renderers as snapshots.

use crate::types::{Cell, PieceKind, EMPTY};

/// Largest bounding dimension of any piece in any orientation
pub const MAX_EXTENT: usize = 4;

type Mask = [[bool; MAX_EXTENT]; MAX_EXTENT];

/// Default occupancy for a kind, as (rows, height, width)
fn default_mask(kind: PieceKind) -> (Mask, usize, usize) {
    const X: bool = true;
    const O: bool = false;
    let rows: &[&[bool]] = match kind {
        PieceKind::J => &[&[X, O, O], &[X, X, X]],
        PieceKind::L => &[&[X, X, X], &[X, O, O]],
        PieceKind::S => &[&[O, X, X], &[X, X, O]],
        PieceKind::Z => &[&[X, X, O], &[O, X, X]],
        PieceKind::I => &[&[X, X, X, X]],
        PieceKind::O => &[&[X, X], &[X, X]],
    };

    let mut mask = [[false; MAX_EXTENT]; MAX_EXTENT];
    for (r, row) in rows.iter().enumerate() {
        mask[r][..row.len()].copy_from_slice(row);
    }
    (mask, rows.len(), rows[0].len())
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub row: i32,
    pub col: i32,
    pub kind: PieceKind,
    mask: Mask,
    height: usize,
    width: usize,
}

impl Piece {
    /// Create a piece of `kind` in its default orientation anchored at `(row, col)`
    pub fn new(kind: PieceKind, row: i32, col: i32) -> Self {
        let (mask, height, width) = default_mask(kind);
        Self {
            row,
            col,
            kind,
            mask,
            height,
            width,
        }
    }

    /// Height of the bounding box
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the bounding box
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(r, c)` of the bounding box is occupied
    pub fn is_occupied(&self, r: usize, c: usize) -> bool {
        r < self.height && c < self.width && self.mask[r][c]
    }

    /// Occupied offsets `(dr, dc)` relative to the anchor
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width).filter_map(move |c| self.mask[r][c].then_some((r, c)))
        })
    }

    /// Same piece moved to a new anchor
    pub fn at(self, row: i32, col: i32) -> Self {
        Self { row, col, ..self }
    }

    /// Quarter turn: rows become columns, reversed.
    ///
    /// `new[i][j] = old[j][width - 1 - i]`, bounding dimensions swap. No
    /// collision checks happen here.
    pub fn rotate(&mut self) {
        let mut rotated = [[false; MAX_EXTENT]; MAX_EXTENT];
        for (i, row) in rotated.iter_mut().enumerate().take(self.width) {
            for (j, cell) in row.iter_mut().enumerate().take(self.height) {
                *cell = self.mask[j][self.width - 1 - i];
            }
        }
        self.mask = rotated;
        std::mem::swap(&mut self.height, &mut self.width);
    }

    /// Copy of this piece after one [`Piece::rotate`]
    pub fn rotated(mut self) -> Self {
        self.rotate();
        self
    }

    /// Occupancy as rows of cell values (fill value or empty)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let fill = self.kind.fill();
        (0..self.height)
            .map(|r| {
                (0..self.width)
                    .map(|c| if self.mask[r][c] { fill } else { EMPTY })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z] {
            let p = Piece::new(kind, 0, 0);
            assert_eq!((p.height(), p.width()), (2, 3), "{:?}", kind);
        }
        let i = Piece::new(PieceKind::I, 0, 0);
        assert_eq!((i.height(), i.width()), (1, 4));
        let o = Piece::new(PieceKind::O, 0, 0);
        assert_eq!((o.height(), o.width()), (2, 2));
    }

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Piece::new(kind, 0, 0).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_clears_stale_mask_cells() {
        // I goes 1x4 -> 4x1; nothing may remain outside the new bounding box.
        let p = Piece::new(PieceKind::I, 0, 0).rotated();
        assert_eq!((p.height(), p.width()), (4, 1));
        for r in 0..MAX_EXTENT {
            for c in 0..MAX_EXTENT {
                assert_eq!(p.mask[r][c], c == 0, "({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let p = Piece::new(kind, 3, 2);
            let back = p.rotated().rotated().rotated().rotated();
            assert_eq!(back, p, "{:?}", kind);
        }
    }

    #[test]
    fn test_at_keeps_shape() {
        let p = Piece::new(PieceKind::S, 0, 0).rotated();
        let moved = p.at(4, 1);
        assert_eq!((moved.row, moved.col), (4, 1));
        assert_eq!(moved.to_rows(), p.to_rows());
    }
}
