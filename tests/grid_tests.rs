//! Grid tests - field storage, collision, placement and line clearing

use term_tetris::core::{Grid, Piece};
use term_tetris::types::{PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, EMPTY};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(DEFAULT_HEIGHT, DEFAULT_WIDTH);
    assert_eq!(grid.height(), DEFAULT_HEIGHT);
    assert_eq!(grid.width(), DEFAULT_WIDTH);
    assert!(grid.is_empty());

    for row in 0..DEFAULT_HEIGHT as i32 {
        for col in 0..DEFAULT_WIDTH as i32 {
            assert_eq!(grid.get(row, col), Some(EMPTY), "cell ({row}, {col})");
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(5, 4);

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(5, 0), None);
    assert_eq!(grid.get(0, 4), None);
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(5, 4);

    assert!(grid.set(2, 3, PieceKind::L.fill()));
    assert_eq!(grid.get(2, 3), Some(PieceKind::L.fill()));
    assert!(!grid.is_empty());

    assert!(!grid.set(5, 0, 1));
    assert!(!grid.set(0, -1, 1));
}

#[test]
fn test_collides_at_every_edge() {
    let grid = Grid::new(5, 4);
    let o = Piece::new(PieceKind::O, 0, 0);

    assert!(!grid.collides(&o, 0, 0));
    assert!(!grid.collides(&o, 3, 2));
    assert!(grid.collides(&o, -1, 0));
    assert!(grid.collides(&o, 0, -1));
    assert!(grid.collides(&o, 4, 0));
    assert!(grid.collides(&o, 0, 3));
}

#[test]
fn test_collides_ignores_empty_mask_cells() {
    // S's bounding box covers (0,0) but the piece does not.
    let mut grid = Grid::new(5, 4);
    grid.set(3, 0, PieceKind::J.fill());
    let s = Piece::new(PieceKind::S, 0, 0);

    assert!(!grid.collides(&s, 3, 0));
    assert!(grid.collides(&s, 2, 0));
}

#[test]
fn test_insert_writes_fill_values() {
    let mut grid = Grid::new(4, 4);
    grid.insert(&Piece::new(PieceKind::J, 1, 1));

    let j = PieceKind::J.fill();
    assert_eq!(
        grid.to_rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![0, j, 0, 0],
            vec![0, j, j, j],
            vec![0, 0, 0, 0],
        ]
    );
}

#[test]
fn test_insert_skips_cells_outside_field() {
    let mut grid = Grid::new(4, 4);
    grid.insert(&Piece::new(PieceKind::I, 3, 2));

    let i = PieceKind::I.fill();
    assert_eq!(grid.to_rows()[3], vec![0, 0, i, i]);
}

#[test]
fn test_is_row_full() {
    let mut grid = Grid::new(3, 4);
    for col in 0..3 {
        grid.set(2, col, 1);
    }
    assert!(!grid.is_row_full(2));
    grid.set(2, 3, 1);
    assert!(grid.is_row_full(2));
    assert!(!grid.is_row_full(1));
    assert!(!grid.is_row_full(3));
}

#[test]
fn test_clear_row_shifts_rows_above() {
    let mut grid = Grid::from_rows(vec![
        vec![1, 0, 0, 0],
        vec![0, 2, 0, 0],
        vec![3, 3, 3, 3],
        vec![0, 0, 4, 0],
    ]);

    grid.clear_row(2);

    assert_eq!(
        grid.to_rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 2, 0, 0],
            vec![0, 0, 4, 0],
        ]
    );
}

#[test]
fn test_clear_top_row() {
    let mut grid = Grid::from_rows(vec![vec![5, 5, 5, 5], vec![0, 1, 0, 0]]);
    grid.clear_row(0);
    assert_eq!(grid.to_rows(), vec![vec![0, 0, 0, 0], vec![0, 1, 0, 0]]);
}

#[test]
fn test_clear_adjacent_rows() {
    let mut grid = Grid::from_rows(vec![
        vec![0, 6, 0, 0],
        vec![5, 5, 5, 5],
        vec![5, 5, 5, 5],
        vec![1, 0, 0, 0],
    ]);

    grid.clear_rows(&[1, 2]);

    assert_eq!(
        grid.to_rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 6, 0, 0],
            vec![1, 0, 0, 0],
        ]
    );
}

#[test]
fn test_clear_rows_order_does_not_matter() {
    let rows = vec![
        vec![0, 6, 0, 0],
        vec![5, 5, 5, 5],
        vec![0, 2, 2, 0],
        vec![5, 5, 5, 5],
    ];
    let mut ascending = Grid::from_rows(rows.clone());
    let mut descending = Grid::from_rows(rows);

    ascending.clear_rows(&[1, 3]);
    descending.clear_rows(&[3, 1]);

    assert_eq!(ascending, descending);
    assert_eq!(
        ascending.to_rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 6, 0, 0],
            vec![0, 2, 2, 0],
        ]
    );
}
