use strum::IntoEnumIterator;

use crate::coord::{Col, Coord, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};


const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

fn home_rows(force: Force) -> (Row, Row) {
    match force {
        Force::White => (Row::from_algebraic('1'), Row::from_algebraic('2')),
        Force::Black => (Row::from_algebraic('8'), Row::from_algebraic('7')),
    }
}

fn setup_force(grid: &mut Grid, force: Force) {
    let (back_row, pawn_row) = home_rows(force);
    for (col, kind) in Col::all().zip(BACK_RANK) {
        grid[Coord::new(back_row, col)] = Some(Piece::new(force, kind));
        grid[Coord::new(pawn_row, col)] = Some(Piece::new(force, PieceKind::Pawn));
    }
}

// Classic chess setup, white at the bottom (ranks 1 and 2).
pub fn starting_grid() -> Grid {
    let mut grid = Grid::new();
    for force in Force::iter() {
        setup_force(&mut grid, force);
    }
    grid
}
