// Pseudo-legal move generation: piece geometry and occupancy only. Whether a move exposes the
// king is decided by the server, and so are castling, en passant and promotion.

use std::collections::HashSet;

use crate::coord::{Coord, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};


pub type Targets = HashSet<Coord>;

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
const KING_OFFSETS: [(i8, i8); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

// Row delta for "forward": white moves towards rank 8, which is row 0.
fn direction_forward(force: Force) -> i8 {
    match force {
        Force::White => -1,
        Force::Black => 1,
    }
}

fn pawn_starting_row(force: Force) -> Row {
    match force {
        Force::White => Row::from_algebraic('2'),
        Force::Black => Row::from_algebraic('7'),
    }
}

fn is_enemy(grid: &Grid, pos: Coord, force: Force) -> bool {
    grid[pos].is_some_and(|piece| piece.force != force)
}

fn can_land(grid: &Grid, pos: Coord, force: Force) -> bool {
    grid[pos].is_none_or(|piece| piece.force != force)
}

// Squares reachable by the piece on `from`. Empty square yields no targets.
pub fn pseudo_legal_targets(grid: &Grid, from: Coord) -> Targets {
    let Some(piece) = grid[from] else {
        return Targets::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_targets(grid, from, piece.force),
        PieceKind::Knight => offset_targets(grid, from, piece.force, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_targets(grid, from, piece.force, &DIAGONAL_DIRECTIONS),
        PieceKind::Rook => ray_targets(grid, from, piece.force, &ORTHOGONAL_DIRECTIONS),
        PieceKind::Queen => {
            let mut targets = ray_targets(grid, from, piece.force, &ORTHOGONAL_DIRECTIONS);
            targets.extend(ray_targets(grid, from, piece.force, &DIAGONAL_DIRECTIONS));
            targets
        }
        PieceKind::King => offset_targets(grid, from, piece.force, &KING_OFFSETS),
    }
}

// Same as `pseudo_legal_targets`, but pretends the piece on `from` is `piece`. Lets callers ask
// "where would a rook go from here" on a board where a queen stands.
pub fn pseudo_legal_targets_as(grid: &Grid, from: Coord, piece: Piece) -> Targets {
    let mut grid = grid.clone();
    grid[from] = Some(piece);
    pseudo_legal_targets(&grid, from)
}

fn pawn_targets(grid: &Grid, from: Coord, force: Force) -> Targets {
    let dir = direction_forward(force);
    let mut targets = Targets::new();
    if let Some(one_step) = from.offset((dir, 0)) {
        if grid.is_free(one_step) {
            targets.insert(one_step);
            if from.row == pawn_starting_row(force) {
                if let Some(two_steps) = one_step.offset((dir, 0)) {
                    if grid.is_free(two_steps) {
                        targets.insert(two_steps);
                    }
                }
            }
        }
    }
    for d_col in [-1, 1] {
        if let Some(pos) = from.offset((dir, d_col)) {
            if is_enemy(grid, pos, force) {
                targets.insert(pos);
            }
        }
    }
    targets
}

fn offset_targets(grid: &Grid, from: Coord, force: Force, offsets: &[(i8, i8)]) -> Targets {
    offsets
        .iter()
        .filter_map(|&offset| from.offset(offset))
        .filter(|&pos| can_land(grid, pos, force))
        .collect()
}

// Walks each direction until the board edge or the first piece. The blocker is included only
// if it can be captured.
fn ray_targets(grid: &Grid, from: Coord, force: Force, directions: &[(i8, i8)]) -> Targets {
    let mut targets = Targets::new();
    for &direction in directions {
        let mut pos = from;
        while let Some(next) = pos.offset(direction) {
            pos = next;
            match grid[pos] {
                None => {
                    targets.insert(pos);
                }
                Some(blocker) => {
                    if blocker.force != force {
                        targets.insert(pos);
                    }
                    break;
                }
            }
        }
    }
    targets
}
