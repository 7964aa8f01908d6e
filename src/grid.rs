use std::{fmt, ops};

use itertools::Itertools;
use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::piece::Piece;


// Wire format is row-major: `grid[0]` is rank 8, `grid[0][0]` is a8.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<Piece>>>", into = "Vec<Vec<Option<Piece>>>")]
pub struct Grid {
    data: Array2<Option<Piece>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn is_free(&self, pos: Coord) -> bool { self[pos].is_none() }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|coord| self[coord].map(|piece| (coord, piece)))
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<Piece>;
    fn index(&self, pos: Coord) -> &Self::Output { &self.data[coord_to_index(pos)] }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[coord_to_index(pos)]
    }
}

impl TryFrom<Vec<Vec<Option<Piece>>>> for Grid {
    type Error = String;
    fn try_from(rows: Vec<Vec<Option<Piece>>>) -> Result<Self, Self::Error> {
        if rows.len() != NUM_ROWS as usize {
            return Err(format!("expected {} rows, got {}", NUM_ROWS, rows.len()));
        }
        let mut grid = Grid::new();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != NUM_COLS as usize {
                return Err(format!(
                    "expected {} cells in row {}, got {}",
                    NUM_COLS,
                    row_idx,
                    row.len()
                ));
            }
            for (col_idx, cell) in row.into_iter().enumerate() {
                grid[Coord::from_grid(row_idx as u8, col_idx as u8)] = cell;
            }
        }
        Ok(grid)
    }
}

impl From<Grid> for Vec<Vec<Option<Piece>>> {
    fn from(grid: Grid) -> Self {
        grid.data.outer_iter().map(|row| row.to_vec()).collect()
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    let (row, col) = pos.to_grid();
    [row as usize, col as usize]
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(coord, piece)| (coord.to_algebraic(), piece.to_ascii())))
            .finish()
    }
}

// Plain-text board, rank 8 first, '.' for empty squares. Mostly for logs and tests.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = self
            .data
            .outer_iter()
            .map(|row| row.iter().map(|cell| cell.map_or('.', |p| p.to_ascii())).join(" "))
            .join("\n");
        write!(f, "{text}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::Force;
    use crate::piece::PieceKind;

    #[test]
    fn wire_round_trip() {
        let mut grid = Grid::new();
        grid[Coord::A8] = Some(Piece::new(Force::Black, PieceKind::Rook));
        grid[Coord::E2] = Some(Piece::new(Force::White, PieceKind::Pawn));
        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value[0][0], serde_json::json!({"color": "b", "code": "R"}));
        assert_eq!(value[6][4], serde_json::json!({"color": "w", "code": "P"}));
        assert_eq!(value[6][3], serde_json::Value::Null);
        let parsed: Grid = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn wrong_shape_rejected() {
        let row = vec![serde_json::Value::Null; 8];
        let seven_rows = serde_json::json!(vec![row.clone(); 7]);
        assert!(serde_json::from_value::<Grid>(seven_rows).is_err());
        let mut rows = vec![row; 8];
        rows[3].pop();
        assert!(serde_json::from_value::<Grid>(serde_json::json!(rows)).is_err());
    }
}
