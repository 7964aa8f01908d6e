// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coach_chess::coord::Coord;
use coach_chess::error::TransportError;
use coach_chess::event::{LoadResponse, MoveRequest, MoveResponse, SuggestResponse};
use coach_chess::grid::Grid;
use coach_chess::network::ChessServer;
use coach_chess::piece::Piece;
use coach_chess::util::as_single_char;
use itertools::Itertools;


// Parses a board drawn rank 8 first, e.g.
//   r . . . k . . .
//   . . . . . . . .
//   ...
// Uppercase is white, lowercase is black, '.' is an empty square.
#[allow(dead_code)]
pub fn parse_grid(board_str: &str) -> Result<Grid, String> {
    let rows = board_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.len() == 8));
    let mut grid = Grid::new();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, piece_str) in row.iter().enumerate() {
            let piece_char =
                as_single_char(piece_str).ok_or_else(|| format!("Invalid piece: {}", piece_str))?;
            let coord = Coord::from_grid(row_idx as u8, col_idx as u8);
            grid[coord] = if piece_char == '.' {
                None
            } else {
                Some(Piece::from_ascii(piece_char).ok_or_else(|| format!("Invalid piece: {}", piece_char))?)
            };
        }
    }
    Ok(grid)
}

#[allow(dead_code)]
pub fn squares(squares: &[&str]) -> std::collections::HashSet<Coord> {
    squares.iter().map(|s| Coord::from_algebraic(s)).collect()
}


// Server stub: answers with pre-scripted responses and records what it was asked.
// An endpoint without a scripted response fails with a transport error.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeServer {
    pub move_responses: Mutex<VecDeque<Result<MoveResponse, TransportError>>>,
    pub suggest_responses: Mutex<VecDeque<Result<SuggestResponse, TransportError>>>,
    pub load_responses: Mutex<VecDeque<Result<LoadResponse, TransportError>>>,
    pub save_responses: Mutex<VecDeque<Result<(), TransportError>>>,
    pub move_requests: Mutex<Vec<MoveRequest>>,
}

#[allow(dead_code)]
impl FakeServer {
    pub fn new() -> Self { Self::default() }

    pub fn push_move(&self, response: Result<MoveResponse, TransportError>) {
        self.move_responses.lock().unwrap().push_back(response);
    }
    pub fn push_suggest(&self, response: Result<SuggestResponse, TransportError>) {
        self.suggest_responses.lock().unwrap().push_back(response);
    }
    pub fn push_load(&self, response: Result<LoadResponse, TransportError>) {
        self.load_responses.lock().unwrap().push_back(response);
    }
    pub fn push_save(&self, response: Result<(), TransportError>) {
        self.save_responses.lock().unwrap().push_back(response);
    }
    pub fn move_requests(&self) -> Vec<MoveRequest> { self.move_requests.lock().unwrap().clone() }
}

#[allow(dead_code)]
fn next<T>(queue: &Mutex<VecDeque<Result<T, TransportError>>>) -> Result<T, TransportError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::Http("connection refused".to_owned())))
}

#[async_trait]
impl ChessServer for FakeServer {
    async fn make_move(&self, request: &MoveRequest) -> Result<MoveResponse, TransportError> {
        self.move_requests.lock().unwrap().push(request.clone());
        next(&self.move_responses)
    }
    async fn suggest(&self) -> Result<SuggestResponse, TransportError> { next(&self.suggest_responses) }
    async fn load(&self) -> Result<LoadResponse, TransportError> { next(&self.load_responses) }
    async fn save(&self) -> Result<(), TransportError> { next(&self.save_responses) }
}
