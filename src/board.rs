use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::force::Force;
use crate::grid::Grid;
use crate::movegen::{Targets, pseudo_legal_targets};
use crate::piece::PieceKind;
use crate::starter::starting_grid;


// A move as recorded by the server. Wire format: `{"from": "e2", "to": "e4", "piece": "P",
// "captured": null}`; piece codes may be lowercase for black.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "piece", with = "piece_code")]
    pub piece_kind: PieceKind,
    pub from: Coord,
    pub to: Coord,
    #[serde(rename = "captured", default, with = "opt_piece_code")]
    pub captured: Option<PieceKind>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Coord,
    pub to: Coord,
}

// Authoritative game state as last reported by the server. There is no way to edit it
// piecewise: every update is a `replace` with the full state from a server response.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    grid: Grid,
    turn: Force,
    move_history: Vec<MoveRecord>,
    last_move: Option<LastMove>,
}

impl BoardState {
    pub fn new() -> Self {
        BoardState {
            grid: starting_grid(),
            turn: Force::White,
            move_history: Vec::new(),
            last_move: None,
        }
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn turn(&self) -> Force { self.turn }
    pub fn move_history(&self) -> &[MoveRecord] { &self.move_history }
    pub fn last_move(&self) -> Option<LastMove> { self.last_move }

    pub fn replace(
        &mut self, grid: Grid, turn: Force, move_history: Vec<MoveRecord>,
        last_move: Option<LastMove>,
    ) {
        *self = BoardState { grid, turn, move_history, last_move };
    }

    pub fn reset(&mut self) { *self = BoardState::new(); }

    pub fn targets_from(&self, from: Coord) -> Targets { pseudo_legal_targets(&self.grid, from) }

    // Whether the player to move may pick up the piece on `pos`.
    pub fn is_selectable(&self, pos: Coord) -> bool {
        self.grid[pos].is_some_and(|piece| piece.force == self.turn)
    }
}

mod piece_code {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::piece::PieceKind;

    pub fn serialize<S: Serializer>(kind: &PieceKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(kind.to_full_algebraic())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PieceKind, D::Error> {
        let code = String::deserialize(deserializer)?;
        PieceKind::from_algebraic(&code)
            .ok_or_else(|| de::Error::custom(format!("unknown piece code: {code:?}")))
    }
}

mod opt_piece_code {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::piece::PieceKind;

    pub fn serialize<S: Serializer>(
        kind: &Option<PieceKind>, serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match kind {
            Some(kind) => serializer.serialize_char(kind.to_full_algebraic()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PieceKind>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(code) => PieceKind::from_algebraic(&code)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("unknown piece code: {code:?}"))),
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn move_record_wire_format() {
        let record: MoveRecord = serde_json::from_str(
            r#"{"from": "d7", "to": "e6", "piece": "p", "captured": "N"}"#,
        )
        .unwrap();
        assert_eq!(record, MoveRecord {
            piece_kind: PieceKind::Pawn,
            from: Coord::D7,
            to: Coord::E6,
            captured: Some(PieceKind::Knight),
        });
        let quiet: MoveRecord =
            serde_json::from_str(r#"{"from": "g1", "to": "f3", "piece": "N", "captured": null}"#)
                .unwrap();
        assert_eq!(quiet.captured, None);
        let missing: MoveRecord =
            serde_json::from_str(r#"{"from": "g1", "to": "f3", "piece": "N"}"#).unwrap();
        assert_eq!(missing.captured, None);
    }

    #[test]
    fn replace_is_total() {
        let mut state = BoardState::new();
        let history = vec![MoveRecord {
            piece_kind: PieceKind::Pawn,
            from: Coord::E2,
            to: Coord::E4,
            captured: None,
        }];
        let last_move = Some(LastMove { from: Coord::E2, to: Coord::E4 });
        state.replace(Grid::new(), Force::Black, history.clone(), last_move);
        assert_eq!(state.grid(), &Grid::new());
        assert_eq!(state.turn(), Force::Black);
        assert_eq!(state.move_history(), history.as_slice());
        assert_eq!(state.last_move(), last_move);
        state.reset();
        assert_eq!(state, BoardState::new());
    }

    #[test]
    fn selectable_only_for_side_to_move() {
        let state = BoardState::new();
        assert!(state.is_selectable(Coord::E2));
        assert!(!state.is_selectable(Coord::E7));
        assert!(!state.is_selectable(Coord::E4));
    }
}
