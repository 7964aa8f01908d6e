use itertools::Itertools;

use crate::board::MoveRecord;


pub fn format_move(record: &MoveRecord) -> String {
    let mut s = format!("{}: {}-{}", record.piece_kind.to_full_algebraic(), record.from, record.to);
    if let Some(captured) = record.captured {
        s.push_str(&format!(" x{}", captured.to_full_algebraic()));
    }
    s
}

// One line per full move: white's half-move, then black's if it has been made.
pub fn format_move_history(history: &[MoveRecord]) -> Vec<String> {
    history
        .chunks(2)
        .map(|pair| pair.iter().map(format_move).join(" | "))
        .collect()
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coord::Coord;
    use crate::piece::PieceKind;

    fn record(piece_kind: PieceKind, from: Coord, to: Coord, captured: Option<PieceKind>) -> MoveRecord {
        MoveRecord { piece_kind, from, to, captured }
    }

    #[test]
    fn pairs_moves() {
        let history = [
            record(PieceKind::Pawn, Coord::E2, Coord::E4, None),
            record(PieceKind::Pawn, Coord::D7, Coord::D5, None),
            record(PieceKind::Pawn, Coord::E4, Coord::D5, Some(PieceKind::Pawn)),
        ];
        assert_eq!(format_move_history(&history), vec![
            "P: e2-e4 | P: d7-d5".to_owned(),
            "P: e4-d5 xP".to_owned(),
        ]);
        assert!(format_move_history(&[]).is_empty());
    }
}
