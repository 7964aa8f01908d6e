use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::util::as_single_char;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
#[serde(try_from = "WirePiece", into = "WirePiece")]
pub struct Piece {
    pub force: Force,
    pub kind: PieceKind,
}

// Board cell as the server sends it: `{"color": "w", "code": "N"}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct WirePiece {
    color: Force,
    code: String,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    // The server writes black pieces in lowercase, so case is ignored.
    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        as_single_char(notation).and_then(Self::from_algebraic_char)
    }
}

impl Piece {
    pub fn to_pictogram(self) -> char { piece_to_pictogram(self.kind, self.force) }

    // Uppercase for white, lowercase for black. Used in plain-text boards.
    pub fn to_ascii(self) -> char {
        let ch = self.kind.to_full_algebraic();
        match self.force {
            Force::White => ch,
            Force::Black => ch.to_ascii_lowercase(),
        }
    }

    pub fn from_ascii(ch: char) -> Option<Self> {
        let kind = PieceKind::from_algebraic_char(ch)?;
        let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
        Some(Piece { force, kind })
    }
}

impl TryFrom<WirePiece> for Piece {
    type Error = String;
    fn try_from(wire: WirePiece) -> Result<Self, Self::Error> {
        let kind = PieceKind::from_algebraic(&wire.code)
            .ok_or_else(|| format!("unknown piece code: {:?}", wire.code))?;
        Ok(Piece { force: wire.color, kind })
    }
}

impl From<Piece> for WirePiece {
    fn from(piece: Piece) -> Self {
        WirePiece {
            color: piece.force,
            code: piece.kind.to_full_algebraic().to_string(),
        }
    }
}

pub fn piece_to_pictogram(piece_kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, piece_kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_piece() {
        let piece: Piece = serde_json::from_str(r#"{"color": "b", "code": "q"}"#).unwrap();
        assert_eq!(piece, Piece::new(Force::Black, PieceKind::Queen));
        assert_eq!(
            serde_json::to_value(Piece::new(Force::White, PieceKind::Knight)).unwrap(),
            serde_json::json!({"color": "w", "code": "N"})
        );
        assert!(serde_json::from_str::<Piece>(r#"{"color": "w", "code": "X"}"#).is_err());
        assert!(serde_json::from_str::<Piece>(r#"{"color": "w", "code": "QQ"}"#).is_err());
    }

    #[test]
    fn ascii() {
        assert_eq!(Piece::from_ascii('k'), Some(Piece::new(Force::Black, PieceKind::King)));
        assert_eq!(Piece::from_ascii('R'), Some(Piece::new(Force::White, PieceKind::Rook)));
        assert_eq!(Piece::from_ascii('.'), None);
        assert_eq!(Piece::new(Force::Black, PieceKind::Pawn).to_ascii(), 'p');
    }
}
