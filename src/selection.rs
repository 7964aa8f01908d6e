use log::debug;

use crate::board::BoardState;
use crate::coord::Coord;
use crate::movegen::Targets;


// A click on a board square. Produced by whatever front-end is in use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClickEvent {
    pub square: Coord,
}

// Move the user has confirmed locally. Only the server decides whether it is legal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveIntent {
    pub from: Coord,
    pub to: Coord,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        square: Coord,
        // Recomputed on every selection, never carried over to another board.
        targets: Targets,
    },
}

impl Selection {
    pub fn selected_square(&self) -> Option<Coord> {
        match self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    pub fn is_target(&self, pos: Coord) -> bool {
        match self {
            Selection::Idle => false,
            Selection::Selected { targets, .. } => targets.contains(&pos),
        }
    }

    pub fn clear(&mut self) { *self = Selection::Idle; }

    // Any click while a piece is selected ends the selection. Clicking another own piece does not
    // select it: the user has to click it once more.
    pub fn click(&mut self, event: ClickEvent, board: &BoardState) -> Option<MoveIntent> {
        let pos = event.square;
        match std::mem::take(self) {
            Selection::Idle => {
                if board.is_selectable(pos) {
                    let targets = board.targets_from(pos);
                    debug!("Selected {pos} with {} candidate targets", targets.len());
                    *self = Selection::Selected { square: pos, targets };
                }
                None
            }
            Selection::Selected { square, targets } => {
                if pos != square && targets.contains(&pos) {
                    Some(MoveIntent { from: square, to: pos })
                } else {
                    debug!("Deselected {square}");
                    None
                }
            }
        }
    }
}
