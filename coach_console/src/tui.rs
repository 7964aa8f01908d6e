use console::Style;
use itertools::Itertools;

use coach_chess::board::BoardState;
use coach_chess::coach::CoachFeedbackQueue;
use coach_chess::coord::{Col, Coord, Row};
use coach_chess::display::format_move_history;
use coach_chess::force::Force;
use coach_chess::selection::Selection;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SquareHighlight {
    None,
    Selected,
    Target,
    LastMove,
}

fn square_highlight(board: &BoardState, selection: &Selection, coord: Coord) -> SquareHighlight {
    if selection.selected_square() == Some(coord) {
        SquareHighlight::Selected
    } else if selection.is_target(coord) {
        SquareHighlight::Target
    } else if board.last_move().is_some_and(|mv| mv.from == coord || mv.to == coord) {
        SquareHighlight::LastMove
    } else {
        SquareHighlight::None
    }
}

fn square_style(coord: Coord, highlight: SquareHighlight) -> Style {
    let (row, col) = coord.to_grid();
    let is_light = (row + col) % 2 == 0;
    let style = Style::new().color256(233);
    match highlight {
        SquareHighlight::None => if is_light { style.on_color256(230) } else { style.on_color256(222) },
        SquareHighlight::Selected => style.on_color256(117),
        SquareHighlight::Target => if is_light { style.on_color256(157) } else { style.on_color256(114) },
        SquareHighlight::LastMove => if is_light { style.on_color256(229) } else { style.on_color256(186) },
    }
}

pub fn render_grid(board: &BoardState, selection: &Selection) -> String {
    let mut col_names = String::new();
    col_names.push_str(&format_square(' '));
    for col in Col::all() {
        col_names.push_str(&format_square(col.to_algebraic()));
    }
    col_names.push_str(&format_square(' '));
    col_names.push('\n');

    let mut ret = String::new();
    ret.push_str(&col_names);
    for row in Row::all() {
        ret.push_str(&format_square(row.to_algebraic()));
        for col in Col::all() {
            let coord = Coord::new(row, col);
            let highlight = square_highlight(board, selection, coord);
            let ch = match board.grid()[coord] {
                Some(piece) => piece.to_pictogram(),
                None if highlight == SquareHighlight::Target => '·',
                None => ' ',
            };
            ret.push_str(&square_style(coord, highlight).apply_to(format_square(ch)).to_string());
        }
        ret.push_str(&format_square(row.to_algebraic()));
        ret.push('\n');
    }
    ret.push_str(&col_names);
    ret
}

pub fn render_turn(board: &BoardState) -> String {
    match board.turn() {
        Force::White => "White to move".to_owned(),
        Force::Black => "Black to move".to_owned(),
    }
}

// Last `max_lines` full moves, numbered.
pub fn render_move_history(board: &BoardState, max_lines: usize) -> String {
    let lines = format_move_history(board.move_history());
    let skip = lines.len().saturating_sub(max_lines);
    lines
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, line)| format!("{:>3}. {}", idx + 1, line))
        .join("\n")
}

pub fn render_coach(coach: &CoachFeedbackQueue) -> String {
    let bubble = Style::new().color256(233).on_color256(194);
    coach.texts().map(|text| format!("💭 {}", bubble.apply_to(format!(" {text} ")))).join("\n")
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }
