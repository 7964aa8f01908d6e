// Grid orientation follows the wire format: row 0 is rank 8 (the top of the board as white
// sees it), col 0 is file 'a'.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


const fn const_char_sub(a: char, b: char) -> u8 {
    let a_idx = a as u32;
    let b_idx = b as u32;
    assert!(a_idx >= b_idx);
    let diff = a_idx - b_idx;
    assert!(diff <= u8::MAX as u32);
    diff as u8
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,  // 0-based, from the top
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub const fn from_algebraic(rank: char) -> Self {
        Self::from_zero_based(const_char_sub('8', rank))
    }
    pub fn try_from_algebraic(rank: char) -> Option<Self> {
        ('1'..='8').contains(&rank).then(|| Self::from_algebraic(rank))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { ('8' as u8 - self.idx) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
    pub fn checked_add(self, delta: i8) -> Option<Self> {
        let idx = self.idx as i8 + delta;
        (0..NUM_ROWS as i8).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,  // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub const fn from_algebraic(file: char) -> Self {
        Self::from_zero_based(const_char_sub(file, 'a'))
    }
    pub fn try_from_algebraic(file: char) -> Option<Self> {
        ('a'..='h').contains(&file).then(|| Self::from_algebraic(file))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + 'a' as u8) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
    pub fn checked_add(self, delta: i8) -> Option<Self> {
        let idx = self.idx as i8 + delta;
        (0..NUM_COLS as i8).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    // Panics if the indices are outside the board: callers only pass validated squares.
    pub const fn from_grid(row: u8, col: u8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }
    pub const fn to_grid(self) -> (u8, u8) { (self.row.to_zero_based(), self.col.to_zero_based()) }

    // Panics on anything but a valid square like "e2". Use `parse_algebraic` for untrusted input.
    #[track_caller]
    pub fn from_algebraic(s: &str) -> Self {
        Self::parse_algebraic(s).unwrap_or_else(|| panic!("Invalid square: {s:?}"))
    }
    pub fn parse_algebraic(s: &str) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        Some(Self::new(Row::try_from_algebraic(rank)?, Col::try_from_algebraic(file)?))
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    // Returns `None` if the result falls off the board.
    pub fn offset(self, (d_row, d_col): (i8, i8)) -> Option<Self> {
        Some(Self::new(self.row.checked_add(d_row)?, self.col.checked_add(d_col)?))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_algebraic())
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Coord::parse_algebraic(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid algebraic square: {s:?}")))
    }
}


macro_rules! named_coords {
    ($($name:ident = $file:literal $rank:literal),* $(,)?) => {
        impl Coord {
            $(pub const $name: Coord = Coord::new(Row::from_algebraic($rank), Col::from_algebraic($file));)*
        }
    };
}

named_coords! {
    A1 = 'a' '1', A2 = 'a' '2', A3 = 'a' '3', A4 = 'a' '4', A5 = 'a' '5', A6 = 'a' '6', A7 = 'a' '7', A8 = 'a' '8',
    B1 = 'b' '1', B2 = 'b' '2', B3 = 'b' '3', B4 = 'b' '4', B5 = 'b' '5', B6 = 'b' '6', B7 = 'b' '7', B8 = 'b' '8',
    C1 = 'c' '1', C2 = 'c' '2', C3 = 'c' '3', C4 = 'c' '4', C5 = 'c' '5', C6 = 'c' '6', C7 = 'c' '7', C8 = 'c' '8',
    D1 = 'd' '1', D2 = 'd' '2', D3 = 'd' '3', D4 = 'd' '4', D5 = 'd' '5', D6 = 'd' '6', D7 = 'd' '7', D8 = 'd' '8',
    E1 = 'e' '1', E2 = 'e' '2', E3 = 'e' '3', E4 = 'e' '4', E5 = 'e' '5', E6 = 'e' '6', E7 = 'e' '7', E8 = 'e' '8',
    F1 = 'f' '1', F2 = 'f' '2', F3 = 'f' '3', F4 = 'f' '4', F5 = 'f' '5', F6 = 'f' '6', F7 = 'f' '7', F8 = 'f' '8',
    G1 = 'g' '1', G2 = 'g' '2', G3 = 'g' '3', G4 = 'g' '4', G5 = 'g' '5', G6 = 'g' '6', G7 = 'g' '7', G8 = 'g' '8',
    H1 = 'h' '1', H2 = 'h' '2', H3 = 'h' '3', H4 = 'h' '4', H5 = 'h' '5', H6 = 'h' '6', H7 = 'h' '7', H8 = 'h' '8',
}
