#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod coach;
pub mod config;
pub mod coord;
pub mod display;
pub mod error;
pub mod event;
pub mod force;
pub mod grid;
pub mod movegen;
pub mod network;
pub mod piece;
pub mod selection;
pub mod starter;
pub mod util;

pub use board::{BoardState, LastMove, MoveRecord};
pub use client::{ClientState, NotableEvent};
pub use coach::CoachFeedbackQueue;
pub use config::ClientConfig;
pub use coord::{Col, Coord, Row};
pub use error::TransportError;
pub use event::{ClientRequest, PlayMode, RequestId, ServerReply};
pub use force::Force;
pub use grid::Grid;
pub use movegen::pseudo_legal_targets;
pub use piece::{Piece, PieceKind};
pub use selection::{ClickEvent, MoveIntent, Selection};
