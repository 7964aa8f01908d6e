// Wire types of the HTTP protocol and the request/reply envelopes passed between `ClientState`
// and the transport.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{LastMove, MoveRecord};
use crate::coord::Coord;
use crate::error::TransportError;
use crate::force::Force;
use crate::grid::Grid;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    // Server answers every white move with its own black move.
    #[default]
    Ai,
    // Two humans share the board.
    Human,
}

// Body of `POST /move`. An AI move request has no squares and sets `ai`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Option<Coord>,
    pub to: Option<Coord>,
    pub mode: PlayMode,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ai: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MoveResponse {
    pub success: bool,
    #[serde(default)]
    pub board: Option<Grid>,
    #[serde(default)]
    pub move_history: Option<Vec<MoveRecord>>,
    #[serde(default)]
    pub turn: Option<Force>,
    #[serde(default)]
    pub coach_feedback: Option<Vec<String>>,
    // Some server versions call it `ai_move`.
    #[serde(default, alias = "ai_move")]
    pub last_ai_move: Option<LastMove>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LoadResponse {
    pub success: bool,
    #[serde(default)]
    pub board: Option<Grid>,
    #[serde(default)]
    pub move_history: Option<Vec<MoveRecord>>,
    #[serde(default)]
    pub turn: Option<Force>,
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClientRequest {
    Move { from: Coord, to: Coord, mode: PlayMode },
    AiMove { mode: PlayMode },
    Suggest,
    // `announce` posts a coach message once the game is loaded.
    Load { announce: bool },
    Save,
}

impl ClientRequest {
    pub fn to_move_request(&self) -> Option<MoveRequest> {
        match *self {
            ClientRequest::Move { from, to, mode } => Some(MoveRequest {
                from: Some(from),
                to: Some(to),
                mode,
                ai: false,
            }),
            ClientRequest::AiMove { mode } => Some(MoveRequest {
                from: None,
                to: None,
                mode,
                ai: true,
            }),
            ClientRequest::Suggest | ClientRequest::Load { .. } | ClientRequest::Save => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OutgoingRequest {
    pub id: RequestId,
    pub request: ClientRequest,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ServerResponse {
    Move(MoveResponse),
    Suggest(SuggestResponse),
    Load(LoadResponse),
    Save,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServerReply {
    pub id: RequestId,
    pub request: ClientRequest,
    pub result: Result<ServerResponse, TransportError>,
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn move_request_body() {
        let human = ClientRequest::Move { from: Coord::E2, to: Coord::E4, mode: PlayMode::Human };
        assert_eq!(
            serde_json::to_value(human.to_move_request().unwrap()).unwrap(),
            json!({"from": "e2", "to": "e4", "mode": "human"})
        );
        let ai = ClientRequest::AiMove { mode: PlayMode::Ai };
        assert_eq!(
            serde_json::to_value(ai.to_move_request().unwrap()).unwrap(),
            json!({"from": null, "to": null, "mode": "ai", "ai": true})
        );
        assert_eq!(ClientRequest::Save.to_move_request(), None);
    }

    #[test]
    fn rejection_response() {
        let response: MoveResponse =
            serde_json::from_value(json!({"success": false, "message": "Illegal move."})).unwrap();
        assert_eq!(response, MoveResponse {
            success: false,
            message: Some("Illegal move.".to_owned()),
            ..MoveResponse::default()
        });
    }

    #[test]
    fn ai_move_alias() {
        let response: MoveResponse = serde_json::from_value(json!({
            "success": true,
            "ai_move": {"from": "e7", "to": "e5"},
            "coach_feedback": null,
            "turn": "w",
        }))
        .unwrap();
        assert_eq!(response.last_ai_move, Some(LastMove { from: Coord::E7, to: Coord::E5 }));
        assert_eq!(response.turn, Some(Force::White));
        assert_eq!(response.coach_feedback, None);
    }
}
