// Client session: owns the board mirror, the selection and the coach bubbles, turns user
// actions into outgoing requests and applies server replies.
//
// The session never talks to the network itself. Requests are queued (see
// `next_outgoing_request`) and their replies are fed back via `process_reply` in whatever order
// they complete. Every board update is a full replacement, so the last reply to complete wins.

use std::collections::VecDeque;
use std::time::Duration;

use instant::Instant;
use log::{info, warn};

use crate::board::{BoardState, LastMove, MoveRecord};
use crate::coach::CoachFeedbackQueue;
use crate::config::ClientConfig;
use crate::coord::Coord;
use crate::error::TransportError;
use crate::event::{
    ClientRequest, LoadResponse, MoveResponse, OutgoingRequest, PlayMode, RequestId, ServerReply,
    ServerResponse,
};
use crate::force::Force;
use crate::grid::Grid;
use crate::internal_error_message;
use crate::selection::{ClickEvent, MoveIntent, Selection};


pub const GAME_SAVED_MESSAGE: &str = "Game saved!";
pub const GAME_LOADED_MESSAGE: &str = "Game loaded!";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    BoardUpdated,
    // Server had no (usable) saved game; we are back at the starting position.
    GameReset,
    MoveRejected(String),
    RequestFailed(String),
}

pub struct ClientState {
    mode: PlayMode,
    coach_enabled: bool,
    board: BoardState,
    selection: Selection,
    coach: CoachFeedbackQueue,
    suggest_interval: Duration,
    last_suggest_poll: Option<Instant>,
    next_request_id: u64,
    outgoing_requests: VecDeque<OutgoingRequest>,
    last_board_update: Option<RequestId>,
}

impl ClientState {
    pub fn new(config: &ClientConfig) -> Self {
        ClientState {
            mode: config.mode,
            coach_enabled: config.coach_enabled,
            board: BoardState::new(),
            selection: Selection::Idle,
            coach: CoachFeedbackQueue::new(config.max_coach_messages, config.coach_message_lifetime),
            suggest_interval: config.suggest_interval,
            last_suggest_poll: None,
            next_request_id: 1,
            outgoing_requests: VecDeque::new(),
            last_board_update: None,
        }
    }

    pub fn mode(&self) -> PlayMode { self.mode }
    pub fn coach_enabled(&self) -> bool { self.coach_enabled }
    pub fn board(&self) -> &BoardState { &self.board }
    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn coach(&self) -> &CoachFeedbackQueue { &self.coach }

    pub fn next_outgoing_request(&mut self) -> Option<OutgoingRequest> {
        self.outgoing_requests.pop_front()
    }

    // Initial sync: mirror whatever the server has.
    pub fn start(&mut self) -> RequestId { self.send(ClientRequest::Load { announce: false }) }

    pub fn click(&mut self, square: Coord) -> Option<RequestId> {
        let MoveIntent { from, to } = self.selection.click(ClickEvent { square }, &self.board)?;
        Some(self.send(ClientRequest::Move { from, to, mode: self.mode }))
    }

    pub fn request_ai_move(&mut self) -> RequestId {
        self.send(ClientRequest::AiMove { mode: self.mode })
    }

    // No-op while coaching is off.
    pub fn request_suggestions(&mut self) -> Option<RequestId> {
        self.coach_enabled.then(|| self.send(ClientRequest::Suggest))
    }

    // Periodic coaching poll. The first call only starts the countdown.
    pub fn poll_suggestions(&mut self, now: Instant) -> Option<RequestId> {
        let Some(last_poll) = self.last_suggest_poll else {
            self.last_suggest_poll = Some(now);
            return None;
        };
        if now.saturating_duration_since(last_poll) < self.suggest_interval {
            return None;
        }
        self.last_suggest_poll = Some(now);
        self.request_suggestions()
    }

    pub fn load(&mut self) -> RequestId { self.send(ClientRequest::Load { announce: true }) }

    pub fn save(&mut self) -> RequestId { self.send(ClientRequest::Save) }

    // Abandons local state and re-syncs with the server.
    pub fn reset_game(&mut self) -> RequestId {
        self.board.reset();
        self.selection.clear();
        self.coach.clear();
        self.send(ClientRequest::Load { announce: false })
    }

    pub fn set_mode(&mut self, mode: PlayMode) -> RequestId {
        self.mode = mode;
        self.reset_game()
    }

    pub fn set_coach_enabled(&mut self, enabled: bool) -> Option<RequestId> {
        self.coach_enabled = enabled;
        if enabled {
            self.request_suggestions()
        } else {
            self.coach.clear();
            None
        }
    }

    // Expires coach messages. Should be called periodically.
    pub fn refresh(&mut self, now: Instant) { self.coach.refresh(now); }

    pub fn process_reply(&mut self, reply: ServerReply, now: Instant) -> NotableEvent {
        let ServerReply { id, request, result } = reply;
        match request {
            ClientRequest::Move { from, to, .. } => match expect_move(result) {
                Ok(response) => self.apply_human_move(id, response, LastMove { from, to }, now),
                Err(err) => self.report_failure(id, err.to_string(), now),
            },
            ClientRequest::AiMove { .. } => match expect_move(result) {
                Ok(response) => self.apply_ai_move(id, response, now),
                Err(err) => {
                    warn!("AI move {id} failed: {err}");
                    NotableEvent::None
                }
            },
            ClientRequest::Suggest => match result {
                Ok(ServerResponse::Suggest(response)) => {
                    self.advise(response.suggestions, now);
                    NotableEvent::None
                }
                other => {
                    warn!("Suggestions {id} dropped: {other:?}");
                    NotableEvent::None
                }
            },
            ClientRequest::Load { announce } => match result {
                Ok(ServerResponse::Load(response)) => self.apply_load(id, response, announce, now),
                Ok(other) => self.report_failure(id, mismatch_message(&other), now),
                Err(err) => self.report_failure(id, err.to_string(), now),
            },
            ClientRequest::Save => match result {
                Ok(ServerResponse::Save) => {
                    self.advise(vec![GAME_SAVED_MESSAGE.to_owned()], now);
                    NotableEvent::None
                }
                Ok(other) => self.report_failure(id, mismatch_message(&other), now),
                Err(err) => self.report_failure(id, err.to_string(), now),
            },
        }
    }

    fn send(&mut self, request: ClientRequest) -> RequestId {
        let id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        self.outgoing_requests.push_back(OutgoingRequest { id, request });
        id
    }

    fn advise(&mut self, messages: Vec<String>, now: Instant) {
        if self.coach_enabled {
            self.coach.show_batch(messages, now);
        }
    }

    fn report_failure(&mut self, id: RequestId, message: String, now: Instant) -> NotableEvent {
        warn!("Request {id} failed: {message}");
        self.advise(vec![message.clone()], now);
        NotableEvent::RequestFailed(message)
    }

    fn replace_board(
        &mut self, id: RequestId, grid: Grid, turn: Force, move_history: Vec<MoveRecord>,
        last_move: Option<LastMove>,
    ) {
        if let Some(last) = self.last_board_update {
            if last > id {
                info!("Reply {id} completed after {last} and overrides it");
            }
        }
        self.last_board_update = Some(id);
        self.board.replace(grid, turn, move_history, last_move);
        self.selection.clear();
    }

    fn apply_human_move(
        &mut self, id: RequestId, response: MoveResponse, last_move: LastMove, now: Instant,
    ) -> NotableEvent {
        if !response.success {
            let message = response.message.unwrap_or_else(|| "Move rejected.".to_owned());
            warn!("Move {id} rejected: {message}");
            self.advise(vec![message.clone()], now);
            return NotableEvent::MoveRejected(message);
        }
        let (Some(grid), Some(move_history)) = (response.board, response.move_history) else {
            let err = TransportError::Malformed("move accepted without board or history".to_owned());
            return self.report_failure(id, err.to_string(), now);
        };
        let turn = response.turn.unwrap_or_else(|| self.board.turn().opponent());
        info!("Move {id} accepted, {turn:?} to move");
        self.replace_board(id, grid, turn, move_history, Some(last_move));
        self.advise(response.coach_feedback.unwrap_or_default(), now);
        NotableEvent::BoardUpdated
    }

    fn apply_ai_move(&mut self, id: RequestId, response: MoveResponse, now: Instant) -> NotableEvent {
        if !response.success {
            warn!("AI move {id} rejected: {:?}", response.message);
            return NotableEvent::None;
        }
        let (Some(grid), Some(move_history)) = (response.board, response.move_history) else {
            warn!("AI move {id} reply lacks board or history");
            return NotableEvent::None;
        };
        info!("AI move {id} applied: {:?}", response.last_ai_move);
        // The AI always plays black, so it is the human's turn again.
        self.replace_board(id, grid, Force::White, move_history, response.last_ai_move);
        self.advise(response.coach_feedback.unwrap_or_default(), now);
        NotableEvent::BoardUpdated
    }

    fn apply_load(
        &mut self, id: RequestId, response: LoadResponse, announce: bool, now: Instant,
    ) -> NotableEvent {
        let (true, Some(grid)) = (response.success, response.board) else {
            info!("Load {id}: no saved game, starting over");
            self.last_board_update = Some(id);
            self.board.reset();
            self.selection.clear();
            self.request_suggestions();
            return NotableEvent::GameReset;
        };
        let turn = response.turn.unwrap_or(Force::White);
        info!("Load {id}: {turn:?} to move");
        self.replace_board(id, grid, turn, response.move_history.unwrap_or_default(), None);
        if announce {
            self.advise(vec![GAME_LOADED_MESSAGE.to_owned()], now);
        }
        self.request_suggestions();
        NotableEvent::BoardUpdated
    }
}

fn expect_move(
    result: Result<ServerResponse, TransportError>,
) -> Result<MoveResponse, TransportError> {
    match result? {
        ServerResponse::Move(response) => Ok(response),
        other => Err(TransportError::Malformed(mismatch_message(&other))),
    }
}

fn mismatch_message(response: &ServerResponse) -> String {
    internal_error_message!("unexpected response kind {:?}", response)
}
