use std::fmt;
use std::io;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use instant::Instant;
use log::{debug, info};
use scopeguard::defer;

use coach_chess::client::ClientState;
use coach_chess::config::ClientConfig;
use coach_chess::coord::Coord;
use coach_chess::event::{OutgoingRequest, ServerReply};
use coach_chess::network::{self, ChessServer, HttpChessServer};

use crate::parse_mode;
use crate::tui;


const HELP: &str = concat!(
    "Type a square (e.g. e2) to click it. ",
    "Commands: /ai /save /load /reset (/undo) /mode ai|human /coach on|off /quit",
);

enum IncomingEvent {
    Network(ServerReply),
    Terminal(term_event::Event),
    Tick,
}

enum CommandOutcome {
    Continue,
    Quit,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, client_state: &ClientState, keyboard_input: &str,
    command_error: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    let board = client_state.board();
    writeln_raw(stdout, tui::render_grid(board, client_state.selection()))?;
    writeln_raw(stdout, tui::render_turn(board))?;
    writeln_raw(stdout, "")?;
    writeln_raw(stdout, tui::render_move_history(board, 8))?;
    writeln_raw(stdout, "")?;
    if client_state.coach_enabled() {
        writeln_raw(stdout, tui::render_coach(client_state.coach()))?;
        writeln_raw(stdout, "")?;
    }
    writeln_raw(stdout, HELP.dark_grey())?;
    writeln_raw(stdout, format!("> {}▂", keyboard_input))?;
    if let Some(err) = command_error {
        writeln_raw(stdout, err.clone().with(style::Color::Red))?;
    }
    Ok(())
}

fn apply_command(client_state: &mut ClientState, input: &str) -> Result<CommandOutcome, String> {
    let input = input.trim();
    let Some(cmd) = input.strip_prefix('/') else {
        let square =
            Coord::parse_algebraic(input).ok_or_else(|| format!("Not a square: '{input}'"))?;
        client_state.click(square);
        return Ok(CommandOutcome::Continue);
    };
    let (name, arg) = cmd.split_once(' ').map_or((cmd, None), |(n, a)| (n, Some(a.trim())));
    match (name, arg) {
        ("quit", None) => return Ok(CommandOutcome::Quit),
        ("ai", None) => {
            client_state.request_ai_move();
        }
        ("save", None) => {
            client_state.save();
        }
        ("load", None) => {
            client_state.load();
        }
        ("reset" | "undo", None) => {
            client_state.reset_game();
        }
        ("mode", Some(mode)) => {
            client_state.set_mode(parse_mode(mode).map_err(|err| err.to_string())?);
        }
        ("coach", Some("on")) => {
            client_state.set_coach_enabled(true);
        }
        ("coach", Some("off")) => {
            client_state.set_coach_enabled(false);
        }
        _ => return Err(format!("Unknown command: '{cmd}'")),
    }
    Ok(CommandOutcome::Continue)
}

fn dispatch_requests(
    client_state: &mut ClientState, server: &Arc<dyn ChessServer>,
    tx: &mpsc::Sender<IncomingEvent>,
) {
    while let Some(request) = client_state.next_outgoing_request() {
        spawn_request(Arc::clone(server), request, tx.clone());
    }
}

// Each request runs on its own; replies come back through the event channel in completion order.
fn spawn_request(
    server: Arc<dyn ChessServer>, request: OutgoingRequest, tx: mpsc::Sender<IncomingEvent>,
) {
    async_std::task::spawn(async move {
        let reply = network::execute(server.as_ref(), request).await;
        // The receiver is gone only if we are shutting down.
        let _ = tx.send(IncomingEvent::Network(reply));
    });
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let server: Arc<dyn ChessServer> = Arc::new(
        HttpChessServer::new(&config.server_url).context("Cannot create server connection")?,
    );
    info!("Connecting to {}", config.server_url);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_local = tx.clone();
    let tx_tick = tx.clone();
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(100));
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut client_state = ClientState::new(&config);
    let mut keyboard_input = String::new();
    let mut command_error = None;
    client_state.start();
    client_state.poll_suggestions(Instant::now());
    dispatch_requests(&mut client_state, &server, &tx);
    for event in rx.iter() {
        let now = Instant::now();
        match event {
            IncomingEvent::Network(reply) => {
                // Failures reach the user through the coach area only, and are already logged.
                let notable = client_state.process_reply(reply, now);
                debug!("Reply applied: {notable:?}");
            }
            IncomingEvent::Terminal(term_event::Event::Key(key_event))
                if key_event.kind == term_event::KeyEventKind::Press =>
            {
                match key_event.code {
                    term_event::KeyCode::Char(ch) => {
                        keyboard_input.push(ch);
                    }
                    term_event::KeyCode::Backspace => {
                        keyboard_input.pop();
                    }
                    term_event::KeyCode::Esc => {
                        return Ok(());
                    }
                    term_event::KeyCode::Enter => {
                        command_error = None;
                        match apply_command(&mut client_state, &keyboard_input) {
                            Ok(CommandOutcome::Quit) => return Ok(()),
                            Ok(CommandOutcome::Continue) => {}
                            Err(err) => command_error = Some(err),
                        }
                        keyboard_input.clear();
                    }
                    _ => {}
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                client_state.poll_suggestions(now);
            }
        }
        client_state.refresh(now);
        dispatch_requests(&mut client_state, &server, &tx);
        render(&mut stdout, &client_state, &keyboard_input, &command_error)?;
    }
    anyhow::bail!("Unexpected end of events stream")
}


#[cfg(test)]
mod tests {
    use coach_chess::event::{ClientRequest, PlayMode};
    use pretty_assertions::assert_eq;

    use super::*;

    fn next_request(client_state: &mut ClientState) -> Option<ClientRequest> {
        client_state.next_outgoing_request().map(|r| r.request)
    }

    #[test]
    fn commands() {
        let mut client_state = ClientState::new(&ClientConfig::default());
        assert!(matches!(apply_command(&mut client_state, "e2"), Ok(CommandOutcome::Continue)));
        assert!(matches!(apply_command(&mut client_state, " e4 "), Ok(CommandOutcome::Continue)));
        assert_eq!(next_request(&mut client_state), Some(ClientRequest::Move {
            from: Coord::E2,
            to: Coord::E4,
            mode: PlayMode::Ai,
        }));
        apply_command(&mut client_state, "/mode human").unwrap();
        assert_eq!(client_state.mode(), PlayMode::Human);
        assert_eq!(next_request(&mut client_state), Some(ClientRequest::Load { announce: false }));
        apply_command(&mut client_state, "/coach off").unwrap();
        assert!(!client_state.coach_enabled());
        assert!(matches!(apply_command(&mut client_state, "/quit"), Ok(CommandOutcome::Quit)));
        while client_state.next_outgoing_request().is_some() {}
        assert!(matches!(apply_command(&mut client_state, "/undo"), Ok(CommandOutcome::Continue)));
        assert_eq!(next_request(&mut client_state), Some(ClientRequest::Load { announce: false }));
        assert!(apply_command(&mut client_state, "/mode chess960").is_err());
        assert!(apply_command(&mut client_state, "/dance").is_err());
        assert!(apply_command(&mut client_state, "z9").is_err());
    }
}
