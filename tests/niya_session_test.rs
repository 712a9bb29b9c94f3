//! Session tests with real engine replies.

use strictly_niya::{
    ControlMode, EngineReply, Layout, Player, Position, SearchExecutor, Session, SessionCommand,
    SessionEvent, SessionStatus, Ticket,
};
use tokio::sync::mpsc;

const SAMPLE: [u8; 16] = [7, 1, 15, 5, 13, 2, 9, 12, 0, 4, 8, 10, 11, 14, 3, 6];

struct Harness {
    session: Session,
    replies: mpsc::UnboundedReceiver<EngineReply>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

fn harness(red: ControlMode, black: ControlMode) -> Harness {
    let (executor, replies) = SearchExecutor::channel(Some(11));
    let (event_tx, events) = mpsc::unbounded_channel();
    let layout = Layout::new(&SAMPLE).unwrap();
    let session = Session::new(red, black, layout, executor, event_tx).with_seed(11);
    Harness {
        session,
        replies,
        events,
    }
}

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

#[tokio::test]
async fn test_strong_engine_answers_human() {
    let mut h = harness(ControlMode::Human, ControlMode::Strong);
    h.session.start();
    h.session.submit_move(0, 1).unwrap();
    assert_eq!(h.session.status(), SessionStatus::AwaitingEngine);
    assert_eq!(
        h.session.pending(),
        Some(Ticket {
            generation: 0,
            seat: Player::Black
        })
    );

    // A human move while the engine thinks is refused.
    assert!(h.session.submit_move(1, 1).is_err());

    let reply = h.replies.recv().await.unwrap();
    assert_eq!(reply.result, Ok(pos(1, 1)));
    assert!(h.session.handle_engine_reply(reply));
    assert_eq!(h.session.state().moves_made(), 2);
    assert_eq!(h.session.state().tile(pos(1, 1)).owner(), Some(Player::Black));
    assert_eq!(h.session.status(), SessionStatus::AwaitingHuman);
    assert_eq!(h.session.pending(), None);
}

#[tokio::test]
async fn test_restart_discards_stale_reply() {
    let mut h = harness(ControlMode::Human, ControlMode::Random);
    h.session.start();
    h.session.submit_move(0, 1).unwrap();
    assert_eq!(h.session.status(), SessionStatus::AwaitingEngine);

    h.session.restart(Some(&SAMPLE));
    assert_eq!(h.session.generation(), 1);
    assert_eq!(h.session.status(), SessionStatus::AwaitingHuman);

    let stale = h.replies.recv().await.unwrap();
    assert_eq!(stale.ticket.generation, 0);
    assert!(!h.session.handle_engine_reply(stale));
    assert_eq!(h.session.state().moves_made(), 0);
}

#[tokio::test]
async fn test_mismatched_ticket_is_ignored() {
    let mut h = harness(ControlMode::Human, ControlMode::Random);
    h.session.start();
    h.session.submit_move(0, 1).unwrap();

    let forged = EngineReply {
        ticket: Ticket {
            generation: 7,
            seat: Player::Black,
        },
        result: Ok(pos(1, 1)),
    };
    assert!(!h.session.handle_engine_reply(forged));
    assert_eq!(h.session.state().moves_made(), 1);

    let genuine = h.replies.recv().await.unwrap();
    assert!(h.session.handle_engine_reply(genuine));
    assert_eq!(h.session.state().moves_made(), 2);
}

#[tokio::test]
async fn test_invalid_restart_layout_falls_back() {
    let mut h = harness(ControlMode::Human, ControlMode::Human);
    h.session.start();
    h.session.restart(Some(&[1, 1, 1]));

    let mut ids: Vec<u8> = h
        .session
        .state()
        .board()
        .iter()
        .map(|tile| tile.id())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..16).collect::<Vec<u8>>());
    assert_eq!(h.session.status(), SessionStatus::AwaitingHuman);
}

#[tokio::test]
async fn test_run_plays_engine_game_to_the_end() {
    let h = harness(ControlMode::Random, ControlMode::Random);
    let (commands, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(h.session.run(command_rx, h.replies));

    let mut events = h.events;
    let mut played = 0;
    let state = loop {
        match events.recv().await.unwrap() {
            SessionEvent::MovePlayed { .. } => played += 1,
            SessionEvent::Finished { state, .. } => break state,
            _ => {}
        }
    };
    assert_eq!(state.moves_made(), played);
    assert!(state.is_over());

    commands.send(SessionCommand::Quit).unwrap();
    let session = task.await.unwrap();
    assert_eq!(session.status(), SessionStatus::Done);
}

#[tokio::test]
async fn test_run_accepts_human_commands() {
    let h = harness(ControlMode::Human, ControlMode::Random);
    let (commands, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(h.session.run(command_rx, h.replies));
    let mut events = h.events;

    commands.send(SessionCommand::Submit { row: 1, col: 2 }).unwrap();
    commands.send(SessionCommand::Submit { row: 0, col: 1 }).unwrap();

    let mut rejected = 0;
    let mut red_turns = 0;
    while red_turns < 2 {
        match events.recv().await.unwrap() {
            SessionEvent::MoveRejected { .. } => rejected += 1,
            SessionEvent::TurnStarted {
                player: Player::Red,
                ..
            } => red_turns += 1,
            SessionEvent::Finished { .. } => break,
            _ => {}
        }
    }
    assert_eq!(rejected, 1);

    commands.send(SessionCommand::Quit).unwrap();
    let session = task.await.unwrap();
    assert!(session.state().moves_made() >= 2);
    assert_eq!(session.state().tile(pos(0, 1)).owner(), Some(Player::Red));
}
