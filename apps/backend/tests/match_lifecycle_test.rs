//! Session lifecycle: joining players, match start, and room locking.

mod support;

use backend::domain::state::GamePhase;
use backend::session::protocol::ServerMsg;
use backend::test_support::StubMatchService;
use support::rooms::{fresh_room, join_two, profile};

#[tokio::test]
async fn test_single_join_keeps_the_session_waiting() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service.clone());

    room.on_join("c1".to_string(), profile(3, "ada")).await;

    assert_eq!(room.phase(), GamePhase::WaitingForPlayers);
    assert_eq!(room.state().player_count(), 1);
    assert!(room.state().puzzle.is_none());
    assert!(!room.is_locked());
    assert!(transport.broadcasts().is_empty());
    assert!(service.create_calls().is_empty());
}

#[tokio::test]
async fn test_second_join_starts_the_match() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service.clone());

    join_two(&mut room).await;

    assert_eq!(room.phase(), GamePhase::MatchActive);
    assert!(room.is_locked());
    assert_eq!(room.match_id(), Some(9));

    // createMatch was invoked exactly once, with both ledger ids and the
    // session uuid
    let calls = service.create_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].players, vec![3, 6]);
    assert_eq!(calls[0].session_uid, room.state().room_uid);

    assert_eq!(transport.broadcasts(), vec![ServerMsg::MatchStarted {}]);
}

#[tokio::test]
async fn test_both_players_start_from_the_generated_puzzle() {
    let service = StubMatchService::succeeding();
    let (mut room, _transport) = fresh_room(service);

    join_two(&mut room).await;

    let puzzle = room.state().puzzle.expect("puzzle generated at capacity");
    assert_eq!(room.state().player_count(), 2);
    for (_, player) in room.state().players() {
        assert_eq!(player.board, puzzle);
        assert_eq!(player.private_board, puzzle);
    }
}

#[tokio::test]
async fn test_joins_after_capacity_are_refused() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service);
    join_two(&mut room).await;

    room.on_join("c3".to_string(), profile(11, "late")).await;

    assert_eq!(room.state().player_count(), 2);
    assert!(room.state().player("c3").is_none());
    assert_eq!(transport.disconnected(), vec!["c3".to_string()]);
}
