//! Match-creation rollback: a failed creation cancels the session instead
//! of starting it, and the room never reopens.

mod support;

use backend::domain::state::GamePhase;
use backend::session::protocol::ServerMsg;
use backend::session::transport::ScheduledTask;
use backend::test_support::StubMatchService;
use support::rooms::{fresh_room, join_two, profile};

#[tokio::test]
async fn test_failed_creation_cancels_the_match() {
    let service = StubMatchService::failing_create();
    let (mut room, transport) = fresh_room(service.clone());

    join_two(&mut room).await;

    assert_eq!(room.phase(), GamePhase::MatchEnded);
    assert!(room.match_id().is_none());
    assert_eq!(service.create_calls().len(), 1);

    let broadcasts = transport.broadcasts();
    assert_eq!(
        broadcasts,
        vec![ServerMsg::MatchCanceled {
            reason: "match creation failed".to_string(),
        }]
    );
    assert!(!broadcasts.contains(&ServerMsg::MatchStarted {}));
}

#[tokio::test]
async fn test_failed_creation_schedules_disposal() {
    let service = StubMatchService::failing_create();
    let (mut room, transport) = fresh_room(service);

    join_two(&mut room).await;

    assert!(room.is_disposing());
    let scheduled = transport.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].1, ScheduledTask::Dispose);
}

#[tokio::test]
async fn test_canceled_room_stays_locked_to_new_players() {
    let service = StubMatchService::failing_create();
    let (mut room, transport) = fresh_room(service);
    join_two(&mut room).await;

    room.on_join("c3".to_string(), profile(11, "late")).await;

    assert!(room.is_locked());
    assert_eq!(room.state().player_count(), 2);
    assert_eq!(transport.disconnected(), vec!["c3".to_string()]);
}

#[tokio::test]
async fn test_disposal_disconnects_remaining_clients() {
    let service = StubMatchService::failing_create();
    let (mut room, transport) = fresh_room(service);
    join_two(&mut room).await;

    for (_, task) in transport.take_scheduled() {
        room.on_scheduled(task);
    }

    let disconnected = transport.disconnected();
    assert!(disconnected.contains(&"c1".to_string()));
    assert!(disconnected.contains(&"c2".to_string()));
    assert_eq!(room.state().player_count(), 0);
}
