//! Solution submission: winner recording, result reporting, and the silent
//! rejection of unsolved submissions.

mod support;

use backend::domain::generator;
use backend::domain::state::GamePhase;
use backend::services::match_service::OutcomeLabel;
use backend::session::protocol::{ClientMsg, ServerMsg};
use backend::session::transport::ScheduledTask;
use backend::test_support::StubMatchService;
use support::rooms::{fresh_room, join_two, TestRoom};

/// Plays the puzzle's unique solution into `client`'s private board through
/// ordinary fill messages.
async fn fill_solution(room: &mut TestRoom, client: &str) {
    let puzzle = room.state().puzzle.expect("active match has a puzzle");
    let solution = generator::solve(&puzzle).expect("generated puzzles are solvable");
    for index in puzzle.empty_indices().collect::<Vec<_>>() {
        room.handle_message(
            client,
            ClientMsg::Fill {
                index: index as i32,
                num: i32::from(solution.get(index)),
            },
        )
        .await;
    }
}

#[tokio::test]
async fn test_solved_submission_ends_the_match() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service.clone());
    join_two(&mut room).await;

    fill_solution(&mut room, "c1").await;
    room.handle_message("c1", ClientMsg::Complete {}).await;

    assert_eq!(room.phase(), GamePhase::MatchEnded);
    assert_eq!(room.state().winner_id.as_deref(), Some("c1"));
    assert!(transport.broadcasts().contains(&ServerMsg::Completed {
        winner_id: "c1".to_string(),
        player_name: "ada".to_string(),
    }));
    assert!(room.is_disposing());
    assert!(transport
        .scheduled()
        .iter()
        .any(|(_, task)| *task == ScheduledTask::Dispose));
}

#[tokio::test]
async fn test_finish_payload_reports_both_players_with_labels() {
    let service = StubMatchService::succeeding();
    let (mut room, _transport) = fresh_room(service.clone());
    join_two(&mut room).await;

    let puzzle = room.state().puzzle.expect("active match has a puzzle");
    fill_solution(&mut room, "c1").await;
    room.handle_message("c1", ClientMsg::Complete {}).await;

    let finishes = service.finish_calls();
    assert_eq!(finishes.len(), 1);
    let call = &finishes[0];
    assert_eq!(call.session_uid, room.state().room_uid);

    let outcome = &call.outcome;
    assert_eq!(outcome.winner, 3);
    assert!(outcome.end_time > 0);
    assert_eq!(outcome.players.len(), 2);

    let winner = outcome.players.iter().find(|p| p.id == 3).expect("winner reported");
    assert_eq!(winner.result, OutcomeLabel::Win);
    assert!(backend::domain::rules::is_solved(&winner.board));

    let loser = outcome.players.iter().find(|p| p.id == 6).expect("loser reported");
    assert_eq!(loser.result, OutcomeLabel::Lose);
    assert_eq!(loser.board, puzzle);
}

#[tokio::test]
async fn test_unsolved_submission_is_silently_ignored() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service.clone());
    join_two(&mut room).await;

    room.handle_message("c1", ClientMsg::Complete {}).await;

    assert_eq!(room.phase(), GamePhase::MatchActive);
    assert!(room.state().winner_id.is_none());
    assert!(service.finish_calls().is_empty());
    assert!(transport.unicasts_to("c1").is_empty());
    assert!(!transport
        .broadcasts()
        .iter()
        .any(|msg| matches!(msg, ServerMsg::Completed { .. })));
}

#[tokio::test]
async fn test_finish_failure_does_not_undo_the_match_end() {
    let service = StubMatchService::failing_finish();
    let (mut room, transport) = fresh_room(service.clone());
    join_two(&mut room).await;

    fill_solution(&mut room, "c2").await;
    room.handle_message("c2", ClientMsg::Complete {}).await;

    // the phase moved before the service call; its failure is only logged
    assert_eq!(room.phase(), GamePhase::MatchEnded);
    assert_eq!(room.state().winner_id.as_deref(), Some("c2"));
    assert_eq!(service.finish_calls().len(), 1);
    assert!(transport.broadcasts().contains(&ServerMsg::Completed {
        winner_id: "c2".to_string(),
        player_name: "grace".to_string(),
    }));
    assert!(room.is_disposing());
}

#[tokio::test]
async fn test_moves_after_the_match_ended_get_the_not_running_notice() {
    let service = StubMatchService::succeeding();
    let (mut room, transport) = fresh_room(service);
    join_two(&mut room).await;
    fill_solution(&mut room, "c1").await;
    room.handle_message("c1", ClientMsg::Complete {}).await;

    room.handle_message("c2", ClientMsg::Fill { index: 0, num: 1 }).await;

    assert!(matches!(
        transport.unicasts_to("c2").last(),
        Some(ServerMsg::Error { .. })
    ));
}
