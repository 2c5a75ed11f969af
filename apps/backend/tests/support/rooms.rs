//! Room construction helpers for session scenario tests.

use backend::config::RoomConfig;
use backend::domain::state::PlayerProfile;
use backend::session::room::SudokuRoom;
use backend::test_support::{RecordingTransport, StubMatchService};

pub type TestRoom = SudokuRoom<RecordingTransport, StubMatchService>;

pub fn profile(id: i64, name: &str) -> PlayerProfile {
    PlayerProfile {
        id,
        profile_name: name.to_string(),
        avatar: "{\"skin\":\"default\"}".to_string(),
    }
}

/// Room at minimum difficulty so puzzle carving stays fast in debug builds.
/// Keep a clone of the returned transport (and of the service you pass in)
/// for assertions; the room consumes its copies.
pub fn fresh_room(service: StubMatchService) -> (TestRoom, RecordingTransport) {
    let transport = RecordingTransport::new();
    let config = RoomConfig {
        difficulty: 0.0,
        ..RoomConfig::default()
    };
    let room = SudokuRoom::new(config, transport.clone(), service);
    (room, transport)
}

/// Joins the two standard test players: client "c1" (ledger id 3, "ada")
/// and client "c2" (ledger id 6, "grace"). With a succeeding match service
/// the room is active afterwards.
pub async fn join_two(room: &mut TestRoom) {
    room.on_join("c1".to_string(), profile(3, "ada")).await;
    room.on_join("c2".to_string(), profile(6, "grace")).await;
}
