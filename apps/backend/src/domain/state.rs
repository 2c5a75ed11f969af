//! Session data model: phases, player progress, and the state the host
//! mirrors to connected clients.

use serde::{Deserialize, Serialize};

use crate::domain::board::Board;

/// Host transport identifier of a connected client.
pub type ClientId = String;

/// Overall match progression. Strictly forward-moving; cancellation jumps
/// straight from `WaitingForPlayers` to `MatchEnded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Session created, fewer than the required players joined.
    WaitingForPlayers,
    /// Puzzle generated, match record confirmed, moves accepted.
    MatchActive,
    /// A player solved the puzzle, or the match was canceled.
    MatchEnded,
}

/// Verified identity payload the host hands to the session on join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Ledger id on the external match service.
    pub id: i64,
    pub profile_name: String,
    /// Opaque JSON blob describing the player's avatar.
    pub avatar: String,
}

/// One player's progress: the private board holds their actual values, the
/// public board shows the same cells as merely occupied.
///
/// Invariant: `board[i]` is non-empty exactly when `private_board[i]` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    pub profile: PlayerProfile,
    /// Visible to everyone; filled cells carry the occupied marker, never
    /// the real value.
    pub board: Board,
    /// Visible only to the owning player.
    pub private_board: Board,
}

impl PlayerState {
    /// Fresh progress with empty boards; both are overwritten with copies of
    /// the puzzle when the match starts.
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            board: Board::empty(),
            private_board: Board::empty(),
        }
    }
}

/// Everything a session owns: the shared puzzle, per-player progress in join
/// order, and the winner once decided.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub room_uid: String,
    /// `Some` from match start until disposal; never mutated after
    /// generation.
    pub puzzle: Option<Board>,
    players: Vec<(ClientId, PlayerState)>,
    pub winner_id: Option<ClientId>,
}

impl SessionState {
    pub fn new(room_uid: String) -> Self {
        Self {
            room_uid,
            puzzle: None,
            players: Vec::new(),
            winner_id: None,
        }
    }

    pub fn player(&self, client: &str) -> Option<&PlayerState> {
        self.players
            .iter()
            .find(|(id, _)| id == client)
            .map(|(_, player)| player)
    }

    pub fn player_mut(&mut self, client: &str) -> Option<&mut PlayerState> {
        self.players
            .iter_mut()
            .find(|(id, _)| id == client)
            .map(|(_, player)| player)
    }

    /// Appends a player entry; join order is preserved.
    pub fn insert_player(&mut self, client: ClientId, player: PlayerState) {
        debug_assert!(
            self.player(&client).is_none(),
            "duplicate player entry: {client}"
        );
        self.players.push((client, player));
    }

    pub fn remove_player(&mut self, client: &str) -> Option<PlayerState> {
        let position = self.players.iter().position(|(id, _)| id == client)?;
        Some(self.players.remove(position).1)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player entries in join order.
    pub fn players(&self) -> impl Iterator<Item = (&ClientId, &PlayerState)> {
        self.players.iter().map(|(id, player)| (id, player))
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = (&ClientId, &mut PlayerState)> {
        self.players.iter_mut().map(|(id, player)| (&*id, player))
    }

    pub fn client_ids(&self) -> Vec<ClientId> {
        self.players.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn clear_players(&mut self) {
        self.players.clear();
    }
}
