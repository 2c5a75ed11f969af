//! Client/session message contract.
//!
//! Inbound and outbound messages are closed tagged enums so dispatch is an
//! exhaustive `match` with strongly-typed payloads.

use serde::{Deserialize, Serialize};

use crate::domain::state::ClientId;

/// Messages a client may send. Only accepted while the match is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// Write `num` into the cell at `index` of the sender's private board.
    Fill { index: i32, num: i32 },
    /// Submit the sender's private board as a full solution.
    Complete {},
}

impl ClientMsg {
    /// Operation name used in log context.
    pub fn operation(&self) -> &'static str {
        match self {
            ClientMsg::Fill { .. } => "fill",
            ClientMsg::Complete {} => "complete",
        }
    }
}

/// Messages the session emits, unicast or room-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMsg {
    MatchStarted {},

    MatchCanceled {
        reason: String,
    },

    /// A player filled a cell. Carries the index only; the value stays on
    /// the mover's private board.
    PlayerMoved {
        player: ClientId,
        index: i32,
    },

    InvalidMove {
        error: String,
    },

    Completed {
        winner_id: ClientId,
        player_name: String,
    },

    Error {
        message: String,
    },
}
