//! The match session state machine.
//!
//! A `SudokuRoom` is one logical actor: the host invokes `on_join`,
//! `on_leave`, `handle_message`, and `on_scheduled` one at a time, in
//! delivery order. The only suspension points are the awaited match-service
//! calls; state written before such an await is committed, and the
//! continuation re-checks the player mapping instead of assuming nothing
//! changed while the call was outstanding.

use time::OffsetDateTime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::RoomConfig;
use crate::domain::board::OCCUPIED_CELL;
use crate::domain::generator;
use crate::domain::rules;
use crate::domain::state::{ClientId, GamePhase, PlayerProfile, PlayerState, SessionState};
use crate::error::AppError;
use crate::services::match_service::{MatchOutcome, MatchService, OutcomeLabel, PlayerResult};
use crate::session::protocol::{ClientMsg, ServerMsg};
use crate::session::transport::{ScheduledTask, Transport};

/// Private notice for any request outside the active phase.
pub const NOT_RUNNING_NOTICE: &str = "Game is not running.";

const SERVER_ERROR_NOTICE: &str = "server error";

pub struct SudokuRoom<T: Transport, M: MatchService> {
    config: RoomConfig,
    transport: T,
    match_service: M,
    state: SessionState,
    phase: GamePhase,
    /// Set once the room reaches capacity; never cleared, whatever the
    /// match-creation outcome.
    locked: bool,
    /// Set once teardown has been scheduled; leaves arriving afterwards are
    /// ignored (players are presumed already informed).
    disposing: bool,
    match_id: Option<i64>,
    /// Entries of players inside their reconnection grace window, in leave
    /// order.
    awaiting_reconnect: Vec<(ClientId, PlayerState)>,
}

impl<T: Transport, M: MatchService> SudokuRoom<T, M> {
    pub fn new(config: RoomConfig, transport: T, match_service: M) -> Self {
        let state = SessionState::new(Uuid::new_v4().to_string());
        info!(room_uid = %state.room_uid, "session created");
        Self {
            config,
            transport,
            match_service,
            state,
            phase: GamePhase::WaitingForPlayers,
            locked: false,
            disposing: false,
            match_id: None,
            awaiting_reconnect: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_disposing(&self) -> bool {
        self.disposing
    }

    /// Handle assigned by the match service on creation.
    pub fn match_id(&self) -> Option<i64> {
        self.match_id
    }

    /// Host hook: a client joined with a verified profile.
    ///
    /// A client id still inside its reconnection grace window is restored
    /// with its progress intact. Otherwise, a locked or disposing room
    /// refuses the join; an open room adds the player and, at capacity,
    /// starts the match.
    pub async fn on_join(&mut self, client: ClientId, profile: PlayerProfile) {
        if self.disposing {
            warn!(room_uid = %self.state.room_uid, client = %client, "join refused: session is disposing");
            self.transport.disconnect(&client);
            return;
        }

        if let Some(position) = self
            .awaiting_reconnect
            .iter()
            .position(|(id, _)| *id == client)
        {
            let (client, player) = self.awaiting_reconnect.remove(position);
            info!(room_uid = %self.state.room_uid, client = %client, "player reconnected");
            self.state.insert_player(client, player);
            return;
        }

        if self.locked {
            warn!(room_uid = %self.state.room_uid, client = %client, "join refused: room is locked");
            self.transport.disconnect(&client);
            return;
        }

        info!(
            room_uid = %self.state.room_uid,
            client = %client,
            player_id = profile.id,
            "player joined"
        );
        self.state.insert_player(client, PlayerState::new(profile));

        if self.state.player_count() == self.config.required_players {
            self.start_match().await;
        }
    }

    /// Lock, generate the puzzle, seed both players' boards, then create the
    /// match record. The start event goes out only after the service
    /// confirms creation; any failure cancels the match instead.
    async fn start_match(&mut self) {
        self.locked = true;

        let puzzle = generator::generate(self.config.difficulty);
        for (_, player) in self.state.players_mut() {
            player.board = puzzle;
            player.private_board = puzzle;
        }
        self.state.puzzle = Some(puzzle);

        // Immutable snapshot for the outbound call; the mapping may change
        // while the call is outstanding.
        let player_ids: Vec<i64> = self
            .state
            .players()
            .map(|(_, player)| player.profile.id)
            .collect();
        let room_uid = self.state.room_uid.clone();

        match self.match_service.create_match(&player_ids, &room_uid).await {
            Ok(match_id) => {
                if self.state.player_count() < self.config.required_players {
                    warn!(room_uid = %room_uid, match_id, "player departed during match creation");
                    self.cancel_match("player left during match creation");
                    return;
                }
                self.match_id = Some(match_id);
                self.phase = GamePhase::MatchActive;
                info!(room_uid = %room_uid, match_id, "match started");
                self.transport.broadcast(&ServerMsg::MatchStarted {});
            }
            Err(err) => {
                warn!(room_uid = %room_uid, error = %err, "match creation failed");
                self.cancel_match("match creation failed");
            }
        }
    }

    fn cancel_match(&mut self, reason: &str) {
        self.phase = GamePhase::MatchEnded;
        self.transport.broadcast(&ServerMsg::MatchCanceled {
            reason: reason.to_string(),
        });
        self.schedule_dispose();
    }

    fn schedule_dispose(&mut self) {
        if self.disposing {
            return;
        }
        self.disposing = true;
        info!(
            room_uid = %self.state.room_uid,
            delay_secs = self.config.dispose_delay.as_secs(),
            "disposal scheduled"
        );
        self.transport
            .schedule_once(self.config.dispose_delay, ScheduledTask::Dispose);
    }

    /// Host hook: a message arrived from a connected client.
    ///
    /// This is the fault boundary: a handler error is logged with its
    /// operation and, if the sender's player entry is intact, surfaced as a
    /// generic server-error broadcast. The session stays in its phase.
    pub async fn handle_message(&mut self, client: &str, msg: ClientMsg) {
        let operation = msg.operation();
        if let Err(err) = self.dispatch(client, msg).await {
            error!(
                room_uid = %self.state.room_uid,
                client,
                operation,
                error = %err,
                "message handling failed"
            );
            if self.state.player(client).is_some() {
                self.transport.broadcast(&ServerMsg::Error {
                    message: SERVER_ERROR_NOTICE.to_string(),
                });
            }
        }
    }

    async fn dispatch(&mut self, client: &str, msg: ClientMsg) -> Result<(), AppError> {
        if self.phase != GamePhase::MatchActive {
            self.transport.send_to(
                client,
                &ServerMsg::Error {
                    message: NOT_RUNNING_NOTICE.to_string(),
                },
            );
            return Ok(());
        }
        match msg {
            ClientMsg::Fill { index, num } => self.handle_fill(client, index, num),
            ClientMsg::Complete {} => self.handle_complete(client).await,
        }
    }

    fn handle_fill(&mut self, client: &str, index: i32, num: i32) -> Result<(), AppError> {
        let Some(puzzle) = self.state.puzzle else {
            return Err(AppError::internal("puzzle missing in active match"));
        };

        if !rules::is_valid_move(index, &puzzle, num) {
            debug!(room_uid = %self.state.room_uid, client, index, num, "move rejected");
            self.transport.send_to(
                client,
                &ServerMsg::InvalidMove {
                    error: format!("{index} index is not a valid move."),
                },
            );
            return Ok(());
        }

        let Some(player) = self.state.player_mut(client) else {
            // sender departed between delivery and handling
            debug!(room_uid = %self.state.room_uid, client, "move from absent player ignored");
            return Ok(());
        };
        let cell = index as usize;
        player.private_board.set(cell, num as i8);
        player.board.set(cell, OCCUPIED_CELL);

        self.transport.broadcast(&ServerMsg::PlayerMoved {
            player: client.to_string(),
            index,
        });
        Ok(())
    }

    async fn handle_complete(&mut self, client: &str) -> Result<(), AppError> {
        let (winner_name, winner_ledger_id, solved) = match self.state.player(client) {
            Some(player) => (
                player.profile.profile_name.clone(),
                player.profile.id,
                rules::is_solved(&player.private_board),
            ),
            None => {
                debug!(room_uid = %self.state.room_uid, client, "completion from absent player ignored");
                return Ok(());
            }
        };

        if !solved {
            // not a winning submission; deliberately silent towards the
            // sender (feedback is a future policy hook)
            debug!(room_uid = %self.state.room_uid, client, "completion submitted with unsolved board");
            return Ok(());
        }

        self.phase = GamePhase::MatchEnded;
        self.state.winner_id = Some(client.to_string());
        info!(room_uid = %self.state.room_uid, winner = client, "match completed");
        self.transport.broadcast(&ServerMsg::Completed {
            winner_id: client.to_string(),
            player_name: winner_name,
        });

        // Snapshot before the await: only players still present are
        // reported, and later mapping changes cannot leak into the payload.
        let outcome = MatchOutcome {
            winner: winner_ledger_id,
            end_time: unix_millis_now(),
            players: self
                .state
                .players()
                .map(|(_, player)| PlayerResult {
                    id: player.profile.id,
                    board: player.private_board,
                    result: if player.profile.id == winner_ledger_id {
                        OutcomeLabel::Win
                    } else {
                        OutcomeLabel::Lose
                    },
                })
                .collect(),
        };
        let room_uid = self.state.room_uid.clone();
        if let Err(err) = self.match_service.finish_match(&room_uid, &outcome).await {
            // the match already ended for the players; record and move on
            warn!(room_uid = %room_uid, error = %err, "failed to record match result");
        }

        self.schedule_dispose();
        Ok(())
    }

    /// Host hook: a client's connection dropped.
    ///
    /// The player's entry moves into the reconnection stash for the grace
    /// window; placements are kept either way.
    pub fn on_leave(&mut self, client: &str) {
        if self.disposing {
            debug!(room_uid = %self.state.room_uid, client, "leave ignored during disposal");
            return;
        }
        let Some(player) = self.state.remove_player(client) else {
            debug!(room_uid = %self.state.room_uid, client, "leave from unknown client ignored");
            return;
        };

        info!(
            room_uid = %self.state.room_uid,
            client,
            grace_secs = self.config.reconnection_grace.as_secs(),
            "player left; reconnection window open"
        );
        self.awaiting_reconnect.push((client.to_string(), player));
        self.transport.schedule_once(
            self.config.reconnection_grace,
            ScheduledTask::ReconnectionExpired {
                client: client.to_string(),
            },
        );
    }

    /// Host hook: a task scheduled via the transport came due.
    pub fn on_scheduled(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::Dispose => self.dispose(),
            ScheduledTask::ReconnectionExpired { client } => {
                let Some(position) = self
                    .awaiting_reconnect
                    .iter()
                    .position(|(id, _)| *id == client)
                else {
                    // the player already reconnected; stale timer
                    debug!(room_uid = %self.state.room_uid, client = %client, "stale reconnection timer");
                    return;
                };
                self.awaiting_reconnect.remove(position);
                info!(
                    room_uid = %self.state.room_uid,
                    client = %client,
                    "reconnection window elapsed; player departed"
                );
            }
        }
    }

    fn dispose(&mut self) {
        info!(room_uid = %self.state.room_uid, "disposing session");
        for client in self.state.client_ids() {
            self.transport.disconnect(&client);
        }
        self.state.clear_players();
        self.awaiting_reconnect.clear();
    }
}

fn unix_millis_now() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
