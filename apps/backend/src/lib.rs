#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod test_support;

// Re-exports for public API
pub use config::{MatchServiceConfig, RoomConfig};
pub use domain::board::Board;
pub use domain::state::{ClientId, GamePhase, PlayerProfile, PlayerState, SessionState};
pub use error::AppError;
pub use services::match_service::{
    HttpMatchService, MatchOutcome, MatchService, MatchServiceError, OutcomeLabel, PlayerResult,
};
pub use session::protocol::{ClientMsg, ServerMsg};
pub use session::room::SudokuRoom;
pub use session::transport::{ScheduledTask, Transport};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::test_logging::init();
}
