//! Service layer: clients for external collaborators.

pub mod match_service;

pub use match_service::{
    HttpMatchService, MatchOutcome, MatchService, MatchServiceError, OutcomeLabel, PlayerResult,
};
