//! Outbound calls to the external match service (the platform's system of
//! record for match creation and results).
//!
//! Pure request/response: any non-success status or transport error is
//! surfaced to the caller. Retry and backoff policy belongs to the caller
//! or deployment tooling, never here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::MatchServiceConfig;
use crate::domain::board::Board;

/// Header carrying the server-to-server key on every request.
pub const SERVER_KEY_HEADER: &str = "X-Suji-Server-Key";

#[derive(Error, Debug)]
pub enum MatchServiceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse {
        endpoint: &'static str,
        detail: String,
    },
}

/// Final-result label per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLabel {
    Win,
    Lose,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerResult {
    /// Ledger id on the match service.
    pub id: i64,
    /// The player's final private board.
    pub board: Board,
    pub result: OutcomeLabel,
}

/// Payload of the match-completion call.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// Ledger id of the winning player.
    pub winner: i64,
    /// End of match, unix milliseconds.
    pub end_time: i64,
    pub players: Vec<PlayerResult>,
}

#[derive(Debug, Serialize)]
struct CreateMatchRequest<'a> {
    players: &'a [i64],
    uuid: &'a str,
    match_type: i64,
}

#[derive(Debug, Deserialize)]
struct MatchTypeResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct CreateMatchResponse {
    result: CreatedMatch,
}

#[derive(Debug, Deserialize)]
struct CreatedMatch {
    id: i64,
}

/// Seam the session depends on; implemented over HTTP in production and by
/// a recording stub in tests.
#[async_trait]
pub trait MatchService {
    /// Creates the match record for this session. Returns the
    /// service-assigned match id.
    async fn create_match(
        &self,
        players: &[i64],
        session_uid: &str,
    ) -> Result<i64, MatchServiceError>;

    /// Posts the final result for this session's match.
    async fn finish_match(
        &self,
        session_uid: &str,
        outcome: &MatchOutcome,
    ) -> Result<(), MatchServiceError>;
}

/// HTTP implementation against the platform endpoints.
pub struct HttpMatchService {
    client: reqwest::Client,
    config: MatchServiceConfig,
}

impl HttpMatchService {
    pub fn new(config: MatchServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Match-type ids are service-assigned; creation needs a lookup by the
    /// configured type name first.
    async fn match_type_id(&self) -> Result<i64, MatchServiceError> {
        const ENDPOINT: &str = "match-type lookup";
        let response = self
            .client
            .get(self.endpoint("match_type/get_by_name/"))
            .query(&[("name", self.config.match_type_name.as_str())])
            .header(SERVER_KEY_HEADER, &self.config.server_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MatchServiceError::Status {
                endpoint: ENDPOINT,
                status: response.status().as_u16(),
            });
        }
        let body: MatchTypeResponse =
            response
                .json()
                .await
                .map_err(|err| MatchServiceError::MalformedResponse {
                    endpoint: ENDPOINT,
                    detail: err.to_string(),
                })?;
        Ok(body.id)
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn create_match(
        &self,
        players: &[i64],
        session_uid: &str,
    ) -> Result<i64, MatchServiceError> {
        const ENDPOINT: &str = "match creation";
        let match_type = self.match_type_id().await?;
        let request = CreateMatchRequest {
            players,
            uuid: session_uid,
            match_type,
        };
        let response = self
            .client
            .post(&self.config.match_create_url)
            .header(SERVER_KEY_HEADER, &self.config.server_key)
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MatchServiceError::Status {
                endpoint: ENDPOINT,
                status: response.status().as_u16(),
            });
        }
        let body: CreateMatchResponse =
            response
                .json()
                .await
                .map_err(|err| MatchServiceError::MalformedResponse {
                    endpoint: ENDPOINT,
                    detail: err.to_string(),
                })?;
        debug!(match_id = body.result.id, session_uid, "match record created");
        Ok(body.result.id)
    }

    async fn finish_match(
        &self,
        session_uid: &str,
        outcome: &MatchOutcome,
    ) -> Result<(), MatchServiceError> {
        const ENDPOINT: &str = "match completion";
        let response = self
            .client
            .post(self.endpoint(&format!("match/{session_uid}/finish/")))
            .header(SERVER_KEY_HEADER, &self.config.server_key)
            .json(outcome)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MatchServiceError::Status {
                endpoint: ENDPOINT,
                status: response.status().as_u16(),
            });
        }
        debug!(session_uid, "match result recorded");
        Ok(())
    }
}
