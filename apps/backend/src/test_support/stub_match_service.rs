use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::services::match_service::{MatchOutcome, MatchService, MatchServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub players: Vec<i64>,
    pub session_uid: String,
}

#[derive(Debug, Clone)]
pub struct FinishCall {
    pub session_uid: String,
    pub outcome: MatchOutcome,
}

#[derive(Default)]
struct Inner {
    create_calls: Vec<CreateCall>,
    finish_calls: Vec<FinishCall>,
}

/// Match service double: records every call and answers with a canned
/// result. Clones share the same record.
#[derive(Clone)]
pub struct StubMatchService {
    inner: Arc<Mutex<Inner>>,
    fail_create: bool,
    fail_finish: bool,
    match_id: i64,
}

impl StubMatchService {
    pub fn succeeding() -> Self {
        Self {
            inner: Arc::default(),
            fail_create: false,
            fail_finish: false,
            match_id: 9,
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::succeeding()
        }
    }

    pub fn failing_finish() -> Self {
        Self {
            fail_finish: true,
            ..Self::succeeding()
        }
    }

    pub fn create_calls(&self) -> Vec<CreateCall> {
        self.inner.lock().create_calls.clone()
    }

    pub fn finish_calls(&self) -> Vec<FinishCall> {
        self.inner.lock().finish_calls.clone()
    }
}

#[async_trait]
impl MatchService for StubMatchService {
    async fn create_match(
        &self,
        players: &[i64],
        session_uid: &str,
    ) -> Result<i64, MatchServiceError> {
        self.inner.lock().create_calls.push(CreateCall {
            players: players.to_vec(),
            session_uid: session_uid.to_string(),
        });
        if self.fail_create {
            return Err(MatchServiceError::Status {
                endpoint: "match creation",
                status: 500,
            });
        }
        Ok(self.match_id)
    }

    async fn finish_match(
        &self,
        session_uid: &str,
        outcome: &MatchOutcome,
    ) -> Result<(), MatchServiceError> {
        self.inner.lock().finish_calls.push(FinishCall {
            session_uid: session_uid.to_string(),
            outcome: outcome.clone(),
        });
        if self.fail_finish {
            return Err(MatchServiceError::Status {
                endpoint: "match completion",
                status: 500,
            });
        }
        Ok(())
    }
}
