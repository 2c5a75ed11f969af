//! In-memory doubles for the session's external seams.
//!
//! Compiled into the library so unit tests and the `tests/` scenarios share
//! one set of fakes; production hosts simply never construct them.

pub mod fake_transport;
pub mod stub_match_service;

pub use fake_transport::RecordingTransport;
pub use stub_match_service::{CreateCall, FinishCall, StubMatchService};
