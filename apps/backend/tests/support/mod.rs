#![allow(dead_code)]

pub mod rooms;

// Logging is auto-installed for every scenario binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::test_logging::init();
}
