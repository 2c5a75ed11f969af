//! Session layer: message contract, host capability seam, and the match
//! state machine.

pub mod protocol;
pub mod room;
pub mod transport;

pub use protocol::{ClientMsg, ServerMsg};
pub use room::SudokuRoom;
pub use transport::{ScheduledTask, Transport};
