//! CDP discovery wire types
//!
//! Only the HTTP introspection side of the protocol lives here.
//! Nothing in this crate speaks WebSocket.

pub mod protocol;

pub use protocol::{accept_all, Target, TargetFilter, TargetId};
