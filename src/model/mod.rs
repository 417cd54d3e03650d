//! Wire DTOs exchanged over the HTTP API.
//!
//! Discord snowflakes travel as strings so JavaScript clients never lose precision.
//! Enumerated values (permissions, statuses, kinds) travel as their string names and are
//! validated when converted into server-side parameter types.

pub mod api;
pub mod channel;
pub mod event;
pub mod message;
pub mod role;
pub mod stats;
pub mod user;
