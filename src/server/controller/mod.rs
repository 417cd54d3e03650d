//! HTTP request handlers.
//!
//! Each handler authenticates the caller through `AuthGuard`, converts DTOs into
//! operation parameters, delegates to a service and converts the result back to a DTO.

pub mod channel;
pub mod event;
pub mod message;
pub mod role;
pub mod stats;
pub mod user;
