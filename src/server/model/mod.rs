//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Pure rules (permission membership, visibility, capacity, reactions) live on the
//! models themselves so they can be evaluated against an in-memory snapshot.

pub mod access;
pub mod channel;
pub mod event;
pub mod message;
pub mod permission;
pub mod role;
pub mod user;
