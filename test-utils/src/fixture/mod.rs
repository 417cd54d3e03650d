//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. Use them to test
//! entity-to-domain conversion and pure domain rules without database overhead.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let role = fixture::role::entity();
//! let event = fixture::event::entity_builder().max_participants(3).build();
//! ```

pub mod event;
pub mod role;

pub use event::{entity as event_entity, entity_builder as event_entity_builder};
pub use role::{entity as role_entity, entity_builder as role_entity_builder};
