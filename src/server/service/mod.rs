//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and bot handlers on one side and the
//! repositories on the other. They are responsible for:
//!
//! - **Business Logic**: Enforcing ownership, capacity and visibility rules
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Keeping multi-row writes atomic

pub mod auth;
pub mod channel;
pub mod event;
pub mod message;
pub mod role;
pub mod stats;
pub mod user;
pub mod user_role;
