//! Guild backend: the RBAC core, the dashboard API and the Discord mirror.
//!
//! Roles, their catalog permissions and the user-role links decide what a member may do;
//! the visibility policy decides which channels and events they may see. Both the HTTP
//! API and the bot funnel every mutation through the same services, so a rule enforced
//! for the dashboard is enforced for slash commands too.
//!
//! # Layers
//!
//! - `model/` - Domain types and the pure rules evaluated on them (permission
//!   membership, visibility, capacity, reactions)
//! - `data/` - Repositories over sea-orm entities; convert rows to domain models
//! - `service/` - Operations with existence, ownership and uniqueness checks, logged
//! - `controller/` - Axum handlers mapping DTOs to params and back
//! - `bot/` - Serenity handlers mirroring guild state, plus slash commands
//! - `middleware/` - Bearer token resolution and permission guard
//! - `error/` - `AppError` and its HTTP mapping
//!
//! `config`, `state`, `startup` and `router` wire these together at boot.
//!
//! # Request Flow
//!
//! 1. `router` dispatches to a controller
//! 2. `AuthGuard` resolves the caller from the bearer token and checks permissions
//! 3. The controller converts the DTO to params and calls a service
//! 4. The service loads domain models through repositories, applies the rules and saves
//! 5. The controller converts the result to a DTO

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
