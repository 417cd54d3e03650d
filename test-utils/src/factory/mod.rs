//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories insert
//! rows directly through SeaORM so repository and service tests can arrange state without
//! going through the code under test.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let role = factory::role::RoleFactory::new(&db)
//!     .name("mod")
//!     .permissions(["KICK_MEMBERS"])
//!     .build()
//!     .await?;
//! factory::create_user_role(&db, user.id, role.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `role` - Create role entities with permission rows
//! - `user_role` - Link users to roles
//! - `channel` - Create channel entities
//! - `event` - Create event entities and participants
//! - `message` - Create message entities
//! - `helpers` - Unique id generation and multi-entity shortcuts

pub mod channel;
pub mod event;
pub mod helpers;
pub mod message;
pub mod role;
pub mod user;
pub mod user_role;

pub use channel::create_channel;
pub use event::{create_event, create_participant};
pub use message::create_message;
pub use role::create_role;
pub use user::create_user;
pub use user_role::create_user_role;
