//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's API would return, so bot-side sync logic can be tested without a gateway.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::role::create_test_role;
//!
//! let admin_role = create_test_role(111111111, "Admin", 0xFF0000, 10);
//! ```

pub mod role;

pub use role::{create_test_role, create_test_role_with_permissions};
