pub use super::channel::Entity as Channel;
pub use super::channel_allowed_role::Entity as ChannelAllowedRole;
pub use super::channel_allowed_user::Entity as ChannelAllowedUser;
pub use super::event::Entity as Event;
pub use super::event_participant::Entity as EventParticipant;
pub use super::message::Entity as Message;
pub use super::message_edit::Entity as MessageEdit;
pub use super::message_reaction::Entity as MessageReaction;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
