//! Permission catalog.
//!
//! The closed set of capabilities a role can grant. Permissions are persisted and sent
//! over the wire by their SCREAMING_SNAKE_CASE names.

use serenity::all::Permissions;
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::server::error::AppError;

/// Discord permission bits and the catalog entry each one grants.
const DISCORD_MAPPING: [(Permissions, Permission); 10] = [
    (Permissions::MANAGE_CHANNELS, Permission::ManageChannels),
    (Permissions::MANAGE_ROLES, Permission::ManageRoles),
    (Permissions::MANAGE_MESSAGES, Permission::ManageMessages),
    (Permissions::KICK_MEMBERS, Permission::KickMembers),
    (Permissions::BAN_MEMBERS, Permission::BanMembers),
    (Permissions::MANAGE_EVENTS, Permission::CreateEvents),
    (Permissions::MANAGE_EVENTS, Permission::ManageEvents),
    (Permissions::VIEW_AUDIT_LOG, Permission::ViewAuditLog),
    (Permissions::SEND_MESSAGES, Permission::SendMessages),
    (Permissions::VIEW_CHANNEL, Permission::ReadMessages),
];

/// An atomic capability grantable through role membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    ManageChannels,
    ManageRoles,
    ManageMessages,
    KickMembers,
    BanMembers,
    CreateEvents,
    ManageEvents,
    ViewAuditLog,
    SendMessages,
    ReadMessages,
}

impl Permission {
    /// Every permission in catalog order.
    pub const ALL: [Permission; 10] = [
        Permission::ManageChannels,
        Permission::ManageRoles,
        Permission::ManageMessages,
        Permission::KickMembers,
        Permission::BanMembers,
        Permission::CreateEvents,
        Permission::ManageEvents,
        Permission::ViewAuditLog,
        Permission::SendMessages,
        Permission::ReadMessages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ManageChannels => "MANAGE_CHANNELS",
            Permission::ManageRoles => "MANAGE_ROLES",
            Permission::ManageMessages => "MANAGE_MESSAGES",
            Permission::KickMembers => "KICK_MEMBERS",
            Permission::BanMembers => "BAN_MEMBERS",
            Permission::CreateEvents => "CREATE_EVENTS",
            Permission::ManageEvents => "MANAGE_EVENTS",
            Permission::ViewAuditLog => "VIEW_AUDIT_LOG",
            Permission::SendMessages => "SEND_MESSAGES",
            Permission::ReadMessages => "READ_MESSAGES",
        }
    }

    /// Maps a Discord role's permission bits onto the catalog.
    ///
    /// `ADMINISTRATOR` grants the whole catalog. `VIEW_CHANNEL` maps to `READ_MESSAGES`
    /// and Discord's `MANAGE_EVENTS` grants both event permissions.
    pub fn from_discord(permissions: Permissions) -> BTreeSet<Permission> {
        if permissions.contains(Permissions::ADMINISTRATOR) {
            return Permission::ALL.into_iter().collect();
        }

        DISCORD_MAPPING
            .into_iter()
            .filter(|(bits, _)| permissions.contains(*bits))
            .map(|(_, permission)| permission)
            .collect()
    }

    /// Parses a list of permission names, rejecting unknown names.
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> Result<BTreeSet<Permission>, AppError> {
        values.iter().map(|value| value.as_ref().parse()).collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown permission '{}'", s)))
    }
}
