//! Message domain models.
//!
//! Messages mirror tracked Discord messages. Only the author may edit or delete a
//! message; each edit appends the replaced content to the edit history.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::{fmt, str::FromStr};

use crate::{
    model::message::{MessageDto, MessageEditDto, ReactionDto},
    server::{error::AppError, util::parse::parse_stored_snowflake},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
    Embed,
    System,
    Command,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Embed => "embed",
            MessageKind::System => "system",
            MessageKind::Command => "command",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageKind::Text),
            "embed" => Ok(MessageKind::Embed),
            "system" => Ok(MessageKind::System),
            "command" => Ok(MessageKind::Command),
            other => Err(AppError::BadRequest(format!(
                "Unknown message kind '{}'",
                other
            ))),
        }
    }
}

/// Users who reacted with one emoji. The count is always `users.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub users: Vec<i32>,
}

impl Reaction {
    pub fn count(&self) -> usize {
        self.users.len()
    }
}

/// A previous version of a message's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEdit {
    pub content: String,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i32,
    pub discord_message_id: u64,
    pub channel_id: i32,
    pub author_id: i32,
    pub content: String,
    pub kind: MessageKind,
    /// Grouped by emoji in order of first reaction.
    pub reactions: Vec<Reaction>,
    pub is_edited: bool,
    /// Oldest first.
    pub edit_history: Vec<MessageEdit>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Converts a message row with its reaction and edit rows to a domain model.
    ///
    /// # Returns
    /// - `Ok(Message)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored snowflake or kind is invalid
    pub fn from_entity(
        entity: entity::message::Model,
        mut reactions: Vec<entity::message_reaction::Model>,
        mut edits: Vec<entity::message_edit::Model>,
    ) -> Result<Self, DbErr> {
        reactions.sort_by_key(|row| row.position);
        edits.sort_by_key(|row| row.id);

        let mut grouped: Vec<Reaction> = Vec::new();
        for row in reactions {
            match grouped.iter_mut().find(|r| r.emoji == row.emoji) {
                Some(reaction) => reaction.users.push(row.user_id),
                None => grouped.push(Reaction {
                    emoji: row.emoji,
                    users: vec![row.user_id],
                }),
            }
        }

        Ok(Self {
            id: entity.id,
            discord_message_id: parse_stored_snowflake(
                &entity.discord_message_id,
                "discord_message_id",
            )?,
            channel_id: entity.channel_id,
            author_id: entity.author_id,
            content: entity.content,
            kind: entity
                .kind
                .parse()
                .map_err(|e| DbErr::Custom(format!("Failed to parse message kind: {}", e)))?,
            reactions: grouped,
            is_edited: entity.is_edited,
            edit_history: edits
                .into_iter()
                .map(|row| MessageEdit {
                    content: row.content,
                    edited_at: row.edited_at,
                })
                .collect(),
            is_pinned: entity.is_pinned,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Records `user_id` as reacting with `emoji`. Returns whether anything changed.
    pub fn add_reaction(&mut self, emoji: &str, user_id: i32) -> bool {
        match self.reactions.iter_mut().find(|r| r.emoji == emoji) {
            Some(reaction) if reaction.users.contains(&user_id) => false,
            Some(reaction) => {
                reaction.users.push(user_id);
                true
            }
            None => {
                self.reactions.push(Reaction {
                    emoji: emoji.to_string(),
                    users: vec![user_id],
                });
                true
            }
        }
    }

    /// Withdraws a reaction, dropping the emoji once nobody uses it.
    pub fn remove_reaction(&mut self, emoji: &str, user_id: i32) -> bool {
        let Some(index) = self.reactions.iter().position(|r| r.emoji == emoji) else {
            return false;
        };

        let reaction = &mut self.reactions[index];
        let before = reaction.users.len();
        reaction.users.retain(|id| *id != user_id);
        let changed = reaction.users.len() != before;

        if reaction.users.is_empty() {
            self.reactions.remove(index);
        }

        changed
    }

    /// Replaces the content and returns the history entry for the replaced version.
    ///
    /// The entry is stamped with the previous `updated_at`, i.e. when that version was
    /// last current.
    pub fn edit(&mut self, content: String, now: DateTime<Utc>) -> MessageEdit {
        let previous = MessageEdit {
            content: std::mem::replace(&mut self.content, content),
            edited_at: self.updated_at,
        };

        self.edit_history.push(previous.clone());
        self.is_edited = true;
        self.updated_at = now;

        previous
    }

    pub fn into_dto(self) -> MessageDto {
        MessageDto {
            id: self.id,
            discord_message_id: self.discord_message_id.to_string(),
            channel_id: self.channel_id,
            author_id: self.author_id,
            content: self.content,
            kind: self.kind.as_str().to_string(),
            reactions: self
                .reactions
                .into_iter()
                .map(|r| ReactionDto {
                    count: r.count(),
                    emoji: r.emoji,
                    users: r.users,
                })
                .collect(),
            is_edited: self.is_edited,
            edit_history: self
                .edit_history
                .into_iter()
                .map(|e| MessageEditDto {
                    content: e.content,
                    edited_at: e.edited_at,
                })
                .collect(),
            is_pinned: self.is_pinned,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for recording a message mirrored from Discord.
#[derive(Debug, Clone)]
pub struct CreateMessageParams {
    pub discord_message_id: u64,
    pub channel_id: i32,
    pub author_id: i32,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}
