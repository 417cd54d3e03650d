use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionDto {
    pub emoji: String,
    pub count: usize,
    pub users: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEditDto {
    pub content: String,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: i32,
    pub discord_message_id: String,
    pub channel_id: i32,
    pub author_id: i32,
    pub content: String,
    pub kind: String,
    pub reactions: Vec<ReactionDto>,
    pub is_edited: bool,
    pub edit_history: Vec<MessageEditDto>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMessageDto {
    pub content: String,
}
