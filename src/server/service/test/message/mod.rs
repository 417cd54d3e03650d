use crate::server::{error::AppError, service::message::MessageService};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod pin_message;
mod reactions;
mod search_messages;
mod update_message;
