use chrono::{Duration, Utc};

use crate::server::{data::message::MessageRepository, model::message::MessageEdit};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod append_edit;
mod get_by_channel;
mod save;
mod search;
