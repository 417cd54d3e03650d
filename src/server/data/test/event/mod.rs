use chrono::{Duration, Utc};

use crate::server::{
    data::event::EventRepository,
    model::event::{EventStatus, ParticipantStatus},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_for_user;
mod get_upcoming;
mod save;
