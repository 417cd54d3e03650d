use crate::server::{
    error::AppError,
    model::event::{EventStatus, ParticipantStatus},
    service::event::EventService,
};
use test_utils::{builder::TestBuilder, factory, factory::event::EventFactory};

mod add_participant;
mod get_visible_upcoming_events;
mod update_event;
