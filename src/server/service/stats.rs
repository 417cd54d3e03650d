use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::stats::StatsDto,
    server::{
        data::{
            channel::ChannelRepository, event::EventRepository, message::MessageRepository,
            role::RoleRepository, user::UserRepository,
        },
        error::AppError,
    },
};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts the records shown on the dashboard overview.
    pub async fn get_stats(&self) -> Result<StatsDto, AppError> {
        Ok(StatsDto {
            users: UserRepository::new(self.db).count().await?,
            roles: RoleRepository::new(self.db).count().await?,
            channels: ChannelRepository::new(self.db).count().await?,
            messages: MessageRepository::new(self.db).count().await?,
            upcoming_events: EventRepository::new(self.db)
                .count_upcoming(Utc::now())
                .await?,
        })
    }
}
