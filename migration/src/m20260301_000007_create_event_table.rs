use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Name))
                    .col(text(Event::Description))
                    .col(string(Event::Kind))
                    .col(timestamp_with_time_zone(Event::StartDate))
                    .col(timestamp_with_time_zone_null(Event::EndDate))
                    .col(string_null(Event::Location))
                    .col(integer(Event::OrganizerId))
                    .col(integer_null(Event::MaxParticipants))
                    .col(boolean(Event::IsPrivate))
                    .col(string_null(Event::RecurringPattern))
                    .col(string(Event::Status))
                    .col(timestamp_with_time_zone(Event::CreatedAt))
                    .col(timestamp_with_time_zone(Event::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organizer_id")
                            .from(Event::Table, Event::OrganizerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_start_date")
                    .table(Event::Table)
                    .col(Event::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Name,
    Description,
    Kind,
    StartDate,
    EndDate,
    Location,
    OrganizerId,
    MaxParticipants,
    IsPrivate,
    RecurringPattern,
    Status,
    CreatedAt,
    UpdatedAt,
}
