pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_role_table;
mod m20260301_000003_create_role_permission_table;
mod m20260301_000004_create_user_role_table;
mod m20260301_000005_create_channel_table;
mod m20260301_000006_create_channel_allow_list_tables;
mod m20260301_000007_create_event_table;
mod m20260301_000008_create_event_participant_table;
mod m20260301_000009_create_message_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_role_table::Migration),
            Box::new(m20260301_000003_create_role_permission_table::Migration),
            Box::new(m20260301_000004_create_user_role_table::Migration),
            Box::new(m20260301_000005_create_channel_table::Migration),
            Box::new(m20260301_000006_create_channel_allow_list_tables::Migration),
            Box::new(m20260301_000007_create_event_table::Migration),
            Box::new(m20260301_000008_create_event_participant_table::Migration),
            Box::new(m20260301_000009_create_message_tables::Migration),
        ]
    }
}
