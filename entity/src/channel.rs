use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "channel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub discord_channel_id: String,
    pub name: String,
    pub kind: String,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: bool,
    pub slow_mode: i32,
    pub nsfw: bool,
    pub auto_archive_duration: i32,
    pub created_by: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::channel_allowed_role::Entity")]
    ChannelAllowedRole,
    #[sea_orm(has_many = "super::channel_allowed_user::Entity")]
    ChannelAllowedUser,
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::channel_allowed_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChannelAllowedRole.def()
    }
}

impl Related<super::channel_allowed_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChannelAllowedUser.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
