use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub session_id: i32,
    pub round_number: i32,
    pub max_points: i32,
    pub active: bool,
    pub winner_id: Option<i32>,
    pub current_game: Option<i32>,
    pub knock_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::WinnerId",
        to = "super::players::Column::Id",
        on_delete = "SetNull"
    )]
    Winner,
    #[sea_orm(has_many = "super::round_players::Entity")]
    RoundPlayers,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::round_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
