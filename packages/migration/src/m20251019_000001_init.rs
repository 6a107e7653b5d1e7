use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Player {
    Table,
    Id,
    Name,
    Active,
}

#[derive(Iden)]
enum Session {
    Table,
    Id,
    Date,
    Active,
}

#[derive(Iden)]
enum SessionPlayer {
    Table,
    SessionId,
    PlayerId,
    Active,
}

#[derive(Iden)]
enum Round {
    Table,
    Id,
    SessionId,
    RoundNumber,
    MaxPoints,
    Active,
    WinnerId,
    CurrentGame,
    KnockCount,
}

#[derive(Iden)]
enum RoundPlayer {
    Table,
    Id,
    RoundId,
    PlayerId,
    Points,
    Eliminated,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // player
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Player::Name).string().not_null())
                    .col(
                        ColumnDef::new(Player::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // session
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Session::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Session::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Session::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // session_player (composite key, both sides cascade)
        manager
            .create_table(
                Table::create()
                    .table(SessionPlayer::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SessionPlayer::SessionId).integer().not_null())
                    .col(ColumnDef::new(SessionPlayer::PlayerId).integer().not_null())
                    .col(
                        ColumnDef::new(SessionPlayer::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .primary_key(
                        Index::create()
                            .col(SessionPlayer::SessionId)
                            .col(SessionPlayer::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_player_session_id")
                            .from(SessionPlayer::Table, SessionPlayer::SessionId)
                            .to(Session::Table, Session::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_player_player_id")
                            .from(SessionPlayer::Table, SessionPlayer::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_player_session_id")
                    .table(SessionPlayer::Table)
                    .col(SessionPlayer::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_session_player_player_id")
                    .table(SessionPlayer::Table)
                    .col(SessionPlayer::PlayerId)
                    .to_owned(),
            )
            .await?;

        // round
        manager
            .create_table(
                Table::create()
                    .table(Round::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Round::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Round::SessionId).integer().not_null())
                    .col(ColumnDef::new(Round::RoundNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Round::MaxPoints)
                            .integer()
                            .not_null()
                            .default(15),
                    )
                    .col(
                        ColumnDef::new(Round::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Round::WinnerId).integer().null())
                    .col(ColumnDef::new(Round::CurrentGame).integer().null())
                    .col(
                        ColumnDef::new(Round::KnockCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_session_id")
                            .from(Round::Table, Round::SessionId)
                            .to(Session::Table, Session::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_winner_id")
                            .from(Round::Table, Round::WinnerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_session_number")
                    .table(Round::Table)
                    .col(Round::SessionId)
                    .col(Round::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_player
        manager
            .create_table(
                Table::create()
                    .table(RoundPlayer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundPlayer::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundPlayer::RoundId).integer().not_null())
                    .col(ColumnDef::new(RoundPlayer::PlayerId).integer().not_null())
                    .col(
                        ColumnDef::new(RoundPlayer::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundPlayer::Eliminated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_player_round_id")
                            .from(RoundPlayer::Table, RoundPlayer::RoundId)
                            .to(Round::Table, Round::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_player_player_id")
                            .from(RoundPlayer::Table, RoundPlayer::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_player_round_player")
                    .table(RoundPlayer::Table)
                    .col(RoundPlayer::RoundId)
                    .col(RoundPlayer::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_round_player_player_id")
                    .table(RoundPlayer::Table)
                    .col(RoundPlayer::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; SQLite drops a table's indexes with it
        manager
            .drop_table(Table::drop().table(RoundPlayer::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Round::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SessionPlayer::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Session::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Player::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
