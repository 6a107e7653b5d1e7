//! Round service - bridges the pure scoring rules with DB persistence.
//!
//! Every scoring action loads the round into a [`RoundState`], applies the
//! rule, and writes back only the rows that changed.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::adapters::rounds_sea::RoundUpdate;
use crate::domain::rules::{MaxPoints, MIN_ROUND_PLAYERS};
use crate::domain::scoring::{self, WinOutcome};
use crate::domain::state::{RoundState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::relations::{self, RoundWithPlayers};
use crate::repos::{round_players, rounds, session_players, sessions};

/// Build the scoring snapshot of a loaded round.
pub fn round_state(loaded: &RoundWithPlayers) -> Result<RoundState, DomainError> {
    let round = &loaded.round;
    Ok(RoundState {
        max_points: MaxPoints::from_value(round.max_points)?,
        active: round.active,
        winner_id: round.winner_id,
        current_game: round.current_game.unwrap_or(1),
        knocks: round.knock_count,
        seats: loaded
            .players
            .iter()
            .map(|p| Seat {
                player_id: p.player.id,
                points: p.round_player.points,
                eliminated: p.round_player.eliminated,
            })
            .collect(),
    })
}

pub struct RoundService;

impl RoundService {
    pub fn new() -> Self {
        Self
    }

    /// Start the next round of a session with every session-active player.
    ///
    /// Other open rounds of the session are closed first.
    pub async fn start_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        session_id: i32,
        max_points: MaxPoints,
    ) -> Result<RoundWithPlayers, DomainError> {
        let session = sessions::require_session(conn, session_id).await?;
        if !session.active {
            return Err(DomainError::validation(
                ValidationKind::SessionClosed,
                format!("Session {session_id} is closed"),
            ));
        }

        let player_ids = session_players::list_active_player_ids(conn, session_id).await?;
        if player_ids.len() < MIN_ROUND_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!(
                    "A round needs at least {MIN_ROUND_PLAYERS} active players, session {session_id} has {}",
                    player_ids.len()
                ),
            ));
        }

        let closed = rounds::deactivate_active_in_session(conn, session_id).await?;
        let round_number = rounds::next_round_number(conn, session_id).await?;
        let round = rounds::create_round(conn, session_id, round_number, max_points.value()).await?;
        for &player_id in &player_ids {
            round_players::create(conn, round.id, player_id).await?;
        }

        info!(
            session_id,
            round_id = round.id,
            round_number,
            players = player_ids.len(),
            closed,
            "round started"
        );
        relations::round_with_players(conn, round.id).await
    }

    pub async fn round_with_players<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        relations::round_with_players(conn, round_id).await
    }

    pub async fn pass<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
        player_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        let (penalty, round) = self
            .apply(conn, round_id, |state| scoring::pass(state, player_id))
            .await?;
        info!(round_id, player_id, penalty, "player passed");
        Ok(round)
    }

    pub async fn win<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
        player_id: i32,
    ) -> Result<(WinOutcome, RoundWithPlayers), DomainError> {
        let (outcome, round) = self
            .apply(conn, round_id, |state| scoring::win(state, player_id))
            .await?;
        info!(
            round_id,
            player_id,
            penalty = outcome.penalty,
            armoede = outcome.armoede,
            round_winner = ?outcome.round_winner,
            "game won"
        );
        Ok((outcome, round))
    }

    pub async fn knock<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        let (knocks, round) = self.apply(conn, round_id, scoring::knock).await?;
        debug!(round_id, knocks, "knocked");
        Ok(round)
    }

    pub async fn knock_down<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        let (knocks, round) = self
            .apply(conn, round_id, |state| Ok(scoring::knock_down(state)))
            .await?;
        debug!(round_id, knocks, "knock taken back");
        Ok(round)
    }

    pub async fn add_point<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
        player_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        self.adjust(conn, round_id, player_id, 1).await
    }

    pub async fn remove_point<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
        player_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        self.adjust(conn, round_id, player_id, -1).await
    }

    pub async fn start_new_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        ensure_current_round(conn, round_id).await?;
        let (game, round) = self
            .apply(conn, round_id, scoring::start_new_game)
            .await?;
        info!(round_id, game, "new game started");
        Ok(round)
    }

    pub async fn toggle_short_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        let (max_points, round) = self
            .apply(conn, round_id, scoring::toggle_short_round)
            .await?;
        info!(round_id, max_points = max_points.value(), "round ceiling switched");
        Ok(round)
    }

    async fn adjust<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i32,
        player_id: i32,
        delta: i32,
    ) -> Result<RoundWithPlayers, DomainError> {
        let (points, round) = self
            .apply(conn, round_id, |state| {
                scoring::adjust_points(state, player_id, delta)
            })
            .await?;
        info!(round_id, player_id, delta, points, "points corrected");
        Ok(round)
    }

    /// Load, apply one scoring rule, persist the difference, reload.
    async fn apply<C, T, F>(
        &self,
        conn: &C,
        round_id: i32,
        rule: F,
    ) -> Result<(T, RoundWithPlayers), DomainError>
    where
        C: ConnectionTrait + Send + Sync,
        F: FnOnce(&mut RoundState) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let loaded = relations::round_with_players(conn, round_id).await?;
        let before = round_state(&loaded)?;
        let mut after = before.clone();
        let out = rule(&mut after)?;

        persist(conn, &loaded, &before, &after).await?;
        let reloaded = relations::round_with_players(conn, round_id).await?;
        Ok((out, reloaded))
    }
}

impl Default for RoundService {
    fn default() -> Self {
        Self::new()
    }
}

/// A new sub-game may only be dealt in the latest round of an open session
/// while no other round of that session is being played.
async fn ensure_current_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i32,
) -> Result<(), DomainError> {
    let round = rounds::require_round(conn, round_id).await?;
    let session = sessions::require_session(conn, round.session_id).await?;
    if !session.active {
        return Err(DomainError::validation(
            ValidationKind::SessionClosed,
            format!("Session {} is closed", session.id),
        ));
    }

    let siblings = rounds::list_for_session(conn, round.session_id).await?;
    let superseded = siblings
        .iter()
        .any(|r| r.id != round.id && (r.active || r.round_number > round.round_number));
    if superseded {
        debug!(round_id, session_id = session.id, "round superseded");
        return Err(DomainError::validation(
            ValidationKind::RoundSuperseded,
            format!("Round {round_id} is no longer the current round of its session"),
        ));
    }
    Ok(())
}

async fn persist<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    loaded: &RoundWithPlayers,
    before: &RoundState,
    after: &RoundState,
) -> Result<(), DomainError> {
    let mut update = RoundUpdate::default();
    let mut round_changed = false;
    if before.max_points != after.max_points {
        update = update.with_max_points(after.max_points.value());
        round_changed = true;
    }
    if before.active != after.active {
        update = update.with_active(after.active);
        round_changed = true;
    }
    if before.winner_id != after.winner_id {
        update = update.with_winner(after.winner_id);
        round_changed = true;
    }
    if before.current_game != after.current_game {
        update = update.with_current_game(Some(after.current_game));
        round_changed = true;
    }
    if before.knocks != after.knocks {
        update = update.with_knock_count(after.knocks);
        round_changed = true;
    }
    if round_changed {
        rounds::update_round(conn, loaded.round.id, update).await?;
    }

    for ((old, new), row) in before.seats.iter().zip(&after.seats).zip(&loaded.players) {
        if old != new {
            round_players::update_score(conn, row.round_player.id, new.points, new.eliminated)
                .await?;
        }
    }
    Ok(())
}
