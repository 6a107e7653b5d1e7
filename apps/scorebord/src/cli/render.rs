//! Plain-text rendering of screen snapshots.

use crate::domain::scoring::WinOutcome;
use crate::domain::state::{PlayerStatus, RoundPhase};
use crate::repos::rounds::Round;
use crate::repos::sessions::Session;
use crate::services::database::ClearReport;
use crate::util::datetime::{format_date, format_time, format_time_with_seconds};
use crate::views::{
    DatabaseOverviewUiState, HomeUiState, PlayersUiState, RoundUiState, SessionUiState,
    SettingsUiState,
};

fn session_line(session: &Session) -> String {
    let marker = if session.active { " (actief)" } else { "" };
    format!(
        "#{:<4} {} {}{}",
        session.id,
        format_date(session.date),
        format_time(session.date),
        marker
    )
}

fn round_line(round: &Round) -> String {
    let state = if round.winner_id.is_some() {
        "klaar"
    } else if round.active {
        "spel bezig"
    } else {
        "tussen spellen"
    };
    format!(
        "  ronde {} (#{}) tot {} punten, {}",
        round.round_number, round.id, round.max_points, state
    )
}

pub fn home(state: &HomeUiState) -> String {
    if state.sessions.is_empty() {
        return "Nog geen avonden. Start er een met `toepen sessions new`.".to_string();
    }
    state
        .sessions
        .iter()
        .map(session_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn players(state: &PlayersUiState) -> String {
    if state.players.is_empty() {
        return "Nog geen spelers.".to_string();
    }
    state
        .players
        .iter()
        .map(|row| {
            let mut flags = Vec::new();
            if !row.player.active {
                flags.push("inactief");
            }
            if row.can_delete {
                flags.push("verwijderbaar");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            format!("#{:<4} {}{}", row.player.id, row.player.name, flags)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn session(state: &SessionUiState) -> String {
    let Some(session) = &state.session else {
        return String::new();
    };

    let mut lines = vec![session_line(session), "Spelers:".to_string()];
    if state.players.is_empty() {
        lines.push("  (geen)".to_string());
    }
    for p in &state.players {
        let sitting_out = if p.session_player.active { "" } else { " (zit uit)" };
        lines.push(format!("  #{:<4} {}{}", p.player.id, p.player.name, sitting_out));
    }

    lines.push("Rondes:".to_string());
    if state.rounds.is_empty() {
        lines.push("  (geen)".to_string());
    }
    lines.extend(state.rounds.iter().map(round_line));

    if state.can_start_round {
        lines.push("Er kan een nieuwe ronde gestart worden.".to_string());
    }
    lines.join("\n")
}

fn phase_line(state: &RoundUiState) -> String {
    match state.phase {
        RoundPhase::Playing => format!("Spel {} bezig", state.current_game),
        RoundPhase::BetweenGames => format!("Spel {} voorbij", state.current_game),
        RoundPhase::Finished => match &state.winner_name {
            Some(name) => format!("Ronde gewonnen door {name}"),
            None => "Ronde afgelopen".to_string(),
        },
    }
}

pub fn round(state: &RoundUiState) -> String {
    let Some(loaded) = &state.round else {
        return String::new();
    };

    let short = if state.is_short_round { " (kort)" } else { "" };
    let mut lines = vec![
        format!(
            "Ronde {} tot {} punten{}",
            loaded.round.round_number,
            state.max_points.value(),
            short
        ),
        phase_line(state),
        format!("Geklopt: {}", state.knocks),
    ];

    for row in &state.rows {
        let badge = match row.status {
            PlayerStatus::Playing => String::new(),
            status => format!("  {}", status.label()),
        };
        lines.push(format!(
            "  #{:<4} {:<16} {:>3}{}",
            row.player_id, row.name, row.points, badge
        ));
    }

    let mut actions = Vec::new();
    if state.can_knock {
        actions.push("knock");
    }
    if state.can_knock_down {
        actions.push("knock-down");
    }
    if state.can_start_new_game {
        actions.push("new-game");
    }
    if state.can_enable_short_round {
        actions.push("short");
    }
    if !actions.is_empty() {
        lines.push(format!("Mogelijk: {}", actions.join(", ")));
    }
    lines.join("\n")
}

pub fn win(outcome: &WinOutcome) -> String {
    let mut line = format!("Strafpunten voor de anderen: {}", outcome.penalty);
    if outcome.armoede {
        line.push_str(" (armoede)");
    }
    line
}

pub fn settings(state: &SettingsUiState) -> String {
    format!(
        "Database: {}\nAvonden: {}",
        state.database,
        state.sessions.len()
    )
}

pub fn clear_report(report: &ClearReport) -> String {
    format!(
        "Verwijderd: {} avonden, {} rondes, {} scores, {} deelnames, {} spelers",
        report.sessions,
        report.rounds,
        report.round_players,
        report.session_players,
        report.players
    )
}

pub fn overview(state: &DatabaseOverviewUiState) -> String {
    let overview = &state.overview;
    let mut lines = vec!["Avonden met rondes:".to_string()];
    for entry in &overview.sessions_with_rounds {
        lines.push(session_line(&entry.session));
        lines.extend(entry.rounds.iter().map(round_line));
    }

    lines.push("Avonden met spelers:".to_string());
    for entry in &overview.sessions_with_players {
        let names: Vec<&str> = entry
            .players
            .iter()
            .map(|p| p.player.name.as_str())
            .collect();
        lines.push(format!(
            "#{:<4} {} ({})",
            entry.session.id,
            format_time_with_seconds(entry.session.date),
            names.join(", ")
        ));
    }

    lines.push("Rondes met spelers:".to_string());
    for entry in &overview.rounds_with_players {
        let scores: Vec<String> = entry
            .players
            .iter()
            .map(|p| format!("{} {}", p.player.name, p.round_player.points))
            .collect();
        lines.push(format!(
            "#{:<4} avond #{} ronde {}: {}",
            entry.round.id,
            entry.round.session_id,
            entry.round.round_number,
            scores.join(", ")
        ));
    }
    lines.join("\n")
}
