//! Plain-text rendering of stats for the console.

use crate::{GameRecord, Player};

const RULE_WIDTH: usize = 60;

/// Leaderboard table, one row per player in the given order.
pub fn leaderboard(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players found!\n".to_string();
    }

    let heavy = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{heavy}\n{:^width$}\n{heavy}\n", "LEADERBOARD", width = RULE_WIDTH);
    out.push_str(&format!(
        "{:<15} {:<8} {:<6} {:<7} {:<6} {:<8}\n",
        "Name", "Matches", "Wins", "Losses", "Draws", "Win Rate"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for player in players {
        out.push_str(&format!(
            "{:<15} {:<8} {:<6} {:<7} {:<6} {:.1}%\n",
            player.name(),
            player.matches_played(),
            player.wins(),
            player.losses(),
            player.draws(),
            player.win_rate()
        ));
    }
    out.push_str(&heavy);
    out.push('\n');
    out
}

/// Full stats block for a single player.
pub fn player_stats(player: &Player) -> String {
    format!(
        "\n=== STATS FOR {} ===\n\
         Matches Played: {}\n\
         Wins: {}\n\
         Losses: {}\n\
         Draws: {}\n\
         Win Rate: {:.1}%\n",
        player.name(),
        player.matches_played(),
        player.wins(),
        player.losses(),
        player.draws(),
        player.win_rate()
    )
}

/// One-line `W-L-D` summary.
pub fn stats_line(player: &Player) -> String {
    format!(
        "{}: {}W-{}L-{}D (Win Rate: {:.1}%)",
        player.name(),
        player.wins(),
        player.losses(),
        player.draws(),
        player.win_rate()
    )
}

/// Game history, one line per record.
pub fn game_history(records: &[GameRecord]) -> String {
    if records.is_empty() {
        return "No games recorded yet.\n".to_string();
    }

    records
        .iter()
        .map(|record| {
            let result = match record.winner() {
                Some(winner) => format!("{winner} won"),
                None => "Draw".to_string(),
            };
            format!(
                "{}  {} (X) vs {} (O): {}\n",
                record.game_date().format("%Y-%m-%d %H:%M"),
                record.player1_name(),
                record.player2_name(),
                result
            )
        })
        .collect()
}
