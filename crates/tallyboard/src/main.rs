//! Tallyboard - console entry point.

#![warn(missing_docs)]

mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde_json::json;
use tallyboard::{AppConfig, Player, Session, StatsStore, report};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::resolve(cli.config.as_deref(), cli.db_path.clone())?;
    info!(db_path = %config.db_path().display(), "Starting tallyboard");

    let mut store = StatsStore::open(config.db_path_str())
        .with_context(|| format!("Failed to open stats database '{}'", config.db_path().display()))?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => console(&mut store, &config).run_menu(),
        Command::Play { player1, player2 } => console(&mut store, &config).play(player1, player2),
        Command::Leaderboard { json } => print_leaderboard(&mut store, json),
        Command::Stats { name, json } => print_stats(&mut store, &name, json),
        Command::History {
            player,
            limit,
            json,
        } => print_history(&mut store, player.as_deref(), limit.unwrap_or(*config.history_limit()), json),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn console<'a>(
    store: &'a mut StatsStore,
    config: &AppConfig,
) -> Session<'a, io::StdinLock<'static>, io::Stdout> {
    Session::new(store, io::stdin().lock(), io::stdout()).with_history_limit(*config.history_limit())
}

fn player_json(player: &Player) -> serde_json::Value {
    json!({
        "name": player.name(),
        "matches_played": player.matches_played(),
        "wins": player.wins(),
        "losses": player.losses(),
        "draws": player.draws(),
        "win_rate": player.win_rate(),
        "created_at": player.created_at(),
    })
}

#[instrument(skip(store))]
fn print_leaderboard(store: &mut StatsStore, as_json: bool) -> Result<()> {
    let players = store.list_players_ranked()?;
    let mut out = io::stdout().lock();
    if as_json {
        let rows: Vec<_> = players.iter().map(player_json).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(out, "{}", report::leaderboard(&players))?;
    }
    Ok(())
}

#[instrument(skip(store))]
fn print_stats(store: &mut StatsStore, name: &str, as_json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    match store.get_player_stats(name)? {
        Some(player) if as_json => writeln!(out, "{}", serde_json::to_string_pretty(&player_json(&player))?)?,
        Some(player) => write!(out, "{}", report::player_stats(&player))?,
        None if as_json => writeln!(out, "null")?,
        None => writeln!(out, "Player not found!")?,
    }
    Ok(())
}

#[instrument(skip(store))]
fn print_history(store: &mut StatsStore, player: Option<&str>, limit: u32, as_json: bool) -> Result<()> {
    let records = match player {
        Some(name) => {
            let mut records = store.games_for_player(name)?;
            records.truncate(limit as usize);
            records
        }
        None => store.recent_games(limit)?,
    };

    let mut out = io::stdout().lock();
    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    } else {
        write!(out, "{}", report::game_history(&records))?;
    }
    Ok(())
}
