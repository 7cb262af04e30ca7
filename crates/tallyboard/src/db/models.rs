//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::db::schema;

/// Player record with lifetime counters.
///
/// `matches_played` always equals `wins + losses + draws`; the store only
/// ever bumps `matches_played` together with exactly one of the other three.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Player {
    id: i32,
    name: String,
    matches_played: i32,
    wins: i32,
    losses: i32,
    draws: i32,
    created_at: NaiveDateTime,
}

impl Player {
    /// Calculates win rate as a percentage (0.0–100.0).
    ///
    /// A player with no matches has a win rate of 0.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            (self.wins as f64 / self.matches_played as f64) * 100.0
        }
    }
}

/// Insertable player model; counters take their column defaults.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    name: String,
}

/// One completed game. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    player1_name: String,
    player2_name: String,
    /// Winner's name; `None` for a draw.
    winner: Option<String>,
    game_date: NaiveDateTime,
}

impl GameRecord {
    /// True when the game ended without a winner.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Insertable game record.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    player1_name: String,
    player2_name: String,
    winner: Option<String>,
}

/// Game result from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameOutcome {
    /// Player won the game.
    Win,
    /// Player lost the game.
    Loss,
    /// Game ended in a draw.
    Draw,
}

/// Result of a finished game between player one and player two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchOutcome {
    /// Player one won.
    PlayerOneWins,
    /// Player two won.
    PlayerTwoWins,
    /// Nobody won.
    Draw,
}

impl MatchOutcome {
    /// Builds an outcome from the winner flag used by console callers.
    pub fn win(player_one_is_winner: bool) -> Self {
        if player_one_is_winner {
            Self::PlayerOneWins
        } else {
            Self::PlayerTwoWins
        }
    }

    /// Per-player results as `(player one, player two)`.
    #[instrument]
    pub fn results(self) -> (GameOutcome, GameOutcome) {
        match self {
            Self::PlayerOneWins => (GameOutcome::Win, GameOutcome::Loss),
            Self::PlayerTwoWins => (GameOutcome::Loss, GameOutcome::Win),
            Self::Draw => (GameOutcome::Draw, GameOutcome::Draw),
        }
    }

    /// Name stored in the `winner` column.
    pub fn winner_name<'a>(self, player_one: &'a str, player_two: &'a str) -> Option<&'a str> {
        match self {
            Self::PlayerOneWins => Some(player_one),
            Self::PlayerTwoWins => Some(player_two),
            Self::Draw => None,
        }
    }
}

/// Result of [`StatsStore::register_player`](crate::StatsStore::register_player).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new zeroed record was created.
    Created(Player),
    /// The name was taken; the stored record is returned untouched.
    AlreadyExists(Player),
}

impl Registration {
    /// The stored player, new or existing.
    pub fn player(&self) -> &Player {
        match self {
            Self::Created(player) | Self::AlreadyExists(player) => player,
        }
    }

    /// True when this call created the record.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
