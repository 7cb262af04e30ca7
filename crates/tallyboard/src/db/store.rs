//! SQLite-backed statistics store for players and game history.

use std::fmt;

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    GameOutcome, GameRecord, MatchOutcome, NewGameRecord, NewPlayer, Player, Registration, StatsError,
    StatsErrorKind, schema,
};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Owner and sole writer of the `players` and `games` tables.
///
/// Holds one connection for the life of the process. Each public operation
/// runs in its own transaction, which commits when the operation returns `Ok`
/// and rolls back on any error.
pub struct StatsStore {
    conn: SqliteConnection,
    db_path: String,
}

impl fmt::Debug for StatsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl StatsStore {
    /// Opens (creating if needed) the database at `db_path` and applies any
    /// pending migrations.
    ///
    /// Use `":memory:"` for a throwaway database.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file cannot be opened or the schema
    /// cannot be applied.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StatsError> {
        let db_path = db_path.as_ref().to_string();
        info!(path = %db_path, "Opening stats store");

        let mut conn = SqliteConnection::establish(&db_path)
            .map_err(|e| StatsError::new(StatsErrorKind::Database(format!("Failed to connect to '{}': {}", db_path, e))))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StatsError::new(StatsErrorKind::Migration(e.to_string())))?;
        debug!(applied = applied.len(), "Migrations up to date");

        Ok(Self { conn, db_path })
    }

    /// Opens a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the schema cannot be applied.
    pub fn in_memory() -> Result<Self, StatsError> {
        Self::open(":memory:")
    }

    /// Path this store was opened with.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Registers `name` with zeroed counters.
    ///
    /// An existing name is left untouched and reported as
    /// [`Registration::AlreadyExists`]. Names are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the name is blank or a database error occurs.
    #[instrument(skip(self))]
    pub fn register_player(&mut self, name: &str) -> Result<Registration, StatsError> {
        validate_name(name)?;

        self.conn.immediate_transaction::<_, StatsError, _>(|conn| {
            if let Some(existing) = find_player(conn, name)? {
                info!(player = %name, "Player already exists");
                return Ok(Registration::AlreadyExists(existing));
            }

            let player = diesel::insert_into(schema::players::table)
                .values(&NewPlayer::new(name.to_string()))
                .returning(Player::as_returning())
                .get_result(conn)?;

            info!(player_id = player.id(), player = %player.name(), "Player registered");
            Ok(Registration::Created(player))
        })
    }

    /// Records a finished game between `player1` and `player2`.
    ///
    /// Both players' counters and the new [`GameRecord`] are written in one
    /// transaction: if any write fails, none is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if either player is unknown, both names are the
    /// same, or a database error occurs.
    #[instrument(skip(self))]
    pub fn record_outcome(
        &mut self,
        player1: &str,
        player2: &str,
        outcome: MatchOutcome,
    ) -> Result<GameRecord, StatsError> {
        if player1 == player2 {
            return Err(StatsError::new(StatsErrorKind::SamePlayer(player1.to_string())));
        }

        let (result1, result2) = outcome.results();
        let winner = outcome.winner_name(player1, player2).map(str::to_string);

        let record = self.conn.immediate_transaction::<_, StatsError, _>(|conn| {
            apply_result(conn, player1, result1)?;
            apply_result(conn, player2, result2)?;

            let record = diesel::insert_into(schema::games::table)
                .values(&NewGameRecord::new(player1.to_string(), player2.to_string(), winner))
                .returning(GameRecord::as_returning())
                .get_result(conn)?;
            Ok(record)
        });

        match &record {
            Ok(r) => info!(game_id = r.id(), winner = ?r.winner(), "Game outcome recorded"),
            Err(e) => warn!(error = %e, "Game outcome rolled back"),
        }
        record
    }

    /// Looks up a player's counters. Returns `None` if the name is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player_stats(&mut self, name: &str) -> Result<Option<Player>, StatsError> {
        let player = find_player(&mut self.conn, name)?;
        debug!(found = player.is_some(), "Player lookup");
        Ok(player)
    }

    /// All players, most wins first.
    ///
    /// Ties fall back to more matches played, then to registration order.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_players_ranked(&mut self) -> Result<Vec<Player>, StatsError> {
        use schema::players::dsl::*;

        let ranked = players
            .order((wins.desc(), matches_played.desc(), id.asc()))
            .select(Player::as_select())
            .load(&mut self.conn)?;

        info!(count = ranked.len(), "Players loaded");
        Ok(ranked)
    }

    /// The most recent `limit` games, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_games(&mut self, limit: u32) -> Result<Vec<GameRecord>, StatsError> {
        use schema::games::dsl::*;

        let records = games
            .order(id.desc())
            .limit(i64::from(limit))
            .select(GameRecord::as_select())
            .load(&mut self.conn)?;

        debug!(count = records.len(), "Recent games loaded");
        Ok(records)
    }

    /// Every game `name` played in either seat, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn games_for_player(&mut self, name: &str) -> Result<Vec<GameRecord>, StatsError> {
        use schema::games::dsl::*;

        let records = games
            .filter(player1_name.eq(name).or(player2_name.eq(name)))
            .order(id.desc())
            .select(GameRecord::as_select())
            .load(&mut self.conn)?;

        debug!(count = records.len(), "Player games loaded");
        Ok(records)
    }
}

fn validate_name(name: &str) -> Result<(), StatsError> {
    if name.trim().is_empty() {
        return Err(StatsError::new(StatsErrorKind::InvalidName(name.to_string())));
    }
    Ok(())
}

fn find_player(conn: &mut SqliteConnection, name: &str) -> Result<Option<Player>, StatsError> {
    let player = schema::players::table
        .filter(schema::players::name.eq(name))
        .select(Player::as_select())
        .first(conn)
        .optional()?;
    Ok(player)
}

/// Bumps `matches_played` and the counter matching `result`.
fn apply_result(conn: &mut SqliteConnection, name: &str, result: GameOutcome) -> Result<(), StatsError> {
    use schema::players::dsl;

    let target = dsl::players.filter(dsl::name.eq(name));
    let played = dsl::matches_played.eq(dsl::matches_played + 1);

    let updated = match result {
        GameOutcome::Win => diesel::update(target)
            .set((played, dsl::wins.eq(dsl::wins + 1)))
            .execute(conn)?,
        GameOutcome::Loss => diesel::update(target)
            .set((played, dsl::losses.eq(dsl::losses + 1)))
            .execute(conn)?,
        GameOutcome::Draw => diesel::update(target)
            .set((played, dsl::draws.eq(dsl::draws + 1)))
            .execute(conn)?,
    };

    if updated == 0 {
        return Err(StatsError::new(StatsErrorKind::UnknownPlayer(name.to_string())));
    }
    debug!(player = %name, result = %result, "Counters updated");
    Ok(())
}
