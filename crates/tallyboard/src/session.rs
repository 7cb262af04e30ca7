//! Console session controller.
//!
//! Drives one [`GameState`] per game through setup, play, recording, and the
//! play-again prompt, reading lines from any [`BufRead`] and writing to any
//! [`Write`]. End of input ends the session cleanly.

use std::io::{BufRead, Write};

use anyhow::Result;
use tallyboard_tictactoe::{GameState, GameStatus, Marker, Position};
use tracing::{debug, info, instrument, warn};

use crate::{MatchOutcome, Registration, StatsStore, report};

/// The two named players of a session. Player one always plays X.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    player_one: String,
    player_two: String,
}

impl Matchup {
    /// Player one (X).
    pub fn player_one(&self) -> &str {
        &self.player_one
    }

    /// Player two (O).
    pub fn player_two(&self) -> &str {
        &self.player_two
    }

    /// Name of the player holding `marker`.
    pub fn name_for(&self, marker: Marker) -> &str {
        match marker {
            Marker::X => &self.player_one,
            Marker::O => &self.player_two,
        }
    }
}

/// Maps a terminal status onto the seats of a matchup.
pub fn match_outcome(status: GameStatus) -> Option<MatchOutcome> {
    match status {
        GameStatus::Won(marker) => Some(MatchOutcome::win(marker == Marker::X)),
        GameStatus::Draw => Some(MatchOutcome::Draw),
        GameStatus::InProgress => None,
    }
}

/// Console front end over a [`StatsStore`].
#[derive(Debug)]
pub struct Session<'a, R, W> {
    store: &'a mut StatsStore,
    input: R,
    output: W,
    history_limit: u32,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session reading from `input` and writing to `output`.
    pub fn new(store: &'a mut StatsStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            history_limit: 10,
        }
    }

    /// Sets how many games the recent-games view lists.
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Consumes the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Main menu loop. Returns when the user exits or input ends.
    #[instrument(skip(self))]
    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            let rule = "=".repeat(40);
            writeln!(self.output, "\n{rule}")?;
            writeln!(self.output, "      TIC-TAC-TOE WITH STATISTICS")?;
            writeln!(self.output, "{rule}")?;
            writeln!(self.output, "1. Play Game")?;
            writeln!(self.output, "2. View Leaderboard")?;
            writeln!(self.output, "3. View Player Stats")?;
            writeln!(self.output, "4. Recent Games")?;
            writeln!(self.output, "5. Exit")?;
            writeln!(self.output, "{}", "-".repeat(40))?;

            let Some(choice) = self.prompt("Enter your choice (1-5): ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.play(None, None)?,
                "2" => self.show_leaderboard()?,
                "3" => {
                    let Some(name) = self.prompt("Enter player name: ")? else {
                        break;
                    };
                    self.show_player_stats(&name)?;
                }
                "4" => self.show_recent_games(None)?,
                "5" => {
                    writeln!(self.output, "Thanks for playing! Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice! Please enter 1, 2, 3, 4, or 5.")?,
            }
        }

        writeln!(self.output, "\nGoodbye!")?;
        Ok(())
    }

    /// Plays games between two players until they stop.
    ///
    /// Names given up front skip the prompts when they are usable.
    #[instrument(skip(self))]
    pub fn play(&mut self, player_one: Option<String>, player_two: Option<String>) -> Result<()> {
        let Some(matchup) = self.setup_players(player_one, player_two)? else {
            return Ok(());
        };

        let mut game = GameState::new();
        loop {
            game.reset();
            writeln!(self.output, "\n=== NEW GAME ===")?;

            let Some(status) = self.play_round(&mut game, &matchup)? else {
                info!("Input ended mid-game; nothing recorded");
                return Ok(());
            };

            if !self.record(&matchup, status)? {
                return Ok(());
            }

            self.show_current_stats(&matchup)?;

            if !self.ask_play_again()? {
                return Ok(());
            }
        }
    }

    /// Prints the ranked leaderboard.
    pub fn show_leaderboard(&mut self) -> Result<()> {
        match self.store.list_players_ranked() {
            Ok(players) => write!(self.output, "{}", report::leaderboard(&players))?,
            Err(e) => writeln!(self.output, "Could not load leaderboard: {}", e.kind())?,
        }
        Ok(())
    }

    /// Prints one player's stats, or a not-found notice.
    pub fn show_player_stats(&mut self, name: &str) -> Result<()> {
        match self.store.get_player_stats(name.trim()) {
            Ok(Some(player)) => write!(self.output, "{}", report::player_stats(&player))?,
            Ok(None) => writeln!(self.output, "Player not found!")?,
            Err(e) => writeln!(self.output, "Could not load stats: {}", e.kind())?,
        }
        Ok(())
    }

    /// Prints recent games, optionally only those involving `player`.
    pub fn show_recent_games(&mut self, player: Option<&str>) -> Result<()> {
        let records = match player {
            Some(name) => self.store.games_for_player(name).map(|mut records| {
                records.truncate(self.history_limit as usize);
                records
            }),
            None => self.store.recent_games(self.history_limit),
        };
        match records {
            Ok(records) => write!(self.output, "{}", report::game_history(&records))?,
            Err(e) => writeln!(self.output, "Could not load games: {}", e.kind())?,
        }
        Ok(())
    }

    /// Reads both names and registers them. `None` if input ended or
    /// registration failed.
    fn setup_players(
        &mut self,
        player_one: Option<String>,
        player_two: Option<String>,
    ) -> Result<Option<Matchup>> {
        writeln!(self.output, "=== TIC-TAC-TOE GAME ===\n")?;

        let Some(player_one) = self.read_name("Enter Player 1 name (X): ", player_one, None)? else {
            return Ok(None);
        };
        let Some(player_two) =
            self.read_name("Enter Player 2 name (O): ", player_two, Some(player_one.as_str()))?
        else {
            return Ok(None);
        };

        for name in [&player_one, &player_two] {
            match self.store.register_player(name) {
                Ok(Registration::Created(_)) => {
                    writeln!(self.output, "Player '{name}' added successfully!")?
                }
                Ok(Registration::AlreadyExists(_)) => {
                    writeln!(self.output, "Player '{name}' already exists!")?
                }
                Err(e) => {
                    warn!(error = %e, "Registration failed");
                    writeln!(self.output, "Could not register '{name}': {}", e.kind())?;
                    return Ok(None);
                }
            }
        }

        writeln!(self.output, "\n{player_one} (X) vs {player_two} (O)")?;
        Ok(Some(Matchup {
            player_one,
            player_two,
        }))
    }

    fn read_name(
        &mut self,
        label: &str,
        preset: Option<String>,
        taken: Option<&str>,
    ) -> Result<Option<String>> {
        let mut candidate = preset.map(|name| name.trim().to_string());
        loop {
            let name = match candidate.take() {
                Some(name) => name,
                None => match self.prompt(label)? {
                    Some(name) => name,
                    None => return Ok(None),
                },
            };

            if name.is_empty() {
                writeln!(self.output, "Name cannot be empty.")?;
            } else if taken == Some(name.as_str()) {
                writeln!(self.output, "Players need different names.")?;
            } else {
                return Ok(Some(name));
            }
        }
    }

    /// Plays moves until the game ends. `None` if input ended first.
    fn play_round(&mut self, game: &mut GameState, matchup: &Matchup) -> Result<Option<GameStatus>> {
        loop {
            self.render_board(game)?;

            let marker = game.active_player();
            let label = format!("{} ({marker}), enter position (1-9): ", matchup.name_for(marker));
            let Some(line) = self.prompt(&label)? else {
                return Ok(None);
            };

            let Ok(number) = line.parse::<usize>() else {
                writeln!(self.output, "Please enter a number between 1 and 9.")?;
                continue;
            };

            let applied = Position::from_keypad(number)
                .is_some_and(|position| game.apply_move(position.to_index()).applied);
            if !applied {
                writeln!(self.output, "Invalid move! Try again.")?;
                continue;
            }

            let status = game.check_outcome();
            if status.is_terminal() {
                self.render_board(game)?;
                return Ok(Some(status));
            }
            game.switch_active_player();
        }
    }

    /// Announces and records a finished game. Returns false if recording failed.
    fn record(&mut self, matchup: &Matchup, status: GameStatus) -> Result<bool> {
        let Some(outcome) = match_outcome(status) else {
            return Ok(true);
        };

        match status.winner() {
            Some(marker) => writeln!(self.output, "{} ({marker}) wins!", matchup.name_for(marker))?,
            None => writeln!(self.output, "It's a draw!")?,
        }

        match self
            .store
            .record_outcome(matchup.player_one(), matchup.player_two(), outcome)
        {
            Ok(record) => {
                debug!(game_id = record.id(), "Outcome stored");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Outcome not recorded");
                writeln!(
                    self.output,
                    "Could not save this game's result: {}. Stats were left unchanged.",
                    e.kind()
                )?;
                Ok(false)
            }
        }
    }

    fn show_current_stats(&mut self, matchup: &Matchup) -> Result<()> {
        writeln!(self.output, "\n=== CURRENT STATS ===")?;
        for name in [matchup.player_one(), matchup.player_two()] {
            match self.store.get_player_stats(name) {
                Ok(Some(player)) => writeln!(self.output, "{}", report::stats_line(&player))?,
                Ok(None) => {}
                Err(e) => writeln!(self.output, "Could not load stats for '{name}': {}", e.kind())?,
            }
        }
        Ok(())
    }

    fn ask_play_again(&mut self) -> Result<bool> {
        loop {
            let Some(choice) = self.prompt("\nPlay again? (y/n): ")? else {
                return Ok(false);
            };
            match choice.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter 'y' for yes or 'n' for no.")?,
            }
        }
    }

    fn render_board(&mut self, game: &GameState) -> Result<()> {
        writeln!(self.output, "\n{}\n", game.board())?;
        Ok(())
    }

    /// Writes `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
