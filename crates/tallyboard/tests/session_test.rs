//! Tests for the console session controller, driven by scripted input.

use std::io::{self, BufRead, Cursor, Read};

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tempfile::NamedTempFile;

use tallyboard::{GameStatus, Marker, MatchOutcome, Session, StatsStore, match_outcome};

/// Runs one `play` session over `script` and returns everything printed.
fn play_script(store: &mut StatsStore, p1: Option<&str>, p2: Option<&str>, script: &str) -> String {
    let mut session = Session::new(store, Cursor::new(script.to_string()), Vec::new());
    session
        .play(p1.map(str::to_string), p2.map(str::to_string))
        .expect("Session failed");
    String::from_utf8(session.into_output()).expect("UTF-8 output")
}

fn counters(store: &mut StatsStore, name: &str) -> (i32, i32, i32, i32) {
    let p = store
        .get_player_stats(name)
        .expect("Query failed")
        .expect("Player missing");
    (*p.matches_played(), *p.wins(), *p.losses(), *p.draws())
}

#[test]
fn test_win_then_draw_session() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    // Game 1: X takes the top row, with bad input along the way.
    // Game 2: a full board with no line.
    let script = "1\nabc\n1\n4\n0\n10\n2\n5\n3\ny\n1\n2\n3\n5\n4\n6\n8\n7\n9\nn\n";

    let output = play_script(&mut store, Some("Alice"), Some("Bob"), script);

    assert!(output.contains("Player 'Alice' added successfully!"));
    assert!(output.contains("Please enter a number between 1 and 9."));
    assert!(output.contains("Invalid move! Try again."));
    assert!(output.contains("Alice (X) wins!"));
    assert!(output.contains("It's a draw!"));
    assert!(output.contains("Alice: 1W-0L-1D (Win Rate: 50.0%)"));
    assert!(output.contains("Bob: 0W-1L-1D (Win Rate: 0.0%)"));
    assert_eq!(output.matches("=== NEW GAME ===").count(), 2);

    assert_eq!(counters(&mut store, "Alice"), (2, 1, 0, 1));
    assert_eq!(counters(&mut store, "Bob"), (2, 0, 1, 1));

    let games = store.recent_games(10).expect("Query failed");
    assert_eq!(games.len(), 2);
    assert!(games[0].is_draw());
    assert_eq!(games[1].winner().as_deref(), Some("Alice"));
}

/// Scripted input that removes a player through a second connection once
/// reading reaches `trigger_at`, so the next write hits a missing row.
#[derive(Debug)]
struct DropPlayerAt {
    inner: Cursor<String>,
    trigger_at: u64,
    db_path: String,
    player: String,
    fired: bool,
}

impl DropPlayerAt {
    fn new(script: &str, before_line: &str, db_path: &str, player: &str) -> Self {
        let trigger_at = script.find(before_line).expect("Trigger line not in script") as u64;
        Self {
            inner: Cursor::new(script.to_string()),
            trigger_at,
            db_path: db_path.to_string(),
            player: player.to_string(),
            fired: false,
        }
    }
}

impl Read for DropPlayerAt {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for DropPlayerAt {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !self.fired && self.inner.position() >= self.trigger_at {
            self.fired = true;
            let mut conn = SqliteConnection::establish(&self.db_path).expect("Second connection failed");
            diesel::sql_query("DELETE FROM players WHERE name = ?")
                .bind::<diesel::sql_types::Text, _>(&self.player)
                .execute(&mut conn)
                .expect("Delete failed");
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

#[test]
fn test_failed_recording_ends_session_without_partial_update() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let mut store = StatsStore::open(&db_path).expect("Open failed");

    // X takes the top row; Bob disappears just before the winning move.
    let script = "1\n4\n2\n5\n3\ny\n";
    let input = DropPlayerAt::new(script, "3\n", &db_path, "Bob");

    let mut session = Session::new(&mut store, input, Vec::new());
    session
        .play(Some("Alice".to_string()), Some("Bob".to_string()))
        .expect("Session failed");
    let output = String::from_utf8(session.into_output()).expect("UTF-8 output");

    assert!(output.contains("Alice (X) wins!"));
    assert!(output.contains("Could not save this game's result"));
    assert!(!output.contains("Play again?"));
    assert!(!output.contains("=== CURRENT STATS ==="));

    assert_eq!(counters(&mut store, "Alice"), (0, 0, 0, 0));
    assert!(store.get_player_stats("Bob").expect("Query failed").is_none());
    assert!(store.recent_games(10).expect("Query failed").is_empty());
}

#[test]
fn test_player_two_win_recorded_for_o() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    // X: 1, 2, 9  O: 3, 5, 7
    let output = play_script(&mut store, Some("Ann"), Some("Ola"), "1\n3\n2\n5\n9\n7\nno\n");

    assert!(output.contains("Ola (O) wins!"));
    assert_eq!(counters(&mut store, "Ann"), (1, 0, 1, 0));
    assert_eq!(counters(&mut store, "Ola"), (1, 1, 0, 0));
}

#[test]
fn test_input_ending_mid_game_records_nothing() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    play_script(&mut store, Some("Alice"), Some("Bob"), "1\n4\n");

    assert_eq!(counters(&mut store, "Alice"), (0, 0, 0, 0));
    assert!(store.recent_games(10).expect("Query failed").is_empty());
}

#[test]
fn test_setup_reprompts_for_bad_names() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    let output = play_script(&mut store, None, None, "\nAlice\n  Alice \nBob\n");

    assert!(output.contains("Name cannot be empty."));
    assert!(output.contains("Players need different names."));
    assert!(output.contains("Alice (X) vs Bob (O)"));
    assert!(store.get_player_stats("Bob").expect("Query failed").is_some());
}

#[test]
fn test_returning_players_are_not_reset() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    play_script(&mut store, Some("Alice"), Some("Bob"), "1\n4\n2\n5\n3\nn\n");

    let output = play_script(&mut store, Some("Alice"), Some("Bob"), "");
    assert!(output.contains("Player 'Alice' already exists!"));
    assert_eq!(counters(&mut store, "Alice"), (1, 1, 0, 0));
}

#[test]
fn test_play_again_prompt_repeats_on_unknown_answer() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    let output = play_script(&mut store, Some("Alice"), Some("Bob"), "1\n4\n2\n5\n3\nmaybe\nN\n");

    assert!(output.contains("Please enter 'y' for yes or 'n' for no."));
    assert_eq!(output.matches("=== NEW GAME ===").count(), 1);
}

#[test]
fn test_menu_views() {
    let mut store = StatsStore::in_memory().expect("Open failed");
    store.register_player("Alice").expect("Register failed");
    store.register_player("Bob").expect("Register failed");
    store
        .record_outcome("Alice", "Bob", MatchOutcome::PlayerOneWins)
        .expect("Record failed");

    let script = "2\n3\nAlice\n3\nNobody\n4\n7\n5\n";
    let mut session = Session::new(&mut store, Cursor::new(script), Vec::new());
    session.run_menu().expect("Menu failed");
    let output = String::from_utf8(session.into_output()).expect("UTF-8 output");

    assert!(output.contains("LEADERBOARD"));
    let rows: Vec<Vec<&str>> = output
        .lines()
        .filter(|line| line.starts_with("Alice ") || line.starts_with("Bob "))
        .map(|line| line.split_whitespace().collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["Alice", "1", "1", "0", "0", "100.0%"],
            vec!["Bob", "1", "0", "1", "0", "0.0%"],
        ]
    );
    assert!(output.contains("=== STATS FOR Alice ==="));
    assert!(output.contains("Win Rate: 100.0%"));
    assert!(output.contains("Player not found!"));
    assert!(output.contains("Alice (X) vs Bob (O): Alice won"));
    assert!(output.contains("Invalid choice!"));
    assert!(output.contains("Thanks for playing! Goodbye!"));
}

#[test]
fn test_match_outcome_maps_x_to_player_one() {
    assert_eq!(match_outcome(GameStatus::Won(Marker::X)), Some(MatchOutcome::PlayerOneWins));
    assert_eq!(match_outcome(GameStatus::Won(Marker::O)), Some(MatchOutcome::PlayerTwoWins));
    assert_eq!(match_outcome(GameStatus::Draw), Some(MatchOutcome::Draw));
    assert_eq!(match_outcome(GameStatus::InProgress), None);
}
