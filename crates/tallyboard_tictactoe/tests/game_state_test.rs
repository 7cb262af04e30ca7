//! Tests for the game state machine.

use tallyboard_tictactoe::{Board, BoardParseError, GameState, GameStatus, Marker, Position, Square};

fn game_from(layout: &str, active: Marker) -> GameState {
    let board: Board = layout.parse().expect("valid layout");
    GameState::from_board(board, active)
}

#[test]
fn test_new_game_is_empty_with_x_to_move() {
    let game = GameState::new();
    assert_eq!(game.active_player(), Marker::X);
    assert!(game.board().squares().iter().all(|s| *s == Square::Empty));
    assert_eq!(game.check_outcome(), GameStatus::InProgress);
    assert_eq!(game.valid_moves().len(), 9);
}

#[test]
fn test_center_becomes_invalid_after_move() {
    let mut game = GameState::new();
    assert!(game.is_valid_move(4));

    let result = game.apply_move(4);
    assert!(result.applied);
    assert!(!game.is_valid_move(4));
    assert_eq!(game.board().get(Position::Center), Square::Occupied(Marker::X));
}

#[test]
fn test_out_of_range_move_rejected() {
    let mut game = GameState::new();
    assert!(!game.is_valid_move(9));
    assert!(!game.apply_move(9).applied);
    assert!(!game.apply_move(usize::MAX).applied);
    assert_eq!(game, GameState::new());
}

#[test]
fn test_occupied_move_leaves_state_unchanged() {
    let mut game = GameState::new();
    assert!(game.apply_move(0).applied);
    game.switch_active_player();
    let before = game.clone();

    assert!(!game.apply_move(0).applied);
    assert_eq!(game, before);
    assert_eq!(game.board().get(Position::TopLeft), Square::Occupied(Marker::X));
}

#[test]
fn test_apply_move_does_not_switch_player() {
    let mut game = GameState::new();
    assert!(game.apply_move(0).applied);
    assert_eq!(game.active_player(), Marker::X);

    game.switch_active_player();
    assert_eq!(game.active_player(), Marker::O);
    game.switch_active_player();
    assert_eq!(game.active_player(), Marker::X);
}

#[test]
fn test_top_row_win() {
    let game = game_from("XXX......", Marker::X);
    assert_eq!(game.check_outcome(), GameStatus::Won(Marker::X));
    assert!(game.check_outcome().is_terminal());
}

#[test]
fn test_full_board_without_line_is_draw() {
    let game = game_from("XOXOXOOXO", Marker::X);
    assert_eq!(game.check_outcome(), GameStatus::Draw);
    assert_eq!(game.winning_line(), None);
}

#[test]
fn test_last_move_filling_board_with_win_reports_win() {
    // X to play bottom-right, completing the main diagonal on the last empty square.
    let mut game = game_from("XOO OXX XO.", Marker::X);
    assert!(game.apply_move(8).applied);
    assert!(game.board().is_full());
    assert_eq!(game.check_outcome(), GameStatus::Won(Marker::X));
}

#[test]
fn test_played_out_game_to_o_win() {
    let mut game = GameState::new();
    let mut status = GameStatus::InProgress;
    // X: 0, 1, 8  O: 2, 4, 6
    for index in [0, 2, 1, 4, 8, 6] {
        assert!(game.apply_move(index).applied, "move {index} rejected");
        status = game.check_outcome();
        if status.is_terminal() {
            break;
        }
        game.switch_active_player();
    }
    assert_eq!(status, GameStatus::Won(Marker::O));
    assert_eq!(game.active_player(), Marker::O);
    assert_eq!(game.history().len(), 6);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut game = GameState::new();
    assert!(game.apply_move(4).applied);
    game.switch_active_player();
    assert!(game.apply_move(0).applied);

    game.reset();
    assert_eq!(game, GameState::new());
    assert_eq!(game.active_player(), GameState::FIRST_MOVER);
    assert!(game.history().is_empty());
}

#[test]
fn test_board_display_shows_keypad_numbers() {
    let board: Board = "X........".parse().unwrap();
    let rendered = board.to_string();
    assert!(rendered.starts_with(" X | 2 | 3 "));
    assert!(rendered.ends_with(" 7 | 8 | 9 "));
}

#[test]
fn test_board_parse_errors() {
    assert_eq!("XX".parse::<Board>(), Err(BoardParseError::WrongLength(2)));
    assert_eq!(
        "XXXZ.....".parse::<Board>(),
        Err(BoardParseError::UnexpectedChar('Z'))
    );
}

#[test]
fn test_game_state_serializes() {
    let mut game = GameState::new();
    assert!(game.apply_move(4).applied);
    let json = serde_json::to_string(&game).expect("serialize");
    let back: GameState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, game);
}
