use arcade_snake::grid::{Cell, GridSize};
use arcade_snake::input::{Direction, Intent};
use arcade_snake::level::{LevelProfile, LevelTable, ShrinkConfig};
use arcade_snake::mode::{GameMode, GameModeController};
use arcade_snake::round::{DeathCause, RoundState};
use arcade_snake::snake::Snake;

#[test]
fn stepwise_apple_collection_and_wall_collision() {
    let mut round =
        RoundState::new_with_seed(1, LevelProfile::default(), 42).expect("level 1 is valid");
    round.set_apple(Cell::new(6, 9));

    round.advance(0.15, None);
    assert!(!round.is_terminal());
    assert_eq!(round.snake().head(), Cell::new(6, 9));
    assert_eq!(round.score(), 1);
    assert_eq!(round.eaten(), 1);
    assert_eq!(round.snake().pending_growth(), 1);
    assert!(!round.snake().occupies(round.apple()));
    assert!(round.bounds().contains(round.apple()));

    round.set_apple(Cell::new(0, 0));
    round.advance(0.15, Some(Direction::Up));
    assert_eq!(round.snake().len(), 4);
    assert_eq!(round.snake().head(), Cell::new(6, 8));

    for _ in 0..8 {
        round.advance(0.15, None);
        assert!(!round.is_terminal());
    }
    assert_eq!(round.snake().head(), Cell::new(6, 0));

    round.advance(0.15, None);
    assert!(round.is_terminal());
    assert_eq!(round.death_cause(), Some(DeathCause::Wall));
    assert_eq!(round.score(), 1);
}

#[test]
fn visible_bomb_ends_the_round_without_scoring() {
    let level_two = LevelTable::builtin().get(1).cloned().expect("level 2");
    let mut round = RoundState::new_with_seed(2, level_two, 7).expect("level 2 is valid");
    round.set_apple(Cell::new(0, 0));
    round.reveal_hazard_at(Cell::new(6, 9));

    round.advance(0.1, None);

    assert!(round.is_terminal());
    assert_eq!(round.death_cause(), Some(DeathCause::Bomb));
    assert_eq!(round.score(), 0);
    assert_eq!(round.eaten(), 0);
}

#[test]
fn first_step_into_a_wall_keeps_score_at_zero() {
    let mut round =
        RoundState::new_with_seed(1, LevelProfile::default(), 3).expect("level 1 is valid");
    round.set_snake(Snake::new(Cell::new(22, 4), Direction::Right));

    round.advance(0.15, None);

    assert!(round.is_terminal());
    assert_eq!(round.score(), 0);
    assert_eq!(round.eaten(), 0);
}

#[test]
fn next_level_from_pause_starts_fresh_bounds() {
    let shrinking_first = LevelProfile {
        name: "Closing".to_owned(),
        move_interval: 100.0,
        shrink: Some(ShrinkConfig {
            interval: 1.0,
            floor: GridSize::new(5, 5),
        }),
        ..LevelProfile::default()
    };
    let second = LevelProfile {
        name: "Open".to_owned(),
        move_interval: 0.1,
        small_score: 2,
        bonus_score: 4,
        ..LevelProfile::default()
    };
    let table = LevelTable::new(vec![shrinking_first, second]).expect("table is valid");
    let mut controller = GameModeController::new(table);
    controller.start_level(0).expect("first level starts");

    for _ in 0..3 {
        controller.update(1.0, None);
    }
    let shrunk = controller.round().expect("live round").bounds();
    assert_eq!(shrunk, GridSize::new(20, 15));

    controller.update(0.0, Some(Intent::Pause));
    controller.update(0.0, Some(Intent::MoveDown));
    controller.update(0.0, Some(Intent::Confirm));

    assert_eq!(controller.mode(), GameMode::Playing);
    let round = controller.round().expect("next level round");
    assert_eq!(round.level(), 2);
    assert_eq!(round.bounds(), GridSize::new(23, 18));
    assert_eq!(round.profile().move_interval, 0.1);
    assert_eq!(round.profile().small_score, 2);
    assert_eq!(round.score(), 0);
}
