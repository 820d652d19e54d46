use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::ConfigError;
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::level::LevelProfile;
use crate::snake::Snake;
use crate::spawn::{CellSource, SpawnField, free_cell_exists};
use crate::timer::{IntervalTimer, TimerBank, Transition, VisibilityTimer};

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathCause {
    Wall,
    SelfBite,
    Bomb,
}

/// Position of an entity and whether it can currently be hit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EntityView {
    pub position: Cell,
    pub visible: bool,
}

/// Read-only copy of everything the presentation layer draws for a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub level: usize,
    pub level_name: String,
    pub bounds: GridSize,
    pub body: Vec<Cell>,
    pub heading: Direction,
    /// Hidden when a shrink left no free cell to move it to.
    pub apple: EntityView,
    pub bonus: EntityView,
    /// `None` on levels without bombs.
    pub hazard: Option<EntityView>,
    pub score: u32,
    pub eaten: u32,
    pub terminal: bool,
    pub death_cause: Option<DeathCause>,
}

/// Complete simulation state for one round of one level.
#[derive(Debug, Clone)]
pub struct RoundState<S: CellSource = StdRng> {
    level: usize,
    profile: LevelProfile,
    bounds: GridSize,
    snake: Snake,
    apple: SpawnField,
    bonus: SpawnField,
    hazard: SpawnField,
    timers: TimerBank,
    move_accumulator: f32,
    score: u32,
    eaten: u32,
    death_cause: Option<DeathCause>,
    source: S,
}

impl RoundState<StdRng> {
    /// Starts a round of `profile` with entropy-seeded placement.
    ///
    /// `level` is the 1-based level number.
    pub fn new(level: usize, profile: LevelProfile) -> Result<Self, ConfigError> {
        Self::with_source(level, profile, StdRng::from_entropy())
    }

    /// Starts a round with reproducible placement.
    pub fn new_with_seed(level: usize, profile: LevelProfile, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(level, profile, StdRng::seed_from_u64(seed))
    }
}

impl<S: CellSource> RoundState<S> {
    /// Validates `profile` and lays out a fresh round: start snake, all three
    /// entities placed, timers at zero.
    pub fn with_source(level: usize, profile: LevelProfile, mut source: S) -> Result<Self, ConfigError> {
        profile.validate(level)?;

        let bounds = profile.bounds;
        let snake = Snake::spawn();
        let apple = SpawnField::placed(bounds, &snake, &mut source);
        let bonus = SpawnField::placed(bounds, &snake, &mut source);
        let hazard = SpawnField::placed(bounds, &snake, &mut source);
        let timers = TimerBank {
            bonus: VisibilityTimer::new(profile.bonus),
            hazard: profile.hazard.map(VisibilityTimer::new),
            shrink: profile.shrink.map(|shrink| IntervalTimer::new(shrink.interval)),
        };

        log::info!(
            "round started: {} ({bounds}, {:.3}s/step, bombs: {}, shrinking walls: {})",
            profile.name,
            profile.move_interval,
            profile.hazard_enabled(),
            profile.shrink_enabled(),
        );

        Ok(Self {
            level,
            profile,
            bounds,
            snake,
            apple,
            bonus,
            hazard,
            timers,
            move_accumulator: 0.0,
            score: 0,
            eaten: 0,
            death_cause: None,
            source,
        })
    }

    /// Advances the round by one frame of `dt` seconds.
    ///
    /// Order: steering, timer accumulation, wall shrink, visibility cycles,
    /// then at most one grid step with its collision checks. A terminal round
    /// ignores the call.
    pub fn advance(&mut self, dt: f32, steer: Option<Direction>) {
        if self.is_terminal() {
            return;
        }

        if let Some(direction) = steer {
            self.snake.set_direction(direction);
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.move_accumulator += dt;
        self.timers.accumulate(dt);

        if self.timers.shrink_due() {
            self.shrink_walls();
            if let Some(shrink) = self.timers.shrink.as_mut() {
                shrink.reset();
            }
        }

        self.advance_visibility(dt);

        if self.move_accumulator >= self.profile.move_interval {
            self.move_accumulator -= self.profile.move_interval;
            self.step_snake();
        }
    }

    fn shrink_walls(&mut self) {
        let Some(shrink) = self.profile.shrink else {
            return;
        };
        let Some(bounds) = self.bounds.shrunk_toward(shrink.floor) else {
            log::trace!("walls already at the {} floor", shrink.floor);
            return;
        };

        self.bounds = bounds;
        self.snake.clamp_into(bounds);

        for field in [&mut self.apple, &mut self.bonus, &mut self.hazard] {
            field.reseed_bounds(bounds);
            if field.is_stale() {
                respawn(field, bounds, &self.snake, &mut self.source);
            }
        }

        log::debug!("walls closed in to {bounds}");
    }

    fn advance_visibility(&mut self, dt: f32) {
        if let Some(transition) = self.timers.bonus.advance(dt) {
            if transition == Transition::Appeared {
                respawn(&mut self.bonus, self.bounds, &self.snake, &mut self.source);
            }
            log::debug!("bonus apple {transition:?} at {:?}", self.bonus.position());
        }

        if let Some(hazard_timer) = self.timers.hazard.as_mut() {
            if let Some(transition) = hazard_timer.advance(dt) {
                if transition == Transition::Appeared {
                    respawn(&mut self.hazard, self.bounds, &self.snake, &mut self.source);
                }
                log::debug!("bomb {transition:?} at {:?}", self.hazard.position());
            }
        }
    }

    fn step_snake(&mut self) {
        self.snake.step();

        if self.snake.collides_with_walls(self.bounds) {
            self.end(DeathCause::Wall);
            return;
        }
        if self.snake.collides_with_self() {
            self.end(DeathCause::SelfBite);
            return;
        }

        let head = self.snake.head();

        if head == self.apple.position() {
            self.snake.grow();
            self.score = self.score.saturating_add(self.profile.small_score);
            self.eaten += 1;
            respawn(&mut self.apple, self.bounds, &self.snake, &mut self.source);
        }

        if self.timers.bonus.is_visible() && head == self.bonus.position() {
            self.snake.grow();
            self.snake.grow();
            self.score = self.score.saturating_add(self.profile.bonus_score);
            self.eaten += 1;
            self.timers.bonus.consume();
        }

        if self.timers.hazard_visible() && head == self.hazard.position() {
            self.end(DeathCause::Bomb);
        }
    }

    fn end(&mut self, cause: DeathCause) {
        log::info!(
            "round over on {}: {cause:?}, score {}, apples {}",
            self.profile.name,
            self.score,
            self.eaten
        );
        self.death_cause = Some(cause);
    }

    /// Turns the snake between frames without advancing time.
    pub fn steer(&mut self, direction: Direction) {
        if !self.is_terminal() {
            self.snake.set_direction(direction);
        }
    }

    /// Replaces the snake, for scripted scenarios.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Moves the apple to `cell`, for scripted scenarios.
    pub fn set_apple(&mut self, cell: Cell) {
        self.apple = SpawnField::at(cell, self.bounds);
    }

    /// Shows the bonus apple at `cell` with a fresh visible window.
    pub fn reveal_bonus_at(&mut self, cell: Cell) {
        self.bonus = SpawnField::at(cell, self.bounds);
        self.timers.bonus.reveal();
    }

    /// Shows the bomb at `cell`; ignored on levels without bombs.
    pub fn reveal_hazard_at(&mut self, cell: Cell) {
        if let Some(hazard_timer) = self.timers.hazard.as_mut() {
            self.hazard = SpawnField::at(cell, self.bounds);
            hazard_timer.reveal();
        }
    }

    /// Captures a presentation snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            level: self.level,
            level_name: self.profile.name.clone(),
            bounds: self.bounds,
            body: self.snake.segments().copied().collect(),
            heading: self.snake.heading(),
            apple: EntityView {
                position: self.apple.position(),
                visible: !self.apple.is_stale(),
            },
            bonus: EntityView {
                position: self.bonus.position(),
                visible: self.timers.bonus.is_visible() && !self.bonus.is_stale(),
            },
            hazard: self.timers.hazard.map(|hazard_timer| EntityView {
                position: self.hazard.position(),
                visible: hazard_timer.is_visible() && !self.hazard.is_stale(),
            }),
            score: self.score,
            eaten: self.eaten,
            terminal: self.is_terminal(),
            death_cause: self.death_cause,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.death_cause.is_some()
    }

    #[must_use]
    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    /// 1-based level number.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn profile(&self) -> &LevelProfile {
        &self.profile
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn apple(&self) -> Cell {
        self.apple.position()
    }

    #[must_use]
    pub fn bonus(&self) -> Cell {
        self.bonus.position()
    }

    #[must_use]
    pub fn hazard(&self) -> Cell {
        self.hazard.position()
    }

    #[must_use]
    pub fn bonus_visible(&self) -> bool {
        self.timers.bonus.is_visible()
    }

    #[must_use]
    pub fn hazard_visible(&self) -> bool {
        self.timers.hazard_visible()
    }

    #[must_use]
    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    #[must_use]
    pub fn move_accumulator(&self) -> f32 {
        self.move_accumulator
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn eaten(&self) -> u32 {
        self.eaten
    }
}

/// Re-places `field` unless the snake leaves no free cell, in which case the
/// entity keeps its old position. A position left outside the bounds this way
/// is reported as hidden by [`RoundState::snapshot`] and can never be hit.
fn respawn<S: CellSource + ?Sized>(
    field: &mut SpawnField,
    bounds: GridSize,
    snake: &Snake,
    source: &mut S,
) {
    if free_cell_exists(bounds, snake) {
        field.place(bounds, snake, source);
    } else {
        log::debug!("no free cell left in {bounds}; entity stays at {:?}", field.position());
    }
}
