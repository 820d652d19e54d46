use crate::error::ConfigError;
use crate::input::Intent;
use crate::level::LevelTable;
use crate::round::{RoundSnapshot, RoundState};

/// Top-level screen the game is on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameMode {
    Menu,
    LevelSelect,
    Playing,
    Paused,
    GameOver,
    About,
}

const MAIN_MENU: [&str; 3] = ["Levels", "Help", "Exit"];
const MAIN_LEVELS: usize = 0;
const MAIN_HELP: usize = 1;
const MAIN_EXIT: usize = 2;

const PAUSE_MENU: [&str; 3] = ["Continue", "Next Level", "Main Menu"];
const PAUSE_CONTINUE: usize = 0;
const PAUSE_NEXT_LEVEL: usize = 1;
const PAUSE_MAIN_MENU: usize = 2;

/// One selectable line of the active menu.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub enabled: bool,
}

/// Menu contents and cursor for the screens that have one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MenuView {
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub menu: Option<MenuView>,
    /// 1-based number of the current (or last played) level.
    pub level: usize,
    pub level_count: usize,
    /// Present while a round is live or just ended.
    pub round: Option<RoundSnapshot>,
}

/// Finite state machine deciding which intents matter and owning the live round.
#[derive(Debug)]
pub struct GameModeController {
    mode: GameMode,
    levels: LevelTable,
    level_index: usize,
    main_cursor: usize,
    level_cursor: usize,
    pause_cursor: usize,
    round: Option<RoundState>,
    exit_requested: bool,
}

impl GameModeController {
    /// Starts on the main menu with no round.
    #[must_use]
    pub fn new(levels: LevelTable) -> Self {
        Self {
            mode: GameMode::Menu,
            levels,
            level_index: 0,
            main_cursor: 0,
            level_cursor: 0,
            pause_cursor: 0,
            round: None,
            exit_requested: false,
        }
    }

    /// Per-frame entry point: applies `intent`, then advances the live round
    /// by `dt` while playing.
    ///
    /// A motion intent during play steers within the same tick; every other
    /// intent goes through [`Self::handle`] first.
    pub fn update(&mut self, dt: f32, intent: Option<Intent>) {
        let mut steer = None;
        if let Some(intent) = intent {
            match intent.direction() {
                Some(direction) if self.mode == GameMode::Playing => steer = Some(direction),
                _ => self.handle(intent),
            }
        }

        if self.mode != GameMode::Playing {
            return;
        }

        if let Some(round) = self.round.as_mut() {
            round.advance(dt, steer);
        }
        self.observe_round();
    }

    /// Applies one discrete intent to the current mode. Intents that mean
    /// nothing in the current mode are ignored.
    pub fn handle(&mut self, intent: Intent) {
        match (self.mode, intent) {
            (GameMode::Menu, Intent::MoveUp) => self.main_cursor = self.main_cursor.saturating_sub(1),
            (GameMode::Menu, Intent::MoveDown) => {
                self.main_cursor = (self.main_cursor + 1).min(MAIN_MENU.len() - 1);
            }
            (GameMode::Menu, Intent::Confirm) => self.confirm_main_menu(),

            (GameMode::LevelSelect, Intent::MoveUp) => {
                self.level_cursor = self.level_cursor.saturating_sub(1);
            }
            (GameMode::LevelSelect, Intent::MoveDown) => {
                self.level_cursor = (self.level_cursor + 1).min(self.levels.len().saturating_sub(1));
            }
            (GameMode::LevelSelect, Intent::Confirm) => {
                self.enter_level(self.level_cursor);
            }
            (GameMode::LevelSelect, Intent::Cancel) => self.set_mode(GameMode::Menu),

            (GameMode::Playing, Intent::Pause) => {
                self.pause_cursor = PAUSE_CONTINUE;
                self.set_mode(GameMode::Paused);
            }
            (GameMode::Playing, Intent::Cancel) => self.quit_to_menu(),
            (GameMode::Playing, _) => {
                if let (Some(direction), Some(round)) = (intent.direction(), self.round.as_mut()) {
                    round.steer(direction);
                }
            }

            (GameMode::Paused, Intent::MoveUp) => self.move_pause_cursor(false),
            (GameMode::Paused, Intent::MoveDown) => self.move_pause_cursor(true),
            (GameMode::Paused, Intent::Confirm) => self.confirm_pause_menu(),
            (GameMode::Paused, Intent::Resume | Intent::Pause) => self.set_mode(GameMode::Playing),
            (GameMode::Paused, Intent::Cancel) => self.quit_to_menu(),

            (GameMode::GameOver, Intent::Restart | Intent::Confirm) => {
                self.enter_level(self.level_index);
            }
            (GameMode::GameOver, Intent::Cancel) => self.quit_to_menu(),

            (GameMode::About, Intent::Cancel | Intent::Confirm) => self.set_mode(GameMode::Menu),

            (mode, intent) => log::trace!("ignoring {intent:?} in {mode:?}"),
        }
    }

    /// Discards any live round and starts a fresh one of the 0-based level
    /// `index`. On error the mode is left unchanged.
    pub fn start_level(&mut self, index: usize) -> Result<(), ConfigError> {
        let profile = self
            .levels
            .get(index)
            .cloned()
            .ok_or(ConfigError::UnknownLevel(index + 1))?;

        match RoundState::new(index + 1, profile) {
            Ok(round) => {
                self.round = Some(round);
                self.level_index = index;
                self.level_cursor = index;
                self.set_mode(GameMode::Playing);
                Ok(())
            }
            Err(error) => {
                log::warn!("cannot start level {}: {error}", index + 1);
                Err(error)
            }
        }
    }

    /// Menu-driven start: a level that fails to start leaves the current
    /// screen in place.
    fn enter_level(&mut self, index: usize) {
        if let Err(error) = self.start_level(index) {
            log::trace!("staying in {:?}: {error}", self.mode);
        }
    }

    fn confirm_main_menu(&mut self) {
        match self.main_cursor {
            MAIN_LEVELS => self.set_mode(GameMode::LevelSelect),
            MAIN_HELP => self.set_mode(GameMode::About),
            MAIN_EXIT => {
                log::debug!("exit requested from main menu");
                self.exit_requested = true;
            }
            _ => {}
        }
    }

    fn confirm_pause_menu(&mut self) {
        match self.pause_cursor {
            PAUSE_CONTINUE => self.set_mode(GameMode::Playing),
            PAUSE_NEXT_LEVEL if self.has_next_level() => {
                self.enter_level(self.level_index + 1);
            }
            PAUSE_MAIN_MENU => self.quit_to_menu(),
            _ => {}
        }
    }

    fn move_pause_cursor(&mut self, forward: bool) {
        let enabled = self.pause_entries_enabled();
        let mut candidate = self.pause_cursor;
        loop {
            candidate = if forward {
                candidate + 1
            } else {
                match candidate.checked_sub(1) {
                    Some(previous) => previous,
                    None => return,
                }
            };
            match enabled.get(candidate) {
                Some(true) => {
                    self.pause_cursor = candidate;
                    return;
                }
                Some(false) => {}
                None => return,
            }
        }
    }

    fn pause_entries_enabled(&self) -> [bool; 3] {
        [true, self.has_next_level(), true]
    }

    fn has_next_level(&self) -> bool {
        !self.levels.is_last(self.level_index)
    }

    fn quit_to_menu(&mut self) {
        self.round = None;
        self.set_mode(GameMode::Menu);
    }

    fn observe_round(&mut self) {
        let ended = self
            .round
            .as_ref()
            .is_some_and(|round| round.is_terminal());
        if self.mode == GameMode::Playing && ended {
            self.set_mode(GameMode::GameOver);
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::debug!("mode {:?} -> {mode:?}", self.mode);
        }
        self.mode = mode;
    }

    /// Captures the current mode, menu and round for drawing.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            menu: self.menu_view(),
            level: self.level_index + 1,
            level_count: self.levels.len(),
            round: self.round.as_ref().map(RoundState::snapshot),
        }
    }

    fn menu_view(&self) -> Option<MenuView> {
        match self.mode {
            GameMode::Menu => Some(MenuView {
                entries: MAIN_MENU.iter().map(|label| enabled_entry(label)).collect(),
                selected: self.main_cursor,
            }),
            GameMode::LevelSelect => Some(MenuView {
                entries: self
                    .levels
                    .iter()
                    .map(|level| enabled_entry(&level.name))
                    .collect(),
                selected: self.level_cursor,
            }),
            GameMode::Paused => Some(MenuView {
                entries: PAUSE_MENU
                    .iter()
                    .zip(self.pause_entries_enabled())
                    .map(|(label, enabled)| MenuEntry {
                        label: (*label).to_owned(),
                        enabled,
                    })
                    .collect(),
                selected: self.pause_cursor,
            }),
            GameMode::Playing | GameMode::GameOver | GameMode::About => None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Mutable access to the live round, for scripted scenarios.
    pub fn round_mut(&mut self) -> Option<&mut RoundState> {
        self.round.as_mut()
    }

    #[must_use]
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// 0-based index of the current (or last played) level.
    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// True once "Exit" was chosen on the main menu.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

fn enabled_entry(label: &str) -> MenuEntry {
    MenuEntry {
        label: label.to_owned(),
        enabled: true,
    }
}
