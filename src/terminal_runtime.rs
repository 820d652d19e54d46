use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::level::LevelTable;
use crate::mode::GameSnapshot;
use crate::renderer;

/// Draws controller snapshots onto a ratatui backend.
///
/// The level table is kept so the board can be drawn at its starting footprint
/// while the walls close in.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
    levels: LevelTable,
}

impl<B: Backend> Screen<B> {
    pub fn new(backend: B, levels: LevelTable) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            levels,
        })
    }

    /// Renders one frame for `snapshot`.
    pub fn draw(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        let levels = &self.levels;
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot, levels))?;
        Ok(())
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

/// Raw mode plus the alternate screen for one play session.
///
/// Dropping the session hands the shell back in its normal state, including
/// after an early `?` return from the frame loop.
pub struct TerminalSession {
    screen: Screen<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter(levels: LevelTable) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Screen::new(CrosstermBackend::new(stdout), levels) {
            Ok(screen) => {
                log::debug!("entered the alternate screen");
                Ok(Self { screen })
            }
            Err(error) => {
                let _ = leave_alternate_screen();
                Err(error)
            }
        }
    }

    pub fn screen_mut(&mut self) -> &mut Screen<CrosstermBackend<Stdout>> {
        &mut self.screen
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = leave_alternate_screen() {
            log::warn!("terminal restore failed: {error}");
        }
    }
}

/// Puts the terminal back before the default panic report is printed, so the
/// message is not lost on the alternate screen.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_alternate_screen();
        default_hook(panic_info);
    }));
}

/// Idempotent; both the session drop and the panic hook may call it.
fn leave_alternate_screen() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}
