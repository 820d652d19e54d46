use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use arcade_snake::config::{self, DEFAULT_FPS, MAX_FPS, MIN_FPS};
use arcade_snake::keymap::{self, KeyAction};
use arcade_snake::mode::GameModeController;
use arcade_snake::terminal_runtime::{self, TerminalSession};
use clap::Parser;
use env_logger::{Env, Target};

/// Level-based arcade Snake for the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON level table to play instead of the built-in levels.
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,

    /// Skip the menu and start directly in this level (1-based).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    level: Option<u16>,

    /// Target frames per second.
    #[arg(
        long,
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_FPS)..=i64::from(MAX_FPS))
    )]
    fps: u16,

    /// Write the active level table as JSON to PATH and exit.
    #[arg(long, value_name = "PATH")]
    dump_levels: Option<PathBuf>,

    /// Append diagnostics to PATH instead of the per-user cache directory.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone().or_else(config::default_log_path).as_deref());

    // Configuration problems are reported before the terminal enters raw mode.
    let levels = match config::load_levels(cli.levels.as_deref()) {
        Ok(levels) => levels,
        Err(error) => {
            eprintln!("arcade-snake: {error}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(path) = cli.dump_levels.as_deref() {
        config::save_levels(path, &levels)?;
        println!("wrote {} levels to {}", levels.len(), path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut controller = GameModeController::new(levels.clone());
    if let Some(level) = cli.level {
        if let Err(error) = controller.start_level(usize::from(level) - 1) {
            eprintln!("arcade-snake: {error}");
            return Ok(ExitCode::FAILURE);
        }
    }

    terminal_runtime::install_panic_hook();

    let mut session = TerminalSession::enter(levels)?;
    run(&mut session, &mut controller, frame_budget(cli.fps))?;

    Ok(ExitCode::SUCCESS)
}

fn run(
    session: &mut TerminalSession,
    controller: &mut GameModeController,
    budget: Duration,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        let intent = match keymap::poll_action(Duration::ZERO)? {
            Some(KeyAction::Quit) => break,
            Some(KeyAction::Intent(intent)) => Some(intent),
            None => None,
        };

        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;
        controller.update(dt, intent);

        if controller.exit_requested() {
            break;
        }

        session.screen_mut().draw(&controller.snapshot())?;

        if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}

fn frame_budget(fps: u16) -> Duration {
    Duration::from_secs(1) / u32::from(fps.max(1))
}

/// Sends `log` output to `path`; stderr would be drawn over by the game.
///
/// `RUST_LOG` picks the filter, defaulting to warnings. Without a usable path
/// logging stays off.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };

    match config::open_log_file(path) {
        Ok(file) => {
            env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        Err(error) => {
            eprintln!("arcade-snake: logging disabled, cannot open {}: {error}", path.display());
        }
    }
}
