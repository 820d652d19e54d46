use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::grid::{Cell, GridSize};
use crate::level::LevelTable;
use crate::mode::{GameMode, GameSnapshot};
use crate::round::RoundSnapshot;
use crate::theme::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_CELL, Palette, UI, board_color, palette_for_level,
};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over, render_help, render_menu};

/// Renders the full frame from an immutable controller snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, levels: &LevelTable) {
    let area = frame.area();

    match (snapshot.mode, snapshot.round.as_ref()) {
        (GameMode::Playing | GameMode::Paused | GameMode::GameOver, Some(round)) => {
            render_round(frame, area, round, levels);

            match snapshot.mode {
                GameMode::Paused => {
                    if let Some(menu) = &snapshot.menu {
                        render_menu(frame, area, "PAUSED", menu);
                    }
                }
                GameMode::GameOver => render_game_over(frame, area, round),
                _ => {}
            }
        }
        (GameMode::About, _) => {
            fill(frame, area, UI.menu_bg);
            render_help(frame, area, levels);
        }
        (mode, _) => {
            fill(frame, area, UI.menu_bg);
            let title = if mode == GameMode::LevelSelect {
                "SELECT LEVEL"
            } else {
                "SNAKE"
            };
            if let Some(menu) = &snapshot.menu {
                render_menu(frame, area, title, menu);
            }
        }
    }
}

fn fill(frame: &mut Frame<'_>, area: Rect, color: Color) {
    frame.render_widget(Paragraph::new("").style(Style::default().bg(color)), area);
}

fn render_round(frame: &mut Frame<'_>, area: Rect, round: &RoundSnapshot, levels: &LevelTable) {
    let palette = palette_for_level(round.level);
    fill(frame, area, palette.backdrop);

    let play_area = render_hud(frame, area, round);

    // The board keeps its starting footprint; cells the walls closed over are
    // painted as wall.
    let full_bounds = levels
        .get(round.level.saturating_sub(1))
        .map_or(round.bounds, |level| level.bounds);
    let board_area = board_rect(play_area, full_bounds);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(palette.wall).bg(palette.backdrop));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_board(frame, inner, full_bounds, round.bounds, palette);
    render_entities(frame, inner, full_bounds, round, palette);
    render_snake(frame, inner, full_bounds, round, palette);
}

fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_board(
    frame: &mut Frame<'_>,
    inner: Rect,
    full_bounds: GridSize,
    playable: GridSize,
    palette: &Palette,
) {
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(full_bounds.height) {
        for x in 0..i32::from(full_bounds.width) {
            let cell = Cell::new(x, y);
            let Some((column, row)) = logical_to_terminal(inner, full_bounds, cell) else {
                continue;
            };

            let color = if playable.contains(cell) {
                board_color(palette, x, y)
            } else {
                palette.wall
            };
            buffer.set_string(column, row, GLYPH_CELL, Style::new().fg(color));
        }
    }
}

fn render_entities(
    frame: &mut Frame<'_>,
    inner: Rect,
    full_bounds: GridSize,
    round: &RoundSnapshot,
    palette: &Palette,
) {
    let entities = [
        Some((round.apple, palette.apple)),
        Some((round.bonus, palette.bonus)),
        round.hazard.map(|hazard| (hazard, palette.hazard)),
    ];

    let buffer = frame.buffer_mut();
    for (entity, color) in entities.into_iter().flatten() {
        if !entity.visible {
            continue;
        }
        if let Some((x, y)) = logical_to_terminal(inner, full_bounds, entity.position) {
            buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color));
        }
    }
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    full_bounds: GridSize,
    round: &RoundSnapshot,
    palette: &Palette,
) {
    let buffer = frame.buffer_mut();

    // Tail first so the head wins where clamped segments overlap.
    for (index, segment) in round.body.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, full_bounds, *segment) else {
            continue;
        };

        let color = if index == 0 {
            palette.snake_head
        } else {
            palette.snake_body
        };
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color));
    }
}

/// Maps a logical cell to the top-left terminal column/row it is drawn at.
fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::grid::{Cell, GridSize};
    use crate::input::Intent;
    use crate::level::LevelTable;
    use crate::mode::GameModeController;

    use super::{board_rect, logical_to_terminal, render};

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(10, 5, 46, 18);
        let bounds = GridSize::new(23, 18);

        assert_eq!(
            logical_to_terminal(inner, bounds, Cell::new(0, 0)),
            Some((10, 5))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Cell::new(22, 17)),
            Some((54, 22))
        );
        assert_eq!(logical_to_terminal(inner, bounds, Cell::new(23, 0)), None);
    }

    #[test]
    fn cells_outside_a_too_small_terminal_are_skipped() {
        let inner = Rect::new(0, 0, 10, 4);

        assert_eq!(
            logical_to_terminal(inner, GridSize::new(23, 18), Cell::new(5, 0)),
            None
        );
    }

    #[test]
    fn board_is_centered_in_the_play_area() {
        let board = board_rect(Rect::new(0, 0, 100, 40), GridSize::new(23, 18));

        assert_eq!(board, Rect::new(26, 10, 48, 20));
    }

    #[test]
    fn every_screen_draws_on_small_and_large_terminals() {
        let levels = LevelTable::builtin();

        for (width, height) in [(30, 10), (120, 40)] {
            let mut terminal =
                Terminal::new(TestBackend::new(width, height)).expect("test terminal");
            let mut controller = GameModeController::new(levels.clone());

            let mut draw = |controller: &GameModeController| {
                let snapshot = controller.snapshot();
                terminal
                    .draw(|frame| render(frame, &snapshot, &levels))
                    .expect("frame draws");
            };

            draw(&controller);
            controller.handle(Intent::Confirm);
            draw(&controller);
            controller.handle(Intent::Confirm);
            draw(&controller);
            controller.handle(Intent::Pause);
            draw(&controller);
            controller.handle(Intent::Cancel);
            controller.handle(Intent::MoveDown);
            controller.handle(Intent::Confirm);
            draw(&controller);
        }
    }
}
