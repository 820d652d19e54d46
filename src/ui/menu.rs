use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::level::{LevelProfile, LevelTable};
use crate::mode::MenuView;
use crate::round::{DeathCause, RoundSnapshot};
use crate::theme::UI;

const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// Draws a titled menu as a centered popup with the cursor row highlighted.
pub fn render_menu(frame: &mut Frame<'_>, area: Rect, title: &str, menu: &MenuView) {
    let popup = centered_popup(area, 50, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from(title.to_owned()))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(UI.title)
                    .bg(UI.menu_bg)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    frame.render_widget(
        Paragraph::new(menu_lines(menu))
            .alignment(Alignment::Center)
            .style(Style::default().bg(UI.menu_bg))
            .block(Block::bordered()),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[↑/↓] Move   [Enter] Select   [Esc] Back"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(UI.disabled).bg(UI.menu_bg)),
        footer_row,
    );
}

fn menu_lines(menu: &MenuView) -> Vec<Line<'static>> {
    menu.entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let selected = index == menu.selected;
            let marker = if selected {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            let style = if !entry.enabled {
                Style::default().fg(UI.disabled)
            } else if selected {
                Style::default()
                    .fg(UI.selected)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(UI.text)
            };

            Line::styled(format!("{marker}{}", entry.label), style)
        })
        .collect()
}

/// Draws the help screen: goal, per-level scoring and controls.
pub fn render_help(frame: &mut Frame<'_>, area: Rect, levels: &LevelTable) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(help_lines(levels))
            .alignment(Alignment::Left)
            .style(Style::default().fg(UI.text).bg(UI.menu_bg))
            .block(
                Block::bordered()
                    .title(" help ")
                    .title_style(Style::default().fg(UI.highlight)),
            ),
        popup,
    );
}

fn help_lines(levels: &LevelTable) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Eat apples to grow and increase your score."),
        Line::from("Avoid hitting walls, yourself, or bombs!"),
        Line::from(""),
        Line::styled("Scoring:", Style::default().fg(UI.highlight)),
    ];

    lines.extend(levels.iter().map(|level| Line::from(level_summary(level))));

    lines.extend([
        Line::from(""),
        Line::styled("Controls:", Style::default().fg(UI.highlight)),
        Line::from("  Arrows / WASD  Move"),
        Line::from("  P              Pause"),
        Line::from("  R              Restart after game over"),
        Line::from("  Esc            Menu"),
        Line::from("  Q              Quit"),
    ]);

    lines
}

fn level_summary(level: &LevelProfile) -> String {
    let mut summary = format!(
        "- {}: apple +{}, bonus apple +{}",
        level.name, level.small_score, level.bonus_score
    );
    if level.hazard_enabled() {
        summary.push_str(", bombs");
    }
    if let Some(shrink) = level.shrink {
        summary.push_str(&format!(", walls shrink every {}s", shrink.interval));
    }
    summary
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over(frame: &mut Frame<'_>, area: Rect, round: &RoundSnapshot) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled(
            "GAME OVER!",
            Style::default()
                .fg(UI.danger)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {}", round.score)),
        Line::from(format!("Apples: {}", round.eaten)),
        Line::from(death_message(round.death_cause)),
        Line::from(""),
        Line::styled(
            "[R]/[Enter] Restart   [Esc] Menu",
            Style::default().fg(UI.selected),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(UI.text).bg(UI.menu_bg))
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_message(cause: Option<DeathCause>) -> &'static str {
    match cause {
        Some(DeathCause::Wall) => "Cause: hit the wall",
        Some(DeathCause::SelfBite) => "Cause: bit yourself",
        Some(DeathCause::Bomb) => "Cause: stepped on a bomb",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use crate::level::LevelTable;
    use crate::mode::{MenuEntry, MenuView};
    use crate::theme::UI;

    use super::{help_lines, level_summary, menu_lines};

    #[test]
    fn level_summaries_mention_enabled_systems() {
        let levels = LevelTable::builtin();
        let summaries: Vec<_> = levels.iter().map(level_summary).collect();

        assert_eq!(summaries[0], "- Level 1: apple +1, bonus apple +2");
        assert_eq!(summaries[1], "- Level 2: apple +2, bonus apple +4, bombs");
        assert_eq!(
            summaries[2],
            "- Level 3: apple +3, bonus apple +6, bombs, walls shrink every 5s"
        );
    }

    #[test]
    fn help_lists_every_level() {
        let levels = LevelTable::builtin();
        let text: Vec<String> = help_lines(&levels)
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();

        for level in levels.iter() {
            assert!(text.iter().any(|line| line.contains(&level.name)));
        }
    }

    #[test]
    fn cursor_row_is_marked_and_disabled_rows_are_dimmed() {
        let menu = MenuView {
            entries: vec![
                MenuEntry {
                    label: "Continue".to_owned(),
                    enabled: true,
                },
                MenuEntry {
                    label: "Next Level".to_owned(),
                    enabled: false,
                },
            ],
            selected: 0,
        };

        let lines = menu_lines(&menu);

        assert_eq!(lines[0].spans[0].content, "> Continue");
        assert_eq!(lines[1].spans[0].content, "  Next Level");
        assert_eq!(lines[1].style.fg, Some(UI.disabled));
    }
}
