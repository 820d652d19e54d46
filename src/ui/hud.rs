use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::round::RoundSnapshot;
use crate::theme::UI;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD below the board and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, round: &RoundSnapshot) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let hud_area = inset_horizontal(hud_area, HUD_MARGIN_X);

    let compact = info_width(round, false) > usize::from(hud_area.width);
    frame.render_widget(
        Paragraph::new(info_line(round, compact))
            .alignment(Alignment::Center)
            .style(Style::default().fg(UI.text)),
        hud_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(margin.saturating_mul(2)),
        height: area.height,
    }
}

fn labels(compact: bool) -> [&'static str; 4] {
    if compact {
        ["L", "S", "A", "B"]
    } else {
        ["Level", "Score", "Apples", "Board"]
    }
}

fn values(round: &RoundSnapshot) -> [String; 4] {
    [
        round.level_name.clone(),
        round.score.to_string(),
        round.eaten.to_string(),
        round.bounds.to_string(),
    ]
}

fn info_line(round: &RoundSnapshot, compact: bool) -> Line<'static> {
    let value_style = Style::default()
        .fg(UI.highlight)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    for (index, (label, value)) in labels(compact)
        .into_iter()
        .zip(values(round))
        .enumerate()
    {
        if index > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::raw(format!("{label}: ")));
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}

fn info_width(round: &RoundSnapshot, compact: bool) -> usize {
    let fields: usize = labels(compact)
        .into_iter()
        .zip(values(round))
        .map(|(label, value)| label.width() + ": ".width() + value.width())
        .sum();

    fields + SEPARATOR.width() * 3
}
