use ratatui::style::Color;
use ratatui::symbols::border;

/// Each logical cell is drawn this many terminal columns wide so cells look
/// roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Glyph for one filled logical cell (two columns).
pub const GLYPH_CELL: &str = "██";

/// Half-block border set: solid side faces the play area.
///
/// - Top row + top corners: `▄` (solid bottom -> play area below)
/// - Bottom row + bottom corners: `▀` (solid top -> play area above)
/// - Left and right columns: `█`
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Colours for one level's board and entities.
///
/// Every entity is drawn as a solid block of its colour; the board alternates
/// `cell_even` and `cell_odd` in a checkerboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Area around the board.
    pub backdrop: Color,
    pub cell_even: Color,
    pub cell_odd: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple: Color,
    pub bonus: Color,
    pub hazard: Color,
    /// Cells the walls have already closed over.
    pub wall: Color,
}

/// Colours shared by menus, HUD and popups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub menu_bg: Color,
    pub text: Color,
    pub selected: Color,
    pub disabled: Color,
    pub title: Color,
    pub highlight: Color,
    pub danger: Color,
}

pub const UI: UiColors = UiColors {
    menu_bg: Color::Black,
    text: Color::White,
    selected: Color::Yellow,
    disabled: Color::DarkGray,
    title: Color::Green,
    highlight: Color::Rgb(255, 215, 0),
    danger: Color::Rgb(255, 50, 50),
};

/// Meadow greens with a blue snake.
pub const PALETTE_MEADOW: Palette = Palette {
    backdrop: Color::Rgb(34, 139, 34),
    cell_even: Color::Rgb(144, 238, 144),
    cell_odd: Color::Rgb(152, 251, 152),
    snake_head: Color::Rgb(0, 0, 139),
    snake_body: Color::Rgb(65, 105, 225),
    apple: Color::Red,
    bonus: Color::Blue,
    hazard: Color::Black,
    wall: Color::Rgb(17, 70, 17),
};

/// Dusk purples with a red snake.
pub const PALETTE_DUSK: Palette = Palette {
    backdrop: Color::Rgb(50, 50, 100),
    cell_even: Color::Rgb(100, 100, 150),
    cell_odd: Color::Rgb(120, 120, 170),
    snake_head: Color::Rgb(200, 50, 50),
    snake_body: Color::Rgb(255, 100, 100),
    apple: Color::Rgb(255, 255, 0),
    bonus: Color::Rgb(0, 255, 255),
    hazard: Color::Black,
    wall: Color::Rgb(25, 25, 50),
};

/// Magenta board with a green snake.
pub const PALETTE_MAGENTA: Palette = Palette {
    backdrop: Color::Rgb(80, 20, 80),
    cell_even: Color::Rgb(150, 50, 150),
    cell_odd: Color::Rgb(170, 70, 170),
    snake_head: Color::Rgb(50, 200, 50),
    snake_body: Color::Rgb(100, 255, 100),
    apple: Color::Rgb(255, 165, 0),
    bonus: Color::Rgb(255, 105, 180),
    hazard: Color::Black,
    wall: Color::Rgb(40, 10, 40),
};

/// Palettes in level order.
pub const PALETTES: &[Palette] = &[PALETTE_MEADOW, PALETTE_DUSK, PALETTE_MAGENTA];

/// Returns the palette for a 1-based level number. Levels past the end of the
/// table cycle back through it.
#[must_use]
pub fn palette_for_level(level: usize) -> &'static Palette {
    let index = level.saturating_sub(1) % PALETTES.len();
    &PALETTES[index]
}

/// Returns the checkerboard colour of the board cell at `(x, y)`.
#[must_use]
pub fn board_color(palette: &Palette, x: i32, y: i32) -> Color {
    if (x + y).rem_euclid(2) == 0 {
        palette.cell_even
    } else {
        palette.cell_odd
    }
}

#[cfg(test)]
mod tests {
    use super::{PALETTE_DUSK, PALETTE_MEADOW, board_color, palette_for_level};

    #[test]
    fn levels_map_to_palettes_and_wrap() {
        assert_eq!(palette_for_level(1), &PALETTE_MEADOW);
        assert_eq!(palette_for_level(2), &PALETTE_DUSK);
        assert_eq!(palette_for_level(4), &PALETTE_MEADOW);
        assert_eq!(palette_for_level(0), &PALETTE_MEADOW);
    }

    #[test]
    fn board_alternates_like_a_checkerboard() {
        let palette = palette_for_level(1);

        assert_eq!(board_color(palette, 0, 0), palette.cell_even);
        assert_eq!(board_color(palette, 1, 0), palette.cell_odd);
        assert_eq!(board_color(palette, 1, 1), palette.cell_even);
    }
}
