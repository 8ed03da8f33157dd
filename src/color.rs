use ratatui::style::Color;
use term_color_support::ColorSupport;

// Classic minesweeper digit palette (1=blue, 2=green, 3=red, ...) with a
// parallel 256-color table for terminals without truecolor.
const DIGIT_RGB: [(u8, u8, u8); 8] = [
    (0, 55, 218),   // 1
    (19, 161, 14),  // 2
    (197, 15, 31),  // 3
    (0, 0, 128),    // 4
    (128, 0, 0),    // 5
    (58, 150, 221), // 6
    (136, 23, 152), // 7
    (118, 118, 118), // 8
];
const DIGIT_256: [u8; 8] = [20, 28, 160, 18, 88, 38, 90, 243];
const DIGIT_BASIC: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::Red,
    Color::Cyan,
    Color::Magenta,
    Color::DarkGray,
];

/// Color for a revealed cell's adjacency digit (1-8), degraded to what
/// the current terminal actually supports.
pub fn digit_color(n: u8) -> Color {
    let i = (n.clamp(1, 8) - 1) as usize;
    let support = ColorSupport::stdout();
    if support.has_16m {
        let (r, g, b) = DIGIT_RGB[i];
        Color::Rgb(r, g, b)
    } else if support.has_256 {
        Color::Indexed(DIGIT_256[i])
    } else {
        DIGIT_BASIC[i]
    }
}
