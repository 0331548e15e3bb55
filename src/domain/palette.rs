/// Colour constants (RGB565) and the fixed display tables.

pub const BLUE: u16 = 0x001F;
pub const RED: u16 = 0xF800;
pub const GREEN: u16 = 0x07E0;
pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const GRAY: u16 = 0x8410;
pub const YELLOW: u16 = 0xFFE0;
pub const MAGENTA: u16 = 0xF81F;
pub const PINK: u16 = 0xF818;
pub const CYAN: u16 = 0x07FF;

/// Player glyph colours, stepped once per glyph draw.
pub const PLAYER_COLORS: [u16; 8] = [BLUE, YELLOW, RED, MAGENTA, GRAY, PINK, CYAN, GREEN];

pub const WELCOME_BG: u16 = GRAY;
pub const MAZE_BG: u16 = BLACK;
pub const WALL_VISIBLE: u16 = WHITE;
pub const WALL_HIDDEN: u16 = BLACK;
pub const DESTINATION: u16 = YELLOW;
pub const WIN_BG: u16 = GREEN;
pub const LOSE_BG: u16 = RED;

// ── Seven-segment sentinels ──

pub const DISPLAY_WELCOME: i32 = 88;
pub const DISPLAY_WIN: i32 = 11;
pub const DISPLAY_LOSE: i32 = 0;
/// Shown right after (re)initialisation.
pub const DISPLAY_IDLE: i32 = 0;

/// Expand RGB565 into 8-bit channels.
pub fn rgb565_to_rgb(c: u16) -> (u8, u8, u8) {
    let r = ((c >> 11) & 0x1F) as u8;
    let g = ((c >> 5) & 0x3F) as u8;
    let b = (c & 0x1F) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}
