use ratatui::style::Color;

// Slate base with an indigo accent.
pub const BG_PRIMARY: Color = Color::Rgb(11, 15, 25);
pub const BG_PANEL: Color = Color::Rgb(17, 24, 39);
pub const BG_SIDEBAR: Color = Color::Rgb(15, 20, 33);
pub const FG_PRIMARY: Color = Color::Rgb(226, 232, 240);
pub const FG_DIM: Color = Color::Rgb(100, 116, 139);

pub const BAR_BG: Color = Color::Rgb(30, 41, 59);
pub const BAR_TEXT: Color = Color::Rgb(241, 245, 249);
pub const BAR_HIGHLIGHT_BG: Color = Color::Rgb(79, 70, 229);

pub const MENU_BG: Color = Color::Rgb(30, 41, 59);
pub const MENU_BORDER: Color = Color::Rgb(148, 163, 184);

pub const BORDER_IDLE: Color = Color::Rgb(51, 65, 85);
pub const BORDER_FOCUS: Color = Color::Rgb(129, 140, 248);
pub const PANEL_HIGHLIGHT_BG: Color = Color::Rgb(165, 180, 252);
pub const ROW_SELECTED_BG: Color = Color::Rgb(30, 27, 75);

pub const USER_ROLE: Color = Color::Rgb(56, 189, 248);
pub const AGENT_ROLE: Color = Color::Rgb(52, 211, 153);
pub const STATUS_ON: Color = Color::Rgb(52, 211, 153);
pub const STATUS_OFF: Color = Color::Rgb(248, 113, 113);
