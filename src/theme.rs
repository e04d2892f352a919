use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(12, 14, 22);
pub const BG_BAR: Color = Color::Rgb(16, 19, 30);
pub const BG_SURFACE: Color = Color::Rgb(21, 25, 38);
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 36, 58);

// Primary accent (playbooks indigo)
pub const ACCENT: Color = Color::Rgb(88, 123, 240);
pub const ACCENT_DIM: Color = Color::Rgb(58, 80, 170);

// Text
pub const TEXT: Color = Color::Rgb(220, 222, 230);
pub const TEXT_DIM: Color = Color::Rgb(130, 135, 155);
pub const TEXT_MUTED: Color = Color::Rgb(75, 80, 100);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
pub const MAGENTA: Color = Color::Rgb(232, 121, 249);
