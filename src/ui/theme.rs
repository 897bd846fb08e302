//! Color theme constants for the hotnews UI.

use ratatui::style::Color;

/// Borders and separators
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights: selected tab, selected row marker
pub const COLOR_ACCENT: Color = Color::LightYellow;

/// News titles
pub const COLOR_TITLE: Color = Color::White;

/// Rank numbers
pub const COLOR_RANK: Color = Color::LightRed;

/// Source and time labels, footer, hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Refresh header text
pub const COLOR_HEADER: Color = Color::Cyan;

/// Inline error banner and error panel
pub const COLOR_ERROR: Color = Color::Red;

/// Background of the selected row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 30, 45);

/// Background for the busy overlay box
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
