//! Busy overlay: a small centered box with a spinner and the message.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::helpers::{centered_rect, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIALOG_BG};

/// Draw the overlay on top of whatever is already in `area`.
pub fn render(frame: &mut Frame, area: Rect, message: &str, tick: u64) {
    let text = format!("{} {}", spinner_frame(tick), message);
    // border + one column of padding on each side
    let width = (text.width() as u16).saturating_add(4).max(16);
    let overlay = centered_rect(width, 3, area);

    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(COLOR_ACCENT).bg(COLOR_DIALOG_BG))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER)),
            ),
        overlay,
    );
}
