//! Daily digest tab.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_TITLE};
use crate::app::DigestState;

pub fn render(frame: &mut Frame, area: Rect, state: &DigestState) {
    let lines = match state {
        DigestState::NotLoaded => vec![Line::from(Span::styled(
            "Press r to load today's digest",
            Style::default().fg(COLOR_DIM),
        ))],
        DigestState::Loading => vec![Line::from(Span::styled(
            "Loading today's digest...",
            Style::default().fg(COLOR_DIM),
        ))],
        DigestState::Loaded(digest) => vec![
            Line::from(Span::styled(
                "Today's news in one picture",
                Style::default().fg(COLOR_TITLE).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                digest.image_url.as_str(),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter opens it in the browser",
                Style::default().fg(COLOR_DIM),
            )),
        ],
        DigestState::Failed(message) => vec![
            Line::from(Span::styled(message.as_str(), Style::default().fg(COLOR_ERROR))),
            Line::from(""),
            Line::from(Span::styled("press r to retry", Style::default().fg(COLOR_DIM))),
        ],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Daily digest ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}
