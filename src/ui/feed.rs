//! Hot news list: refresh header, item rows, footer and error display.
//!
//! ```text
//! ⠹ Refreshing...            <- header, height follows the pull
//!   1. Title of the first story
//!      Source · just now
//!   2. ...
//!     Pull up for more news  <- footer
//! ⚠ Network error ... (R)    <- error banner, only with items shown
//! ```

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::helpers::{centered_rect, spinner_frame, truncate_to_width};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_RANK,
    COLOR_SELECTED_BG, COLOR_TITLE,
};
use crate::app::{App, ITEM_ROWS};
use crate::feed::{relative_time_label, FooterState, RefreshPhase};
use crate::models::NewsItem;

const RETRY_HINT: &str = "press R to retry";

/// Everything the list renderer needs, borrowed from the app.
#[derive(Debug, Clone)]
pub struct FeedView<'a> {
    pub items: &'a [NewsItem],
    pub selected: usize,
    pub scroll_offset: usize,
    pub header_rows: u16,
    pub phase: RefreshPhase,
    pub footer: Option<FooterState>,
    pub last_error: Option<&'a str>,
    pub in_flight: bool,
    pub tick: u64,
}

impl<'a> FeedView<'a> {
    pub fn from_app(app: &'a App) -> Self {
        Self {
            items: app.feed.items(),
            selected: app.selected,
            scroll_offset: app.scroll_offset,
            header_rows: app.feed.header_rows(),
            phase: app.feed.phase(),
            footer: app.feed.footer(),
            last_error: app.feed.last_error(),
            in_flight: app.feed.is_in_flight(),
            tick: app.tick_count,
        }
    }

    fn shows_banner(&self) -> bool {
        self.last_error.is_some() && !self.items.is_empty()
    }
}

/// Rows left for item rows once header, footer and banner are placed.
pub fn list_rows(area: Rect, view: &FeedView) -> u16 {
    let header = view.header_rows.min(area.height);
    let footer = u16::from(view.footer.is_some());
    let banner = u16::from(view.shows_banner());
    area.height.saturating_sub(header + footer + banner)
}

pub fn render(frame: &mut Frame, area: Rect, view: &FeedView) {
    let header_height = view.header_rows.min(area.height);
    if header_height > 0 {
        let header_area = Rect::new(area.x, area.y, area.width, header_height);
        render_header(frame, header_area, view);
    }

    let body = Rect::new(
        area.x,
        area.y + header_height,
        area.width,
        area.height - header_height,
    );
    if body.height == 0 {
        return;
    }

    if view.items.is_empty() {
        render_empty(frame, body, view);
        return;
    }

    let rows = list_rows(area, view);
    let list_area = Rect::new(body.x, body.y, body.width, rows);
    render_items(frame, list_area, view);

    let mut y = body.y + rows;
    if let (true, Some(footer)) = (y < body.bottom(), view.footer) {
        let footer_area = Rect::new(body.x, y, body.width, 1);
        frame.render_widget(
            Paragraph::new(footer.label())
                .style(Style::default().fg(COLOR_DIM))
                .alignment(Alignment::Center),
            footer_area,
        );
        y += 1;
    }

    let banner = view.last_error.filter(|_| view.shows_banner());
    if let (true, Some(error)) = (y < body.bottom(), banner) {
        let banner_area = Rect::new(body.x, y, body.width, 1);
        let text = format!("⚠ {} ({})", error, RETRY_HINT);
        frame.render_widget(
            Paragraph::new(truncate_to_width(&text, body.width as usize))
                .style(Style::default().fg(COLOR_ERROR)),
            banner_area,
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &FeedView) {
    let Some(label) = view.phase.label() else {
        return;
    };
    let text = if view.phase == RefreshPhase::Refreshing {
        format!("{} {}", spinner_frame(view.tick), label)
    } else {
        label.to_string()
    };
    // label sits on the last row so it is revealed first while pulling
    let label_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(COLOR_HEADER))
            .alignment(Alignment::Center),
        label_area,
    );
}

fn render_items(frame: &mut Frame, area: Rect, view: &FeedView) {
    let first = view.scroll_offset / ITEM_ROWS;
    let visible = area.height as usize / ITEM_ROWS;
    let width = area.width as usize;

    for (slot, (index, item)) in view
        .items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let y = area.y + (slot * ITEM_ROWS) as u16;
        let row = Rect::new(area.x, y, area.width, ITEM_ROWS as u16);
        let selected = index == view.selected;

        let marker = if selected { "▌" } else { " " };
        let rank = format!("{:>3}. ", index + 1);
        let title_budget = width.saturating_sub(marker.width() + rank.width());
        let title = Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
            Span::styled(rank, Style::default().fg(COLOR_RANK)),
            Span::styled(
                truncate_to_width(&item.title, title_budget),
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
        ]);

        let time = relative_time_label(&item.date, index);
        let meta_text = if item.author.is_empty() {
            time
        } else {
            format!("{} · {}", item.author, time)
        };
        let meta = Line::from(vec![
            Span::raw("      "),
            Span::styled(
                truncate_to_width(&meta_text, width.saturating_sub(6)),
                Style::default().fg(COLOR_DIM),
            ),
        ]);

        let mut paragraph = Paragraph::new(vec![title, meta]);
        if selected {
            paragraph = paragraph.style(Style::default().bg(COLOR_SELECTED_BG));
        }
        frame.render_widget(paragraph, row);
    }
}

/// Empty list: an error panel with the retry hint, or a placeholder.
fn render_empty(frame: &mut Frame, area: Rect, view: &FeedView) {
    if let Some(error) = view.last_error {
        let panel = centered_rect(area.width.saturating_sub(4).min(60), 6, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ERROR))
            .title(" Could not load news ");
        let text = vec![
            Line::from(Span::styled(error, Style::default().fg(COLOR_ERROR))),
            Line::from(""),
            Line::from(Span::styled(RETRY_HINT, Style::default().fg(COLOR_DIM))),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            panel,
        );
        return;
    }

    let text = if view.in_flight {
        "Loading news..."
    } else {
        "No news yet. Pull down or press r to refresh"
    };
    let placeholder = centered_rect(area.width, 1, area);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(COLOR_BORDER))
            .alignment(Alignment::Center),
        placeholder,
    );
}
