//! UI rendering for hotnews.
//!
//! ```text
//! ┌ Hot news │ Daily digest ┐   <- tabs
//! │ list or digest          │   <- body
//! └ keybind hints / notice  ┘   <- status line
//! ```
//!
//! The busy overlay is drawn last so it sits on top of either tab.

mod busy;
mod digest;
pub mod feed;
mod helpers;
mod theme;

pub use feed::{list_rows, FeedView};
pub use helpers::{centered_rect, spinner_frame, truncate_to_width, SPINNER_FRAMES};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Tab};
use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR};

/// Render the whole screen.
///
/// Takes `&mut App` to record the list height the layout left room for.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_tabs(frame, chunks[0], app.tab);

    match app.tab {
        Tab::HotNews => {
            let rows = list_rows(chunks[1], &FeedView::from_app(app));
            app.set_viewport_rows(rows);
            feed::render(frame, chunks[1], &FeedView::from_app(app));
        }
        Tab::Digest => digest::render(frame, chunks[1], &app.digest),
    }

    render_status(frame, chunks[2], app);

    if app.busy.is_visible() {
        busy::render(frame, frame.area(), app.busy.message(), app.tick_count);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, current: Tab) {
    let titles = Tab::ALL.iter().map(|tab| tab.title()).collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(current.index())
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(COLOR_BORDER)));
    frame.render_widget(tabs, area);
}

fn keybind_hints(tab: Tab) -> &'static str {
    match tab {
        Tab::HotNews => "j/k move · enter open · r refresh · R retry · drag down to refresh · tab digest · q quit",
        Tab::Digest => "enter open · r reload · tab news · q quit",
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            truncate_to_width(notice, area.width as usize),
            Style::default().fg(COLOR_ERROR),
        )),
        None => Line::from(Span::styled(
            truncate_to_width(keybind_hints(app.tab), area.width as usize),
            Style::default().fg(COLOR_DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
