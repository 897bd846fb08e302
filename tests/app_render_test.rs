//! Full-screen rendering of [`App`] on a test backend.

mod common;

use std::sync::Arc;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hotnews::app::App;
use hotnews::config::FeedConfig;
use hotnews::error::FeedError;
use hotnews::navigation::RecordingNavigator;
use hotnews::traits::HttpClient;
use hotnews::ui;
use ratatui::{backend::TestBackend, Terminal};

fn app_with(source: &MockPageSource) -> App {
    let config = FeedConfig::default();
    let http: Arc<dyn HttpClient> = Arc::new(MockHttpClient::new());
    let digest = App::digest_client_without_retries(http, &config);
    App::with_parts(
        config,
        Arc::new(source.clone()),
        digest,
        Box::new(RecordingNavigator::new()),
    )
}

/// Deliver messages until no fetch is outstanding.
async fn settle(app: &mut App) {
    let mut rx = app.message_rx.take().expect("receiver present");
    while app.feed.is_in_flight() {
        let msg = rx.recv().await.expect("fetch reports back");
        app.handle_message(msg);
    }
    app.message_rx = Some(rx);
    app.tick();
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) -> String {
    terminal.draw(|f| ui::render(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn test_first_page_renders_with_tabs_and_hints() {
    let source = MockPageSource::new();
    source.push_page(news_batch("story", 10));
    let mut app = app_with(&source);
    let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();

    // first draw records the viewport before any page arrives
    draw(&mut terminal, &mut app);
    app.start();
    settle(&mut app).await;
    let screen = draw(&mut terminal, &mut app);

    assert!(screen.contains("Hot news"));
    assert!(screen.contains("Daily digest"));
    assert!(screen.contains("1. story headline 0"));
    assert!(screen.contains("q quit"));
    assert!(!screen.contains("Loading..."));
    assert!(app.viewport_rows > 0);
}

#[tokio::test]
async fn test_failed_first_load_shows_retry_panel() {
    let source = MockPageSource::new();
    source.push_error(FeedError::application("invalid key"));
    let mut app = app_with(&source);
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();

    draw(&mut terminal, &mut app);
    app.start();
    settle(&mut app).await;
    let screen = draw(&mut terminal, &mut app);

    assert!(screen.contains("Could not load news"));
    assert!(screen.contains("invalid key"));
    assert!(screen.contains("press R to retry"));
}

#[tokio::test]
async fn test_end_of_list_footer_after_scrolling() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 4)).push_page(Vec::new());
    let mut app = app_with(&source);
    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

    draw(&mut terminal, &mut app);
    app.start();
    settle(&mut app).await;
    let screen = draw(&mut terminal, &mut app);

    // four items leave the viewport unfilled, so the empty page 2 follows
    assert_eq!(source.call_count(), 2);
    assert!(screen.contains("No more news"));
}

#[tokio::test]
async fn test_busy_overlay_while_loading() {
    let source = MockPageSource::new();
    source.push_page(news_batch("a", 10));
    let mut app = app_with(&source);
    let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

    app.start();
    app.tick();
    assert!(app.busy.is_visible());
    let screen = draw(&mut terminal, &mut app);
    assert!(screen.contains("Loading..."));

    settle(&mut app).await;
    assert!(!app.busy.is_visible());
}

#[tokio::test]
async fn test_digest_tab_renders_failure() {
    let source = MockPageSource::new();
    let mut app = app_with(&source);
    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();

    app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    let msg = app
        .message_rx
        .as_mut()
        .unwrap()
        .recv()
        .await
        .unwrap();
    app.handle_message(msg);
    let screen = draw(&mut terminal, &mut app);

    assert!(screen.contains("r reload"));
    assert!(!screen.contains("1. "));
}
