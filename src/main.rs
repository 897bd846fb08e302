use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use hotnews::adapters::ReqwestHttpClient;
use hotnews::app::{App, AppMessage};
use hotnews::cli::{parse_args, run_cli_command};
use hotnews::config::FeedConfig;
use hotnews::logging;
use hotnews::navigation::BrowserNavigator;
use hotnews::terminal::{setup_panic_hook, TerminalManager};
use hotnews::traits::HttpClient;
use hotnews::ui;

/// Frame interval for animations (header easing, spinner).
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    // No log file is not a reason to refuse to start.
    let log_file = logging::init().ok();

    let config = FeedConfig::from_env();
    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(command, &config) {
        return result;
    }

    config.validate()?;
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_tui(config))?;

    if let Some(path) = log_file {
        tracing::info!(path = %path.display(), "exiting");
    }
    Ok(())
}

async fn run_tui(config: FeedConfig) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)?);
    let mut app = App::new(config, http, Box::new(BrowserNavigator));

    let mut term = TerminalManager::new()?;
    app.start();
    let result = run_app(term.terminal(), &mut app).await;
    term.restore();
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal event stream error");
                    }
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
