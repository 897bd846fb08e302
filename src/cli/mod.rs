//! CLI module for hotnews.
//!
//! The CLI dispatcher is called early in `main()` to handle command-line
//! flags before initializing the TUI:
//!
//! ```ignore
//! use hotnews::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command, &config) {
//!     return result;
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod print;

pub use args::{parse_args, CliCommand};
pub use print::print_pages;

use std::sync::Arc;

use color_eyre::Result;

use crate::adapters::ReqwestHttpClient;
use crate::config::FeedConfig;
use crate::feed::HotNewsSource;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub fn help_text() -> String {
    format!(
        "hotnews {VERSION}\n\
         Terminal reader for the hot news feed.\n\
         \n\
         USAGE:\n    hotnews [OPTIONS]\n\
         \n\
         OPTIONS:\n\
         \x20   -p, --print [PAGES]  Print PAGES pages (default 1) and exit\n\
         \x20   -V, --version        Print version and exit\n\
         \x20   -h, --help           Print this help and exit\n\
         \n\
         ENVIRONMENT:\n\
         \x20   HOTNEWS_API_KEY, HOTNEWS_ENDPOINT, HOTNEWS_DIGEST_ENDPOINT,\n\
         \x20   HOTNEWS_PAGE_SIZE, HOTNEWS_TIMEOUT_SECS, HOTNEWS_LOG\n"
    )
}

/// Run a CLI command if applicable.
///
/// Returns `None` for [`CliCommand::RunTui`]; the caller goes on to start
/// the terminal UI.
pub fn run_cli_command(command: CliCommand, config: &FeedConfig) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("hotnews {}", VERSION);
            Some(Ok(()))
        }
        CliCommand::Help => {
            print!("{}", help_text());
            Some(Ok(()))
        }
        CliCommand::Print { pages } => Some(run_print(pages, config)),
        CliCommand::RunTui => None,
    }
}

fn run_print(pages: u32, config: &FeedConfig) -> Result<()> {
    config.validate()?;
    let client = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    let source = Arc::new(HotNewsSource::new(client, config));
    let runtime = tokio::runtime::Runtime::new()?;
    let mut stdout = std::io::stdout().lock();
    runtime.block_on(print_pages(source, pages, &mut stdout))
}
