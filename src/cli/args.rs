//! Command-line argument parsing.
//!
//! Hand-rolled: the binary has three flags and no subcommands.

/// Pages fetched by `--print` when no count is given.
pub const DEFAULT_PRINT_PAGES: u32 = 1;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Fetch `pages` pages and print them to stdout
    Print { pages: u32 },
    /// Run the TUI application (default)
    RunTui,
}

/// Parse command-line arguments, program name first.
///
/// Unknown arguments are ignored. A `--print` count that is missing or
/// not a positive number falls back to [`DEFAULT_PRINT_PAGES`].
///
/// # Examples
///
/// ```
/// use hotnews::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["hotnews".to_string(), "--print".to_string(), "3".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Print { pages: 3 });
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--print" | "-p" => {
                let pages = args
                    .peek()
                    .and_then(|next| next.parse::<u32>().ok())
                    .filter(|n| *n > 0);
                if pages.is_some() {
                    args.next();
                }
                return CliCommand::Print {
                    pages: pages.unwrap_or(DEFAULT_PRINT_PAGES),
                };
            }
            _ => {}
        }
    }
    CliCommand::RunTui
}
