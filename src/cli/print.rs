//! `--print`: fetch a few pages without the TUI and write them as text.

use std::io::Write;
use std::sync::Arc;

use color_eyre::Result;

use crate::busy::busy_channel;
use crate::feed::{relative_time_label, FetchGate, FetchMode, PageSource, PaginationState};

/// Fetch up to `pages` pages from `source` and print them to `out`.
///
/// Stops early at the end of the feed, or when a page comes back without
/// a result section. A fetch error is printed in place of the remaining
/// pages and is not treated as a failure of the command.
pub async fn print_pages<W: Write>(
    source: Arc<dyn PageSource>,
    pages: u32,
    out: &mut W,
) -> Result<()> {
    // No overlay to drive here; the indicator just soaks up commands.
    let (busy, _indicator) = busy_channel();
    let gate = FetchGate::new(source, busy);
    let mut state = PaginationState::new();

    for page in 0..pages {
        let mode = if page == 0 {
            FetchMode::Refresh
        } else {
            FetchMode::Append
        };
        if mode == FetchMode::Append && !state.can_append() {
            break;
        }
        let Some(outcome) = gate.fetch(mode, state.cursor()).await else {
            break;
        };
        let changed = outcome.changes_list();
        state.apply(outcome);
        if !changed {
            break;
        }
    }

    write_items(&state, out)?;
    Ok(())
}

fn write_items<W: Write>(state: &PaginationState, out: &mut W) -> std::io::Result<()> {
    for (index, item) in state.items().iter().enumerate() {
        let source = if item.author.is_empty() {
            String::new()
        } else {
            format!("  [{}]", item.author)
        };
        writeln!(
            out,
            "{:>3}. {}{}  {}",
            index + 1,
            item.title,
            source,
            relative_time_label(&item.date, index)
        )?;
        if !item.url.is_empty() {
            writeln!(out, "     {}", item.url)?;
        }
    }

    if let Some(error) = state.last_error() {
        writeln!(out, "error: {}", error)?;
    } else if state.is_empty() {
        writeln!(out, "No news")?;
    } else if !state.has_more() {
        writeln!(out, "-- No more news --")?;
    }
    Ok(())
}
