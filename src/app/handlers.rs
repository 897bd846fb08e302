//! Input, message and tick handling for [`App`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::{App, AppMessage, DigestState, Tab};
use crate::feed::{item_key, FetchMode};

impl App {
    /// Apply the result of async work.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::FeedSettled(settlement) => {
                let outcome = settlement.outcome();
                let mode = outcome.mode();
                let changed = outcome.changes_list();
                let previous = self.selected_key();

                self.feed.on_settled(settlement);

                // A refresh that brings back the same row under the cursor
                // keeps the reader's place.
                if mode == FetchMode::Refresh && changed && self.selected_key() != previous {
                    self.selected = 0;
                    self.scroll_offset = 0;
                }
                let len = self.feed.items().len();
                if self.selected >= len {
                    self.selected = len.saturating_sub(1);
                }

                // A short page may not fill the screen; keep filling until
                // it does. Failures and no-op answers wait for the user.
                if changed {
                    let pending = self.feed.on_scroll(self.scroll_metrics());
                    self.spawn_fetch(pending);
                }
            }
            AppMessage::DigestLoaded(result) => {
                self.digest = match result {
                    Ok(digest) => DigestState::Loaded(digest),
                    Err(err) => DigestState::Failed(err.user_message()),
                };
            }
        }
        self.mark_dirty();
    }

    fn selected_key(&self) -> Option<String> {
        self.feed
            .items()
            .get(self.selected)
            .map(|item| item_key(item, self.selected))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.toggle();
                if self.tab == Tab::Digest && self.digest == DigestState::NotLoaded {
                    self.load_digest();
                }
                self.mark_dirty();
            }
            _ => match self.tab {
                Tab::HotNews => self.handle_feed_key(key),
                Tab::Digest => self.handle_digest_key(key),
            },
        }
    }

    fn handle_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::PageDown => {
                let page = (self.viewport_rows as isize / super::ITEM_ROWS as isize).max(1);
                self.scroll_items(page);
            }
            KeyCode::PageUp => {
                let page = (self.viewport_rows as isize / super::ITEM_ROWS as isize).max(1);
                self.scroll_items(-page);
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') => {
                let pending = self.feed.request_refresh();
                self.spawn_fetch(pending);
            }
            KeyCode::Char('R') => {
                let pending = self.feed.retry();
                self.spawn_fetch(pending);
            }
            _ => {}
        }
    }

    fn handle_digest_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_digest(),
            KeyCode::Enter => self.open_digest(),
            _ => {}
        }
    }

    /// Left-drag from the top pulls the refresh header; the wheel scrolls.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.begin_drag(mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.continue_drag(mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(),
            MouseEventKind::ScrollDown if self.tab == Tab::HotNews => self.scroll_items(1),
            MouseEventKind::ScrollUp if self.tab == Tab::HotNews => self.scroll_items(-1),
            _ => {}
        }
    }

    /// One frame of the 16 ms loop: busy commands and header animation.
    pub fn tick(&mut self) {
        if self.busy.drain() {
            self.mark_dirty();
        }
        if self.feed.tick() {
            self.mark_dirty();
        }
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.busy.is_visible() || self.feed.is_in_flight() {
            // spinner
            self.mark_dirty();
        }
    }
}
