//! Process-wide busy indicator.
//!
//! Producers hold a cloneable [`BusyHandle`] and send [`BusyCommand`]s over a
//! channel; a single [`BusyIndicator`] owned by the UI consumes them.
//!
//! There is no queue and no reference counting: `Show` overwrites the
//! current message and `Hide` clears visibility regardless of who asked for
//! `Show`. Two screens fetching at once can therefore dismiss each other's
//! overlay; only one feed fetch is ever active at a time here.

use tokio::sync::mpsc;

/// Command sent to the indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusyCommand {
    Show { message: String },
    Hide,
}

/// Sending side, injected into anything that needs to show the overlay.
#[derive(Debug, Clone)]
pub struct BusyHandle {
    tx: mpsc::UnboundedSender<BusyCommand>,
}

impl BusyHandle {
    /// Show the overlay with `message`.
    pub fn show(&self, message: impl Into<String>) {
        self.send(BusyCommand::Show {
            message: message.into(),
        });
    }

    /// Hide the overlay.
    pub fn hide(&self) {
        self.send(BusyCommand::Hide);
    }

    fn send(&self, cmd: BusyCommand) {
        // Indicator gone means the UI is shutting down.
        if self.tx.send(cmd).is_err() {
            tracing::trace!("busy indicator closed; command dropped");
        }
    }
}

/// Receiving side: the single overlay state.
#[derive(Debug)]
pub struct BusyIndicator {
    rx: mpsc::UnboundedReceiver<BusyCommand>,
    visible: bool,
    message: String,
}

/// Create a connected handle/indicator pair.
pub fn busy_channel() -> (BusyHandle, BusyIndicator) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        BusyHandle { tx },
        BusyIndicator {
            rx,
            visible: false,
            message: String::new(),
        },
    )
}

impl BusyIndicator {
    /// Apply every pending command in send order.
    ///
    /// Returns true if anything was applied.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(cmd) = self.rx.try_recv() {
            self.apply(cmd);
            changed = true;
        }
        changed
    }

    /// Apply a single command.
    pub fn apply(&mut self, cmd: BusyCommand) {
        match cmd {
            BusyCommand::Show { message } => {
                self.visible = true;
                self.message = message;
            }
            BusyCommand::Hide => {
                self.visible = false;
                self.message.clear();
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
