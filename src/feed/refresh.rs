//! Pull-to-refresh gesture state machine.
//!
//! [`transition`] is a pure function over `(phase, event)`; [`RefreshMachine`]
//! wraps it with the header offset and a transition counter. Neither touches
//! the network: a release in `Ready` yields [`RefreshEffect::DispatchRefresh`]
//! and the owner decides what to do with it.

use std::fmt;

/// Where the refresh header is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshPhase {
    #[default]
    Idle,
    Pulling,
    Ready,
    Refreshing,
    Finished,
}

impl RefreshPhase {
    /// Text shown in the header for this phase.
    pub fn label(self) -> Option<&'static str> {
        match self {
            RefreshPhase::Idle => None,
            RefreshPhase::Pulling => Some("Pull to refresh"),
            RefreshPhase::Ready => Some("Release to refresh"),
            RefreshPhase::Refreshing => Some("Refreshing..."),
            RefreshPhase::Finished => Some("Refresh complete"),
        }
    }
}

impl fmt::Display for RefreshPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefreshPhase::Idle => "idle",
            RefreshPhase::Pulling => "pulling",
            RefreshPhase::Ready => "ready",
            RefreshPhase::Refreshing => "refreshing",
            RefreshPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Input to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Current pull distance past the top edge.
    Drag(f32),
    /// Finger / button released.
    Release,
    /// The refresh fetch completed (successfully or not).
    RefreshSettled,
    /// The header finished animating to its target.
    AnimationFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Open,
    Closed,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEffect {
    AnimateHeader(HeaderTarget),
    DispatchRefresh,
}

/// Gesture geometry, in the same unit as drag distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshConfig {
    pub header_height: f32,
    pub threshold: f32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            header_height: 3.0,
            threshold: 3.0,
        }
    }
}

impl RefreshConfig {
    pub fn new(header_height: f32, threshold: f32) -> Self {
        Self {
            header_height,
            threshold,
        }
    }

    /// Largest accepted drag distance.
    pub fn max_drag(&self) -> f32 {
        self.header_height * 1.5
    }

    /// Clamp into `[0, max_drag]`; NaN counts as no drag.
    pub fn clamp_drag(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return 0.0;
        }
        distance.clamp(0.0, self.max_drag().max(0.0))
    }
}

/// Result of one pure transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: RefreshPhase,
    pub effects: Vec<RefreshEffect>,
}

impl Step {
    fn stay(phase: RefreshPhase) -> Self {
        Self {
            phase,
            effects: Vec::new(),
        }
    }

    fn to(phase: RefreshPhase, effects: Vec<RefreshEffect>) -> Self {
        Self { phase, effects }
    }
}

/// Pure transition function.
pub fn transition(phase: RefreshPhase, event: GestureEvent, config: &RefreshConfig) -> Step {
    use RefreshPhase::*;

    match (phase, event) {
        (Refreshing, GestureEvent::Drag(_)) => Step::stay(Refreshing),
        (_, GestureEvent::Drag(distance)) => {
            let distance = config.clamp_drag(distance);
            let next = if distance <= 0.0 {
                Idle
            } else if distance < config.threshold {
                Pulling
            } else {
                Ready
            };
            Step::stay(next)
        }

        (Ready, GestureEvent::Release) => Step::to(
            Refreshing,
            vec![
                RefreshEffect::AnimateHeader(HeaderTarget::Open),
                RefreshEffect::DispatchRefresh,
            ],
        ),
        (Refreshing, GestureEvent::Release) => Step::stay(Refreshing),
        (_, GestureEvent::Release) => Step::to(
            Idle,
            vec![RefreshEffect::AnimateHeader(HeaderTarget::Closed)],
        ),

        (Refreshing, GestureEvent::RefreshSettled) => Step::to(
            Finished,
            vec![RefreshEffect::AnimateHeader(HeaderTarget::Closed)],
        ),
        (other, GestureEvent::RefreshSettled) => Step::stay(other),

        (Finished, GestureEvent::AnimationFinished) => Step::stay(Idle),
        (other, GestureEvent::AnimationFinished) => Step::stay(other),
    }
}

/// A phase change reported by [`RefreshMachine::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: RefreshPhase,
    pub to: RefreshPhase,
    pub effects: Vec<RefreshEffect>,
}

impl Transition {
    pub fn dispatches_refresh(&self) -> bool {
        self.effects.contains(&RefreshEffect::DispatchRefresh)
    }
}

/// Stateful wrapper around [`transition`].
#[derive(Debug, Clone)]
pub struct RefreshMachine {
    config: RefreshConfig,
    phase: RefreshPhase,
    offset: f32,
    transitions: u64,
}

impl RefreshMachine {
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            config,
            phase: RefreshPhase::Idle,
            offset: 0.0,
            transitions: 0,
        }
    }

    pub fn phase(&self) -> RefreshPhase {
        self.phase
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Header offset implied by the last drag, or the full header height
    /// while refreshing.
    pub fn offset(&self) -> f32 {
        match self.phase {
            RefreshPhase::Refreshing => self.config.header_height,
            _ => self.offset,
        }
    }

    /// Number of phase changes so far.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == RefreshPhase::Refreshing
    }

    /// Feed an event. Returns `Some` only when the phase changed.
    pub fn handle(&mut self, event: GestureEvent) -> Option<Transition> {
        match event {
            GestureEvent::Drag(distance) if self.phase != RefreshPhase::Refreshing => {
                self.offset = self.config.clamp_drag(distance);
            }
            GestureEvent::Release | GestureEvent::AnimationFinished => {
                if self.phase != RefreshPhase::Refreshing {
                    self.offset = 0.0;
                }
            }
            _ => {}
        }

        let step = transition(self.phase, event, &self.config);
        if step.phase == self.phase {
            return None;
        }

        let from = self.phase;
        self.phase = step.phase;
        self.transitions += 1;
        tracing::debug!(%from, to = %step.phase, ?event, "refresh phase changed");

        Some(Transition {
            from,
            to: step.phase,
            effects: step.effects,
        })
    }
}

impl Default for RefreshMachine {
    fn default() -> Self {
        Self::new(RefreshConfig::default())
    }
}
