//! Tick-driven easing of the refresh header offset.

use super::refresh::HeaderTarget;

/// Fraction of the remaining distance covered per tick.
const EASE_FACTOR: f32 = 0.35;
/// Below this distance the offset snaps to the target.
const SNAP_DISTANCE: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderAnimator {
    header_height: f32,
    offset: f32,
    target: Option<f32>,
}

impl HeaderAnimator {
    pub fn new(header_height: f32) -> Self {
        Self {
            header_height,
            offset: 0.0,
            target: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Follow the finger directly; cancels any running animation.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.max(0.0);
        self.target = None;
    }

    pub fn animate_to(&mut self, target: HeaderTarget) {
        let value = match target {
            HeaderTarget::Open => self.header_height,
            HeaderTarget::Closed => 0.0,
        };
        self.target = Some(value);
    }

    /// Advance one frame. Returns true on the tick the offset arrives.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let remaining = target - self.offset;
        if remaining.abs() <= SNAP_DISTANCE {
            self.offset = target;
            self.target = None;
            return true;
        }

        self.offset += remaining * EASE_FACTOR;
        false
    }

    /// Whole rows to reserve for the header.
    pub fn rows(&self) -> u16 {
        self.offset.round().clamp(0.0, u16::MAX as f32) as u16
    }
}
