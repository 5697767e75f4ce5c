//! Linear glide between two offsets.
//!
//! The grid engine only computes the target offset of a focus jump. How the
//! view gets there is up to the renderer; the explorer tweens linearly and
//! feeds every intermediate offset through `update_viewport`, so cells along
//! the path load like they would during a drag.

use crate::grid::Offset;
use std::time::Duration;

/// An in-progress glide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    from: Offset,
    to: Offset,
    duration: Duration,
    elapsed: Duration,
}

impl Glide {
    /// Start a glide from `from` to `to`.
    pub fn new(from: Offset, to: Offset, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Destination offset.
    pub fn target(&self) -> Offset {
        self.to
    }

    /// Advance by `dt` and return the offset to show.
    pub fn advance(&mut self, dt: Duration) -> Offset {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.current()
    }

    /// Offset at the current progress.
    pub fn current(&self) -> Offset {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.progress())
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// True once the target has been reached.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
