/// Handle for one scheduled animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

/// Host-driven replacement for `requestAnimationFrame`.
///
/// At most one frame is pending at a time: requesting again before the host delivers the frame
/// returns the already-pending id, so any number of mutations between frames collapse into one
/// redraw. The host calls [`AnimationFrames::take_due`] (usually via an engine's
/// `on_animation_frame`) to consume the pending frame.
#[derive(Debug, Default)]
pub struct AnimationFrames {
    next: u64,
    pending: Option<FrameRequestId>,
    delivered: u64,
}

impl AnimationFrames {
    /// New scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a frame, coalescing with an already pending one.
    pub fn request(&mut self) -> FrameRequestId {
        if let Some(id) = self.pending {
            return id;
        }
        self.next += 1;
        let id = FrameRequestId(self.next);
        self.pending = Some(id);
        id
    }

    /// Cancel the pending frame if its id matches. Returns `true` when something was cancelled.
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Cancel whatever is pending.
    pub fn cancel_all(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Return `true` when a frame is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending frame, if any.
    pub fn take_due(&mut self) -> Option<FrameRequestId> {
        let id = self.pending.take()?;
        self.delivered += 1;
        Some(id)
    }

    /// Number of frames delivered through [`AnimationFrames::take_due`].
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
