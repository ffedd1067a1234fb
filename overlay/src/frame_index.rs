//! Playback time → annotation frame index.

#[cfg(test)]
#[path = "frame_index_test.rs"]
mod frame_index_test;

/// Map a playback time to a frame index: `floor(t * frame_rate)` clamped to
/// `[0, frame_count - 1]`.
///
/// Negative and NaN times map to frame 0; times past the end hold the last
/// frame. Returns 0 when there are no frames.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn frame_for_time(t: f64, frame_rate: f64, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let last = frame_count - 1;
    let raw = (t * frame_rate).floor();
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    if raw >= last as f64 {
        return last;
    }
    raw as usize
}

/// Tracks the current frame and reports only real index changes.
#[derive(Debug, Clone)]
pub struct FrameIndex {
    frame_rate: f64,
    frame_count: usize,
    current: usize,
    last_time: f64,
}

impl FrameIndex {
    #[must_use]
    pub fn new(frame_rate: f64, frame_count: usize) -> Self {
        Self { frame_rate, frame_count, current: 0, last_time: 0.0 }
    }

    /// Feed a playback time. Returns `Some(index)` only when the frame changed.
    pub fn advance(&mut self, t: f64) -> Option<usize> {
        self.last_time = t;
        let next = frame_for_time(t, self.frame_rate, self.frame_count);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }

    /// The last computed frame index.
    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.current
    }

    /// The playback time last passed to [`advance`](Self::advance).
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}
