//! Horizontal swipe detection over a start/end pointer pair.

/// Minimum horizontal travel, in pixels, for a gesture to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right; reveals the previous panel.
    Right,
    /// Finger moved left; reveals the next panel.
    Left,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    origin: Option<f64>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.origin.is_some()
    }

    /// Records the gesture origin. A start without a coordinate leaves no origin.
    pub fn begin(&mut self, x: Option<f64>) {
        self.origin = x;
    }

    /// Consumes the origin and classifies the travelled distance.
    pub fn finish(&mut self, x: Option<f64>) -> Option<SwipeDirection> {
        let start = self.origin.take()?;
        let dx = x? - start;
        if dx > self.threshold {
            Some(SwipeDirection::Right)
        } else if dx < -self.threshold {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }
}
