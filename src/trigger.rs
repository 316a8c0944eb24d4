//! Trigger edge detection
//!
//! A trigger fires on a transition from non-positive to positive. At audio
//! rate the detector also computes the sub-sample fraction of the crossing,
//! so retriggered ramps can start at the mathematically correct position
//! between two samples instead of snapping to a sample boundary.

/// Edge detector over a single control signal.
///
/// Holds the previous input value across blocks.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    prev: f32,
}

impl EdgeDetector {
    /// The initial previous value is the input's value at construction, so a
    /// signal that is already positive when the voice starts does not fire.
    pub fn new(initial: f32) -> Self {
        Self { prev: initial }
    }

    /// Audio-rate step: returns the sub-sample crossing fraction on an edge.
    ///
    /// The fraction is the time elapsed, in samples, between the zero
    /// crossing and the current sample: `cur / (cur - prev)`. It is 1.0 when
    /// the crossing happened exactly at the previous sample and approaches
    /// 0.0 as it nears the current one. `prev = -0.5, cur = 0.5` gives 0.5.
    #[inline]
    pub fn step(&mut self, cur: f32) -> Option<f32> {
        let fired = self.prev <= 0.0 && cur > 0.0;
        let frac = if fired {
            Some(cur / (cur - self.prev))
        } else {
            None
        };
        self.prev = cur;
        frac
    }

    /// Block-rate step: no sub-sample interpolation, just the edge.
    #[inline]
    pub fn step_block(&mut self, cur: f32) -> bool {
        let fired = self.prev <= 0.0 && cur > 0.0;
        self.prev = cur;
        fired
    }
}
