//! Phasor - resettable position ramp
//!
//! Outputs a position that climbs by `rate` every sample and wraps between
//! `start` and `end`. A trigger edge resets the position to `reset_pos`; at
//! audio rate the reset lands at the sub-sample-accurate position
//! `reset_pos + frac * rate`, so retriggered ramps line up exactly with the
//! trigger crossing instead of the nearest sample boundary.
//!
//! Inputs: `[trig, rate, start, end, reset_pos]`.

use crate::phase::wrap;
use crate::signal::{Rate, Signal};
use crate::trigger::EdgeDetector;
use crate::ugen::{ProcessContext, Ugen};

pub struct Phasor {
    level: f64,
    edge: EdgeDetector,
    trig_rate: Rate,
    rate_rate: Rate,
}

impl Phasor {
    /// # Arguments
    /// * `trig` - Initial trigger input value (a signal already positive at
    ///   construction does not fire)
    /// * `start` - Initial position; also the lower wrap bound
    /// * `trig_rate`, `rate_rate` - Rate categories, fixed for the lifetime
    ///   of the unit
    pub fn new(trig: f32, start: f32, trig_rate: Rate, rate_rate: Rate) -> Self {
        Self {
            level: start as f64,
            edge: EdgeDetector::new(trig),
            trig_rate,
            rate_rate,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

impl Ugen for Phasor {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 5, "Phasor takes 5 inputs");
        debug_assert_eq!(inputs[0].rate(), self.trig_rate);
        debug_assert_eq!(inputs[1].rate(), self.rate_rate);

        let trig = &inputs[0];
        let rate_in = &inputs[1];
        let start = inputs[2].first() as f64;
        let end = inputs[3].first() as f64;
        let reset_pos = inputs[4].first() as f64;

        let mut level = self.level;

        if self.trig_rate == Rate::Audio {
            if let Signal::Audio(buf) = trig {
                debug_assert_eq!(buf.len(), output.len(), "trigger buffer length mismatch");
            }
            // Per-sample edge detection with sub-sample reset. The position
            // is emitted before it advances and wraps.
            for (i, out) in output.iter_mut().enumerate() {
                let rate = match self.rate_rate {
                    Rate::Audio => rate_in.at(i) as f64,
                    _ => rate_in.first() as f64,
                };
                if let Some(frac) = self.edge.step(trig.at(i)) {
                    level = reset_pos + frac as f64 * rate;
                }
                *out = level as f32;
                level += rate;
                level = wrap(level, start, end);
            }
        } else {
            // One edge test for the whole block, no interpolation.
            if self.edge.step_block(trig.first()) {
                level = reset_pos;
            }
            let rate = rate_in.first() as f64;
            for out in output.iter_mut() {
                level = wrap(level, start, end);
                *out = level as f32;
                level += rate;
            }
        }

        self.level = level;
    }

    fn name(&self) -> &str {
        "Phasor"
    }
}
