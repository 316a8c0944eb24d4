//! LoopPhasor - looping playback-position generator
//!
//! A position ramp intended to drive sample playback the way hardware
//! samplers do: the full range `[start, end]` plays once, and a loop region
//! `[loop_start, loop_end]` inside it repeats for as long as the position
//! stays within it. The loop region is sampled, not latched: whenever the
//! unbounded progression re-enters the region, looping resumes by itself.
//!
//! A second trigger flips the finish latch. While the latch is set, the
//! position is clamped into `[start, end]` instead of wrapped, so the ramp
//! runs out to the end and parks there. The latch is edge-toggled and sticky;
//! an even number of toggles restores looping exactly.
//!
//! Inputs: `[start_trig, finish_trig, rate, start, end, loop_start, loop_end]`.

use crate::phase::wrap;
use crate::signal::{Rate, Signal};
use crate::trigger::EdgeDetector;
use crate::ugen::{ProcessContext, Ugen};

pub struct LoopPhasor {
    level: f64,
    start_edge: EdgeDetector,
    finish_edge: EdgeDetector,
    finish_latched: bool,
    start_trig_rate: Rate,
    finish_trig_rate: Rate,
    rate_rate: Rate,
}

impl LoopPhasor {
    /// # Arguments
    /// * `start_trig`, `finish_trig` - Initial trigger input values
    /// * `start` - Initial position; also the lower bound of the full range
    pub fn new(
        start_trig: f32,
        finish_trig: f32,
        start: f32,
        start_trig_rate: Rate,
        finish_trig_rate: Rate,
        rate_rate: Rate,
    ) -> Self {
        Self {
            level: start as f64,
            start_edge: EdgeDetector::new(start_trig),
            finish_edge: EdgeDetector::new(finish_trig),
            finish_latched: false,
            start_trig_rate,
            finish_trig_rate,
            rate_rate,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn is_finishing(&self) -> bool {
        self.finish_latched
    }

    #[inline]
    fn bound(&self, level: f64, start: f64, end: f64, loop_start: f64, loop_end: f64) -> f64 {
        if !self.finish_latched {
            if level >= loop_start && level <= loop_end {
                wrap(level, loop_start, loop_end)
            } else {
                wrap(level, start, end)
            }
        } else {
            level.max(start).min(end)
        }
    }
}

impl Ugen for LoopPhasor {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 7, "LoopPhasor takes 7 inputs");
        debug_assert_eq!(inputs[0].rate(), self.start_trig_rate);
        debug_assert_eq!(inputs[1].rate(), self.finish_trig_rate);
        debug_assert_eq!(inputs[2].rate(), self.rate_rate);

        let start_trig = &inputs[0];
        let finish_trig = &inputs[1];
        let rate_in = &inputs[2];
        let start = inputs[3].first() as f64;
        let end = inputs[4].first() as f64;
        let loop_start = inputs[5].first() as f64;
        let loop_end = inputs[6].first() as f64;

        let mut level = self.level;

        // Block-rate triggers are tested once, before the loop, and reset
        // without sub-sample interpolation.
        if self.start_trig_rate != Rate::Audio && self.start_edge.step_block(start_trig.first()) {
            level = start;
        }
        if self.finish_trig_rate != Rate::Audio && self.finish_edge.step_block(finish_trig.first())
        {
            self.finish_latched = !self.finish_latched;
        }

        for (i, out) in output.iter_mut().enumerate() {
            let rate = match self.rate_rate {
                Rate::Audio => rate_in.at(i) as f64,
                _ => rate_in.first() as f64,
            };

            if self.start_trig_rate == Rate::Audio {
                if let Some(frac) = self.start_edge.step(start_trig.at(i)) {
                    level = start + frac as f64 * rate;
                }
            }
            if self.finish_trig_rate == Rate::Audio && self.finish_edge.step_block(finish_trig.at(i))
            {
                self.finish_latched = !self.finish_latched;
            }

            level = self.bound(level, start, end, loop_start, loop_end);
            *out = level as f32;
            level += rate;
        }

        self.level = level;
    }

    fn name(&self) -> &str {
        "LoopPhasor"
    }
}
