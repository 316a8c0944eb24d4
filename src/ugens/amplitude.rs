//! Amplitude - asymmetric envelope follower
//!
//! Tracks the magnitude of the input with separate attack and release time
//! constants. A rising input is pulled toward the tracker with the attack
//! coefficient, a falling one with the release coefficient. Either time is
//! the interval over which the tracker decays to 10 percent of a step.
//!
//! Inputs: `[input, attack_time, release_time]`. Times are read once per
//! block; their coefficients are recomputed only when the value changes.
//! When `output` holds a single sample, the whole input block is consumed
//! and only the final tracker value is written.

use crate::signal::Signal;
use crate::ugen::{ProcessContext, Ugen};

/// ln(0.1), the decay target of the time constants.
const LOG_001: f64 = -2.302_585_092_994_046;

fn decay_coef(time: f32, sample_rate: f32) -> f32 {
    if time <= 0.0 {
        0.0
    } else {
        (LOG_001 / (time as f64 * sample_rate as f64)).exp() as f32
    }
}

pub struct Amplitude {
    value: f32,
    clamp_time: f32,
    relax_time: f32,
    clamp_coef: f32,
    relax_coef: f32,
}

impl Amplitude {
    pub fn new(attack_time: f32, release_time: f32, ctx: &ProcessContext) -> Self {
        Self {
            value: 0.0,
            clamp_time: attack_time,
            relax_time: release_time,
            clamp_coef: decay_coef(attack_time, ctx.sample_rate),
            relax_coef: decay_coef(release_time, ctx.sample_rate),
        }
    }

    fn refresh_coefs(&mut self, attack_time: f32, release_time: f32, sample_rate: f32) {
        if attack_time != self.clamp_time {
            self.clamp_time = attack_time;
            self.clamp_coef = decay_coef(attack_time, sample_rate);
        }
        if release_time != self.relax_time {
            self.relax_time = release_time;
            self.relax_coef = decay_coef(release_time, sample_rate);
        }
    }

    fn track(&mut self, sample: f32) -> f32 {
        let mut val = sample.abs();
        if val < self.value {
            val += (self.value - val) * self.relax_coef;
        } else {
            val += (self.value - val) * self.clamp_coef;
        }
        self.value = val;
        val
    }
}

impl Ugen for Amplitude {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 3, "Amplitude takes 3 inputs");

        self.refresh_coefs(inputs[1].first(), inputs[2].first(), ctx.sample_rate);

        if output.len() == 1 {
            // control-rate collapse: consume the full input block, emit the
            // tracker state at its end
            let mut last = self.value;
            for i in 0..ctx.block_size {
                last = self.track(inputs[0].at(i));
            }
            output[0] = last;
        } else {
            for (i, out) in output.iter_mut().enumerate() {
                *out = self.track(inputs[0].at(i));
            }
        }
    }

    fn name(&self) -> &str {
        "Amplitude"
    }
}
