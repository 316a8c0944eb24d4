//! ImpulseJitter - impulses displaced within the current block
//!
//! Runs the same phase machine as [`crate::ugens::impulse::Impulse`], but
//! instead of writing each impulse at the sample where the wrap fired, it
//! draws a uniform random index from the window `[i - w, i + w]` clipped to
//! the block bounds, where `w = jitter_frac * block_size`. Every impulse is
//! still delivered inside its own block; for displacement past the block end
//! see [`crate::ugens::impulse_scatter::ImpulseScatter`].
//!
//! Inputs: `[freq, phase_offset, jitter_frac]`. The jitter fraction is read
//! once per block.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::phase::ImpulseCore;
use crate::signal::{Rate, Signal};
use crate::ugen::{ProcessContext, Ugen};

pub struct ImpulseJitter {
    core: ImpulseCore,
    rng: StdRng,
}

impl ImpulseJitter {
    pub fn new(freq: f32, offset: f32, freq_rate: Rate, off_rate: Rate, ctx: &ProcessContext) -> Self {
        Self {
            core: ImpulseCore::new(freq, offset, freq_rate, off_rate, ctx.sample_dur),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn new_with_seed(
        freq: f32,
        offset: f32,
        freq_rate: Rate,
        off_rate: Rate,
        ctx: &ProcessContext,
        seed: u64,
    ) -> Self {
        Self {
            core: ImpulseCore::new(freq, offset, freq_rate, off_rate, ctx.sample_dur),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Ugen for ImpulseJitter {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 3, "ImpulseJitter takes 3 inputs");

        let n = output.len();
        let jitter_frac = inputs[2].first().clamp(0.0, 1.0);
        let jitter_width = (jitter_frac * n as f32) as usize;

        output.fill(0.0);

        let rng = &mut self.rng;
        self.core.run(&inputs[0], &inputs[1], n, |i, fired| {
            if fired {
                let low = i.saturating_sub(jitter_width);
                let high = (i + jitter_width).min(n - 1);
                let idx = if high > low {
                    low + rng.gen_range(0..high - low)
                } else {
                    low
                };
                output[idx] = 1.0;
            }
        });
    }

    fn name(&self) -> &str {
        "ImpulseJitter"
    }
}
