//! ImpulseDropout - impulse train with a random fraction removed
//!
//! Generates the plain train first, then zeroes a random selection of the
//! impulses that fired this block. The number removed is rounded from
//! `dropout_frac * fired`, so a fraction of 1.0 silences the block and 0.0
//! passes the train through untouched.
//!
//! Inputs: `[freq, phase_offset, dropout_frac]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::phase::ImpulseCore;
use crate::signal::{Rate, Signal};
use crate::ugen::{ProcessContext, Ugen};

pub struct ImpulseDropout {
    core: ImpulseCore,
    rng: StdRng,
    /// Indices that fired in the current block, reused across calls.
    fired: Vec<usize>,
}

impl ImpulseDropout {
    pub fn new(freq: f32, offset: f32, freq_rate: Rate, off_rate: Rate, ctx: &ProcessContext) -> Self {
        Self {
            core: ImpulseCore::new(freq, offset, freq_rate, off_rate, ctx.sample_dur),
            rng: StdRng::from_entropy(),
            fired: Vec::with_capacity(ctx.block_size),
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
            fired: Vec::with_capacity(ctx.block_size),
        }
    }
}

impl Ugen for ImpulseDropout {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 3, "ImpulseDropout takes 3 inputs");

        let n = output.len();
        output.fill(0.0);
        self.fired.clear();

        let fired = &mut self.fired;
        self.core.run(&inputs[0], &inputs[1], n, |i, did_fire| {
            if did_fire {
                output[i] = 1.0;
                fired.push(i);
            }
        });

        let frac = inputs[2].first().clamp(0.0, 1.0);
        let num_drop = (frac * self.fired.len() as f32).round() as usize;
        for _ in 0..num_drop {
            let pick = self.rng.gen_range(0..self.fired.len());
            let idx = self.fired.swap_remove(pick);
            output[idx] = 0.0;
        }
    }

    fn name(&self) -> &str {
        "ImpulseDropout"
    }
}
