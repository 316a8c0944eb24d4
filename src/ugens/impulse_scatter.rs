//! ImpulseScatter - impulses displaced forward across block boundaries
//!
//! Like [`crate::ugens::impulse_jitter::ImpulseJitter`] but the displacement
//! window extends up to `window_blocks` blocks into the future. Impulses that
//! land past the current block are parked in a bounded min-heap of sample
//! offsets and delivered when their block comes around. The heap is sized at
//! construction; when it is full, late impulses are dropped silently rather
//! than blocking the audio thread.
//!
//! Inputs: `[freq, phase_offset, jitter_frac]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, warn};

use crate::event_heap::OffsetHeap;
use crate::phase::ImpulseCore;
use crate::signal::{Rate, Signal};
use crate::ugen::{ProcessContext, Ugen};

const MAX_WINDOW_BLOCKS: usize = 16;
const HEAP_CAPACITY: usize = 64;

pub struct ImpulseScatter {
    core: ImpulseCore,
    pending: OffsetHeap,
    window_blocks: usize,
    rng: StdRng,
    /// Set when the heap allocation failed at construction. The unit then
    /// produces silence instead of aborting the audio thread.
    inert: bool,
}

impl ImpulseScatter {
    pub fn new(
        freq: f32,
        offset: f32,
        window_blocks: usize,
        freq_rate: Rate,
        off_rate: Rate,
        ctx: &ProcessContext,
    ) -> Self {
        Self::build(freq, offset, window_blocks, freq_rate, off_rate, ctx, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn new_with_seed(
        freq: f32,
        offset: f32,
        window_blocks: usize,
        freq_rate: Rate,
        off_rate: Rate,
        ctx: &ProcessContext,
        seed: u64,
    ) -> Self {
        Self::build(
            freq,
            offset,
            window_blocks,
            freq_rate,
            off_rate,
            ctx,
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(
        freq: f32,
        offset: f32,
        window_blocks: usize,
        freq_rate: Rate,
        off_rate: Rate,
        ctx: &ProcessContext,
        rng: StdRng,
    ) -> Self {
        let clamped = window_blocks.clamp(1, MAX_WINDOW_BLOCKS);
        if clamped != window_blocks {
            warn!(
                requested = window_blocks,
                using = clamped,
                "ImpulseScatter window clamped"
            );
        }
        let (pending, inert) = match OffsetHeap::try_with_capacity(HEAP_CAPACITY) {
            Some(heap) => (heap, false),
            None => {
                error!("ImpulseScatter heap allocation failed, unit disabled");
                (OffsetHeap::with_capacity(0), true)
            }
        };
        Self {
            core: ImpulseCore::new(freq, offset, freq_rate, off_rate, ctx.sample_dur),
            pending,
            window_blocks: clamped,
            rng,
            inert,
        }
    }

    /// Heap slots actually usable at this frequency. Dense trains get fewer
    /// slots so a burst cannot hold the heap for many blocks.
    fn effective_capacity(&self, freq: f32) -> usize {
        let slots = freq.max(2.0).log2().ceil() as usize;
        slots.clamp(1, self.pending.capacity())
    }
}

impl Ugen for ImpulseScatter {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 3, "ImpulseScatter takes 3 inputs");

        let n = output.len();
        output.fill(0.0);
        if self.inert {
            return;
        }

        // Deliver impulses scheduled by earlier blocks.
        self.pending.advance(n as u32);
        while let Some(due) = self.pending.pop_below(n as u32) {
            output[due as usize] = 1.0;
        }

        let jitter_frac = inputs[2].first().clamp(0.0, 1.0);
        let jitter_width = (jitter_frac * (self.window_blocks * n) as f32) as usize;
        let eff = self.effective_capacity(inputs[0].first());

        let rng = &mut self.rng;
        let pending = &mut self.pending;
        self.core.run(&inputs[0], &inputs[1], n, |i, fired| {
            if fired {
                let delta = if jitter_width > 0 {
                    rng.gen_range(0..jitter_width)
                } else {
                    0
                };
                let idx = i + delta;
                if idx < n {
                    output[idx] = 1.0;
                } else if pending.len() < eff {
                    // kept relative to this block's start; advance() rebases
                    // the stored offsets at the top of each later block
                    pending.insert(idx as u32);
                }
            }
        });
    }

    fn name(&self) -> &str {
        "ImpulseScatter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_blocks(scatter: &mut ImpulseScatter, inputs: &[Signal], ctx: &ProcessContext, blocks: usize) -> usize {
        let mut out = vec![0.0f32; ctx.block_size];
        let mut total = 0usize;
        for _ in 0..blocks {
            scatter.process_block(inputs, &mut out, ctx);
            total += out.iter().filter(|&&s| s == 1.0).count();
        }
        total
    }

    #[test]
    fn test_zero_jitter_delivers_in_place() {
        let ctx = ProcessContext::new(512, 44100.0);
        let mut scatter =
            ImpulseScatter::new_with_seed(1000.0, 0.0, 4, Rate::Scalar, Rate::Scalar, &ctx, 1);
        let mut out = [0.0f32; 512];
        scatter.process_block(
            &[
                Signal::Scalar(1000.0),
                Signal::Scalar(0.0),
                Signal::Scalar(0.0),
            ],
            &mut out,
            &ctx,
        );
        assert_eq!(out[0], 1.0);
        let count = out.iter().filter(|&&s| s == 1.0).count();
        assert!((11..=12).contains(&count), "got {} impulses", count);
    }

    #[test]
    fn test_impulses_survive_block_crossing() {
        // A wide window pushes most impulses into later blocks. Run long
        // enough that everything scheduled has drained back out and check
        // the totals agree with an unscattered train.
        let ctx = ProcessContext::new(128, 44100.0);
        let inputs = [
            Signal::Scalar(150.0),
            Signal::Scalar(0.5),
            Signal::Scalar(0.8),
        ];
        for seed in 0..20 {
            let mut scatter =
                ImpulseScatter::new_with_seed(150.0, 0.5, 4, Rate::Scalar, Rate::Scalar, &ctx, seed);
            let fired = run_blocks(&mut scatter, &inputs, &ctx, 200);
            // 150 Hz over 25600 samples is ~87 wraps; the tail of the run may
            // still hold a handful in the heap but none may be lost before it.
            let expected = (0.5 + 25599.0 * 150.0 / 44100.0) as usize;
            assert!(
                fired <= expected && fired + scatter.pending.len() >= expected - 4,
                "seed {}: fired {} pending {} expected {}",
                seed,
                fired,
                scatter.pending.len(),
                expected
            );
        }
    }

    #[test]
    fn test_heap_never_exceeds_effective_capacity() {
        // At 150 Hz the frequency-scaled cap is ceil(log2(150)) = 8 slots.
        let ctx = ProcessContext::new(64, 44100.0);
        let inputs = [
            Signal::Scalar(150.0),
            Signal::Scalar(0.5),
            Signal::Scalar(1.0),
        ];
        let mut scatter =
            ImpulseScatter::new_with_seed(150.0, 0.5, 16, Rate::Scalar, Rate::Scalar, &ctx, 9);
        let mut out = [0.0f32; 64];
        for _ in 0..500 {
            scatter.process_block(&inputs, &mut out, &ctx);
            assert!(scatter.pending.len() <= 8, "heap grew to {}", scatter.pending.len());
        }
    }

    #[test]
    fn test_window_clamped_to_limit() {
        let ctx = ProcessContext::new(64, 44100.0);
        let scatter = ImpulseScatter::new(100.0, 0.0, 99, Rate::Scalar, Rate::Scalar, &ctx);
        assert_eq!(scatter.window_blocks, MAX_WINDOW_BLOCKS);
        let scatter = ImpulseScatter::new(100.0, 0.0, 0, Rate::Scalar, Rate::Scalar, &ctx);
        assert_eq!(scatter.window_blocks, 1);
    }
}
