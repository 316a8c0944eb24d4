//! Impulse - unit impulse at each phase wrap
//!
//! Outputs 1.0 on exactly the sample where the internal phase wraps and 0.0
//! everywhere else. Frequency and phase offset may each be scalar, block or
//! audio rate; block-rate values walk linearly across the block from the
//! previous block's value.
//!
//! Inputs: `[freq, phase_offset]`.

use crate::phase::ImpulseCore;
use crate::signal::{Rate, Signal};
use crate::ugen::{ProcessContext, Ugen};

pub struct Impulse {
    core: ImpulseCore,
}

impl Impulse {
    /// A phase offset of exactly 0 with a non-negative frequency fires on
    /// the very first sample.
    pub fn new(freq: f32, offset: f32, freq_rate: Rate, off_rate: Rate, ctx: &ProcessContext) -> Self {
        Self {
            core: ImpulseCore::new(freq, offset, freq_rate, off_rate, ctx.sample_dur),
        }
    }
}

impl Ugen for Impulse {
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], _ctx: &ProcessContext) {
        debug_assert_eq!(inputs.len(), 2, "Impulse takes 2 inputs");

        self.core.run(&inputs[0], &inputs[1], output.len(), |i, fired| {
            output[i] = if fired { 1.0 } else { 0.0 };
        });
    }

    fn name(&self) -> &str {
        "Impulse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_impulse() {
        let ctx = ProcessContext::new(64, 44100.0);
        let mut imp = Impulse::new(100.0, 0.0, Rate::Scalar, Rate::Scalar, &ctx);
        let mut out = [0.0f32; 64];
        imp.process_block(
            &[Signal::Scalar(100.0), Signal::Scalar(0.0)],
            &mut out,
            &ctx,
        );
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_impulses_are_single_samples() {
        let ctx = ProcessContext::new(512, 44100.0);
        let mut imp = Impulse::new(1000.0, 0.0, Rate::Scalar, Rate::Scalar, &ctx);
        let mut out = [0.0f32; 512];
        imp.process_block(
            &[Signal::Scalar(1000.0), Signal::Scalar(0.0)],
            &mut out,
            &ctx,
        );
        // ~11-12 impulses at 1 kHz over 512 samples, each exactly one sample
        let count = out.iter().filter(|&&s| s == 1.0).count();
        assert!((11..=12).contains(&count), "got {} impulses", count);
        for pair in out.windows(2) {
            assert!(!(pair[0] == 1.0 && pair[1] == 1.0), "impulse wider than one sample");
        }
        assert!(out.iter().all(|&s| s == 0.0 || s == 1.0));
    }

    #[test]
    fn test_block_rate_frequency_sweep() {
        // Sweeping the block-rate frequency up must not stall or double-fire
        // the train; the increment slopes smoothly between blocks.
        let ctx = ProcessContext::new(128, 44100.0);
        let mut imp = Impulse::new(200.0, 0.0, Rate::Block, Rate::Scalar, &ctx);
        let mut total = 0usize;
        let mut out = [0.0f32; 128];
        for step in 0..20 {
            let freq = 200.0 + step as f32 * 100.0;
            imp.process_block(&[Signal::Block(freq), Signal::Scalar(0.0)], &mut out, &ctx);
            total += out.iter().filter(|&&s| s == 1.0).count();
        }
        // mean frequency ~1150 Hz over 2560 samples: ~67 impulses
        assert!((60..=75).contains(&total), "got {} impulses", total);
    }

    #[test]
    fn test_negative_frequency_fires() {
        let ctx = ProcessContext::new(512, 44100.0);
        let mut imp = Impulse::new(-1000.0, 0.25, Rate::Scalar, Rate::Scalar, &ctx);
        let mut out = [0.0f32; 512];
        imp.process_block(
            &[Signal::Scalar(-1000.0), Signal::Scalar(0.25)],
            &mut out,
            &ctx,
        );
        let count = out.iter().filter(|&&s| s == 1.0).count();
        assert!((11..=12).contains(&count), "got {} impulses", count);
    }
}
