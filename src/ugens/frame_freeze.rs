//! FrameFreeze - spectral freeze over a ring of recorded frames
//!
//! Operates on polar spectra rather than sample blocks, so it exposes a
//! frame-processing entry point instead of implementing the block trait.
//! While the freeze control is closed the unit records incoming frames into
//! a ring of up to [`MAX_FRAMES`] slots, keeping per-bin phase increments
//! rather than raw phases. While open it rewrites each frame from the ring:
//! every bin picks a random recorded frame for its magnitude and phase
//! increment, and the running phase advances by that increment. This keeps
//! the resynthesis phase-continuous while the magnitudes shuffle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, warn};

use crate::phase::wrap;
use crate::spectral::PolarFrame;

pub const MAX_FRAMES: usize = 20;

const TAU: f64 = std::f64::consts::TAU;

pub struct FrameFreeze {
    num_frames: usize,
    rng: StdRng,
    /// Per-frame magnitudes, `num_frames * num_bins` once allocated.
    mags: Vec<f32>,
    /// Per-frame phase increments, same layout as `mags`.
    phase_diffs: Vec<f32>,
    dc: Vec<f32>,
    nyq: Vec<f32>,
    /// Running synthesis phase per bin. While recording it holds the phase
    /// of the most recent incoming frame.
    phase: Vec<f32>,
    num_bins: usize,
    write_ptr: usize,
    /// Ring slots recorded so far, saturating at `num_frames`.
    filled: usize,
    inert: bool,
}

impl FrameFreeze {
    pub fn new(num_frames: usize) -> Self {
        Self::build(num_frames, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn new_with_seed(num_frames: usize, seed: u64) -> Self {
        Self::build(num_frames, StdRng::seed_from_u64(seed))
    }

    fn build(num_frames: usize, rng: StdRng) -> Self {
        let clamped = num_frames.clamp(1, MAX_FRAMES);
        if clamped != num_frames {
            warn!(requested = num_frames, using = clamped, "FrameFreeze ring clamped");
        }
        Self {
            num_frames: clamped,
            rng,
            mags: Vec::new(),
            phase_diffs: Vec::new(),
            dc: Vec::new(),
            nyq: Vec::new(),
            phase: Vec::new(),
            num_bins: 0,
            write_ptr: 0,
            filled: 0,
            inert: false,
        }
    }

    /// Sizes the ring to the first frame seen. Returns false when the
    /// allocation fails, in which case the unit goes inert.
    fn allocate(&mut self, num_bins: usize) -> bool {
        let per_frame = self.num_frames * num_bins;
        let ok = self.mags.try_reserve_exact(per_frame).is_ok()
            && self.phase_diffs.try_reserve_exact(per_frame).is_ok()
            && self.dc.try_reserve_exact(self.num_frames).is_ok()
            && self.nyq.try_reserve_exact(self.num_frames).is_ok()
            && self.phase.try_reserve_exact(num_bins).is_ok();
        if !ok {
            error!(num_bins, "FrameFreeze ring allocation failed, unit disabled");
            self.inert = true;
            return false;
        }
        self.mags.resize(per_frame, 0.0);
        self.phase_diffs.resize(per_frame, 0.0);
        self.dc.resize(self.num_frames, 0.0);
        self.nyq.resize(self.num_frames, 0.0);
        self.phase.resize(num_bins, 0.0);
        self.num_bins = num_bins;
        true
    }

    /// Record the frame or, when `freeze` is open, rewrite it from the ring.
    pub fn process_frame(&mut self, frame: &mut PolarFrame, freeze: f32) {
        if self.inert {
            return;
        }
        if self.num_bins == 0 && !self.allocate(frame.num_bins()) {
            return;
        }
        if frame.num_bins() != self.num_bins {
            // a host-side frame size change; nothing sensible to do with it
            return;
        }

        if freeze > 0.0 && self.filled > 0 {
            self.resynthesize(frame);
        } else {
            self.record(frame);
        }
    }

    fn record(&mut self, frame: &PolarFrame) {
        let base = self.write_ptr * self.num_bins;
        for (b, bin) in frame.bins.iter().enumerate() {
            self.mags[base + b] = bin.mag;
            let diff = wrap((bin.phase - self.phase[b]) as f64, 0.0, TAU) as f32;
            self.phase_diffs[base + b] = diff;
            self.phase[b] = bin.phase;
        }
        self.dc[self.write_ptr] = frame.dc;
        self.nyq[self.write_ptr] = frame.nyq;
        self.write_ptr = (self.write_ptr + 1) % self.num_frames;
        self.filled = (self.filled + 1).min(self.num_frames);
    }

    fn resynthesize(&mut self, frame: &mut PolarFrame) {
        for (b, bin) in frame.bins.iter_mut().enumerate() {
            let pick = self.rng.gen_range(0..self.filled);
            let base = pick * self.num_bins;
            self.phase[b] = wrap((self.phase[b] + self.phase_diffs[base + b]) as f64, 0.0, TAU) as f32;
            bin.mag = self.mags[base + b];
            bin.phase = self.phase[b];
        }
        frame.dc = self.dc[self.rng.gen_range(0..self.filled)];
        frame.nyq = self.nyq[self.rng.gen_range(0..self.filled)];
    }
}
