//! Block-based processing - core abstraction shared by every unit generator
//!
//! This module defines the `Ugen` trait. A host constructs a unit once per
//! voice, then calls `process_block` once per control block for the lifetime
//! of the voice. All per-unit state lives inside the unit struct; nothing is
//! shared between instances, so no synchronization is ever needed.

use crate::signal::Signal;

/// Context passed to all units during block processing
///
/// Carries the host constants a unit needs every block. The block size and
/// sample rate are fixed for the lifetime of a voice.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext {
    /// Number of samples per block (usually 64-512)
    pub block_size: usize,

    /// Sample rate in Hz (usually 44100.0 or 48000.0)
    pub sample_rate: f32,

    /// Duration of one sample in seconds (1.0 / sample_rate)
    pub sample_dur: f64,
}

impl ProcessContext {
    pub fn new(block_size: usize, sample_rate: f32) -> Self {
        Self {
            block_size,
            sample_rate,
            sample_dur: 1.0 / sample_rate as f64,
        }
    }
}

/// Core trait for block-based unit generators
///
/// Implementors must uphold the realtime contract: `process_block` performs
/// no allocation, takes no locks, and never blocks. It runs to completion on
/// the audio thread once per block.
pub trait Ugen: Send {
    /// Process one block of samples
    ///
    /// # Arguments
    /// * `inputs` - One [`Signal`] per declared input, in declaration order.
    ///   Each signal's rate must match the rate the unit was constructed
    ///   with; this is checked with `debug_assert!` only.
    /// * `output` - Output buffer. Audio-rate units receive a buffer of
    ///   `block_size` samples; control-rate units a buffer of length 1.
    /// * `ctx` - Host constants for this voice.
    fn process_block(&mut self, inputs: &[Signal], output: &mut [f32], ctx: &ProcessContext);

    /// Get a human-readable name for this unit (for debugging)
    fn name(&self) -> &str {
        "Ugen"
    }
}
