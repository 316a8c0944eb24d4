//! # Strobe - Phase and Impulse Unit Generators
//!
//! Strobe is a family of block-based unit generators (UGens) for modular
//! synthesis hosts. Each unit processes one control block of samples per
//! call, carries a small amount of state across blocks, and is safe to run
//! on a realtime audio thread: no allocation, no locks, and no blocking in
//! the steady-state path.
//!
//! ## Unit Catalogue
//!
//! - [`ugens::phasor::Phasor`] - Resettable position ramp with sample-accurate retriggering
//! - [`ugens::loop_phasor::LoopPhasor`] - Looping playback-position generator with a finish latch
//! - [`ugens::impulse::Impulse`] - Unit impulse exactly at each phase wrap
//! - [`ugens::impulse_jitter::ImpulseJitter`] - Impulses displaced inside a block-local window
//! - [`ugens::impulse_scatter::ImpulseScatter`] - Impulses displaced forward, possibly into later blocks
//! - [`ugens::impulse_dropout::ImpulseDropout`] - Impulse train thinned at random
//! - [`ugens::amplitude::Amplitude`] - Attack/release envelope follower
//! - [`ugens::frame_freeze::FrameFreeze`] - Spectral freeze over host-supplied analysis frames
//!
//! ## Quick Start
//!
//! ```rust
//! use strobe::signal::{Rate, Signal};
//! use strobe::ugen::{ProcessContext, Ugen};
//! use strobe::ugens::impulse::Impulse;
//!
//! let ctx = ProcessContext::new(64, 44100.0);
//! let mut imp = Impulse::new(440.0, 0.0, Rate::Scalar, Rate::Scalar, &ctx);
//!
//! let mut out = vec![0.0f32; 64];
//! let inputs = [Signal::Scalar(440.0), Signal::Scalar(0.0)];
//! imp.process_block(&inputs, &mut out, &ctx);
//! assert_eq!(out[0], 1.0); // zero phase offset fires on the very first sample
//! ```
//!
//! ## Rate Categories
//!
//! Every input is classified once, at construction, as one of three rate
//! categories (see [`signal::Rate`]): scalar (fixed for the lifetime of the
//! unit), block (one value per block, interpolated where the unit calls for
//! it), or audio (one value per sample). The classification never changes
//! after construction; per-block calls must supply signals matching it.
//!
//! ## Realtime Contract
//!
//! Construction may allocate (scratch tables, the future-event heap, frame
//! history) and may log through `tracing`. `process_block` does neither.
//! A unit whose construction-time allocation fails reports the failure and
//! goes inert: its block calls write silence instead of panicking.

pub mod event_heap;
pub mod phase;
pub mod signal;
pub mod spectral;
pub mod trigger;
pub mod ugen;
pub mod ugens;
