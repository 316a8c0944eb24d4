//! Unit generator implementations
//!
//! One file per unit. Every unit stores its rate classification at
//! construction and checks supplied signals against it with `debug_assert!`.
//!
//! ## Position generators
//! - [`phasor::Phasor`] - Resettable ramp between start and end
//! - [`loop_phasor::LoopPhasor`] - Ramp with a loop region and a finish latch
//!
//! ## Impulse generators
//! - [`impulse::Impulse`] - Impulse at each phase wrap
//! - [`impulse_jitter::ImpulseJitter`] - Impulses displaced within the block
//! - [`impulse_scatter::ImpulseScatter`] - Impulses displaced into later blocks
//! - [`impulse_dropout::ImpulseDropout`] - Impulses randomly thinned
//!
//! ## Analysis
//! - [`amplitude::Amplitude`] - Attack/release envelope follower
//! - [`frame_freeze::FrameFreeze`] - Spectral freeze over analysis frames

pub mod amplitude;
pub mod frame_freeze;
pub mod impulse;
pub mod impulse_dropout;
pub mod impulse_jitter;
pub mod impulse_scatter;
pub mod loop_phasor;
pub mod phasor;
