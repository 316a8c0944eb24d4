//! Phase accumulation primitives
//!
//! `wrap` and `test_wrap_phase` are the two arithmetic primitives every
//! position and impulse unit is built on. `test_wrap_phase` in particular is
//! the single wrap/edge-detection primitive shared by the whole impulse
//! family: event scheduling downstream depends on its exact timing, so its
//! branch structure (including the large-jump ceiling/floor corrections) is
//! reproduced precisely.
//!
//! `ImpulseCore` is the state machine common to the impulse units: a phase
//! advanced by `frequency * sample_dur` each sample, with optional phase
//! offset modulation. Frequency and offset may each be scalar, block or
//! audio rate; block-rate values walk linearly from the previous block's
//! value across the block (slope semantics).

use crate::signal::{Rate, Signal};

/// Wrap `x` into `[lo, hi)`.
///
/// A degenerate range (`hi <= lo`) returns `lo`. Single additions and
/// subtractions handle the common small-excursion case; only values more
/// than one range outside fall back to division.
#[inline]
pub fn wrap(x: f64, lo: f64, hi: f64) -> f64 {
    let range = hi - lo;
    if range <= 0.0 {
        return lo;
    }
    let mut off = x - lo;
    if off >= range {
        off -= range;
        if off >= range {
            off -= range * (off / range).floor();
        }
    } else if off < 0.0 {
        off += range;
        if off < 0.0 {
            off -= range * (off / range).floor();
        }
    }
    lo + off
}

/// Test a phase value against the unit interval and wrap it back in.
///
/// `prev_inc` is the increment that was used to reach the current phase; its
/// sign selects which boundary counts as a wrap. Returns `true` exactly when
/// the phase wrapped. Phases that have jumped several whole units are pulled
/// back with a single ceiling/floor correction.
#[inline]
pub fn test_wrap_phase(prev_inc: f64, phase: &mut f64) -> bool {
    if prev_inc < 0.0 {
        // negative freqs
        if *phase <= 0.0 {
            *phase += 1.0;
            if *phase <= 0.0 {
                // catch large phase jumps
                *phase -= phase.ceil();
            }
            true
        } else {
            false
        }
    } else {
        // positive freqs
        if *phase >= 1.0 {
            *phase -= 1.0;
            if *phase >= 1.0 {
                *phase -= phase.floor();
            }
            true
        } else {
            false
        }
    }
}

/// Shared state machine behind the impulse units.
///
/// Owns the phase, the current increment, and the previous phase offset.
/// The rate category of the frequency and offset inputs is fixed at
/// construction; `run` drives one per-sample loop parameterized by those
/// tags, invoking `on_sample(i, fired)` for every sample.
pub struct ImpulseCore {
    phase: f64,
    inc: f64,
    prev_off: f64,
    freq_mul: f64,
    freq_rate: Rate,
    off_rate: Rate,
}

impl ImpulseCore {
    /// Initial phase offset of 0 with a non-negative increment means the
    /// phase is placed at the wrap point, so the unit fires on its very
    /// first sample. This is deliberate policy, not an accident of the
    /// arithmetic.
    pub fn new(freq: f32, offset: f32, freq_rate: Rate, off_rate: Rate, sample_dur: f64) -> Self {
        let inc = freq as f64 * sample_dur;
        let mut phase = wrap(offset as f64, 0.0, 1.0);
        if phase == 0.0 && inc >= 0.0 {
            phase = 1.0;
        }
        Self {
            phase,
            inc,
            prev_off: offset as f64,
            freq_mul: sample_dur,
            freq_rate,
            off_rate,
        }
    }

    pub fn freq_rate(&self) -> Rate {
        self.freq_rate
    }

    pub fn off_rate(&self) -> Rate {
        self.off_rate
    }

    /// Run the per-sample loop over `n` samples.
    ///
    /// Ordering per sample: wrap-test with the increment used to reach the
    /// current phase, report, apply any offset delta (which is itself
    /// wrap-tested, so an offset jump can trigger a wrap), update the
    /// increment, advance the phase. Block-rate inputs store the exact
    /// target value as end-of-block state, not the slope-walked value.
    pub fn run(
        &mut self,
        freq: &Signal,
        offset: &Signal,
        n: usize,
        mut on_sample: impl FnMut(usize, bool),
    ) {
        debug_assert_eq!(freq.rate(), self.freq_rate, "frequency rate mismatch");
        debug_assert_eq!(offset.rate(), self.off_rate, "phase offset rate mismatch");
        debug_assert!(n > 0);

        let mut phase = self.phase;
        let mut inc = self.inc;
        let mut prev_off = self.prev_off;

        let inc_target = match self.freq_rate {
            Rate::Audio => inc,
            _ => freq.first() as f64 * self.freq_mul,
        };
        let inc_slope = match self.freq_rate {
            Rate::Block => (inc_target - inc) / n as f64,
            _ => 0.0,
        };

        let off_target = match self.off_rate {
            Rate::Block => offset.first() as f64,
            _ => prev_off,
        };
        let off_slope = match self.off_rate {
            Rate::Block => (off_target - prev_off) / n as f64,
            _ => 0.0,
        };
        let off_changed = off_slope != 0.0;

        for i in 0..n {
            let fired = test_wrap_phase(inc, &mut phase);
            on_sample(i, fired);

            match self.off_rate {
                Rate::Audio => {
                    let off = offset.at(i) as f64;
                    phase += off - prev_off;
                    test_wrap_phase(inc, &mut phase);
                    prev_off = off;
                }
                Rate::Block if off_changed => {
                    phase += off_slope;
                    test_wrap_phase(inc, &mut phase);
                }
                _ => {}
            }

            match self.freq_rate {
                Rate::Audio => inc = freq.at(i) as f64 * self.freq_mul,
                Rate::Block => inc += inc_slope,
                Rate::Scalar => inc = inc_target,
            }
            phase += inc;
        }

        self.phase = phase;
        self.inc = match self.freq_rate {
            Rate::Block => inc_target,
            _ => inc,
        };
        self.prev_off = match self.off_rate {
            Rate::Block => off_target,
            _ => prev_off,
        };
    }
}
