//! Analysis-frame types for the spectral units
//!
//! The FFT chain itself (windowing, overlap, forward/inverse transforms)
//! belongs to the host; spectral units here receive one polar-format
//! analysis frame per hop and edit it in place. `PolarFrame` is that seam:
//! dc and nyquist magnitudes plus one magnitude/phase pair per bin.

/// One spectral bin in polar form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bin {
    pub mag: f32,
    pub phase: f32,
}

/// One polar-format analysis frame, edited in place by spectral units.
#[derive(Debug, Clone, Default)]
pub struct PolarFrame {
    pub dc: f32,
    pub nyq: f32,
    pub bins: Vec<Bin>,
}

impl PolarFrame {
    /// An all-zero frame with `num_bins` bins.
    pub fn new(num_bins: usize) -> Self {
        Self {
            dc: 0.0,
            nyq: 0.0,
            bins: vec![Bin::default(); num_bins],
        }
    }

    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }
}
