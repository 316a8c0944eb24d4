//! Input rate classification and accessors
//!
//! Every unit input is classified once, at construction, into one of three
//! rate categories. The category never changes afterwards. Units store the
//! chosen [`Rate`] tags and drive a single parameterized per-sample loop
//! through the [`Signal`] accessor, instead of duplicating the whole block
//! loop per rate combination.

/// How often an input value is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    /// Fixed for the lifetime of the unit.
    Scalar,
    /// One value per block.
    Block,
    /// One value per sample.
    Audio,
}

/// One input for one block-processing call.
///
/// `Scalar` and `Block` carry a single value; `Audio` borrows a buffer of
/// `block_size` samples owned by the host. Nothing is copied.
#[derive(Debug, Clone, Copy)]
pub enum Signal<'a> {
    Scalar(f32),
    Block(f32),
    Audio(&'a [f32]),
}

impl<'a> Signal<'a> {
    /// The rate category this signal was supplied at.
    pub fn rate(&self) -> Rate {
        match self {
            Signal::Scalar(_) => Rate::Scalar,
            Signal::Block(_) => Rate::Block,
            Signal::Audio(_) => Rate::Audio,
        }
    }

    /// Value at sample `i` within the current block.
    #[inline]
    pub fn at(&self, i: usize) -> f32 {
        match self {
            Signal::Scalar(v) | Signal::Block(v) => *v,
            Signal::Audio(buf) => buf[i],
        }
    }

    /// Value at the start of the block (the only value, for non-audio rates).
    #[inline]
    pub fn first(&self) -> f32 {
        match self {
            Signal::Scalar(v) | Signal::Block(v) => *v,
            Signal::Audio(buf) => buf[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let buf = [1.0, 2.0, 3.0];
        assert_eq!(Signal::Scalar(0.5).rate(), Rate::Scalar);
        assert_eq!(Signal::Block(0.5).rate(), Rate::Block);
        assert_eq!(Signal::Audio(&buf).rate(), Rate::Audio);
    }

    #[test]
    fn test_accessors() {
        let buf = [1.0, 2.0, 3.0];
        let audio = Signal::Audio(&buf);
        assert_eq!(audio.first(), 1.0);
        assert_eq!(audio.at(2), 3.0);

        let block = Signal::Block(7.0);
        assert_eq!(block.first(), 7.0);
        assert_eq!(block.at(100), 7.0);
    }
}
