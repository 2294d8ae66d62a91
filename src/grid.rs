use crate::error::ResampleError;
use crate::quantize::quantize;
use spdlog::debug;

/// Requested resampling window, `[from, to)` in steps of `interval`.
///
/// Bounds do not need to sit on interval boundaries; they are aligned up
/// the same way input timestamps are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub from: u32,
    pub to: u32,
    pub interval: u32,
}

/// An aligned, validated output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    from: u32,
    to: u32,
    interval: u32,
}

impl Grid {
    pub fn new(options: GridOptions) -> Result<Self, ResampleError> {
        let from = quantize(options.from, options.interval)?;
        let to = quantize(options.to, options.interval)?;
        if to < from {
            return Err(ResampleError::InvertedWindow { from, to });
        }
        let grid = Self {
            from,
            to,
            interval: options.interval,
        };
        debug!(
            "[Grid] [{}, {}) step {} aligned to [{}, {}), {} slots",
            options.from,
            options.to,
            options.interval,
            from,
            to,
            grid.slot_count()
        );
        Ok(grid)
    }

    #[inline(always)]
    pub fn from(&self) -> u32 {
        self.from
    }

    #[inline(always)]
    pub fn to(&self) -> u32 {
        self.to
    }

    #[inline(always)]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    #[inline(always)]
    pub fn slot_count(&self) -> usize {
        ((self.to - self.from) / self.interval) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Slot timestamps in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = u32> + use<> {
        (self.from..self.to).step_by(self.interval as usize)
    }

    pub fn slot_timestamp(&self, index: usize) -> Option<u32> {
        if index >= self.slot_count() {
            return None;
        }
        Some(self.from + index as u32 * self.interval)
    }

    /// Index of the slot an already-aligned timestamp lands on.
    pub fn slot_index(&self, aligned: u32) -> Option<usize> {
        if aligned < self.from || aligned >= self.to || aligned % self.interval != 0 {
            return None;
        }
        Some(((aligned - self.from) / self.interval) as usize)
    }

    /// Aligns a point timestamp to this grid's interval.
    ///
    /// Returns `None` when the aligned value does not fit in `u32`; such a
    /// timestamp can never match a slot.
    #[inline(always)]
    pub fn align(&self, timestamp: u32) -> Option<u32> {
        quantize(timestamp, self.interval).ok()
    }
}

impl TryFrom<GridOptions> for Grid {
    type Error = ResampleError;

    fn try_from(options: GridOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}
