use crate::error::ResampleError;
use crate::grid::{Grid, GridOptions};
use crate::point::Point;
use crate::stage::{OutputCollector, Stage};
use spdlog::debug;

/// Streaming counterpart of [`Resampler`](crate::Resampler).
///
/// Emits each grid slot as soon as it is decided, so the whole pass is a single
/// forward merge between the grid and the input. For input sorted by timestamp
/// the output is identical to the batch resampler. `finish` pads the slots that
/// no point reached.
///
/// `process` never allocates.
pub struct Regrid {
    grid: Grid,
    next_slot: u32,
    matched: usize,
    dropped: usize,
}

impl Regrid {
    pub fn new(options: GridOptions) -> Result<Self, ResampleError> {
        Ok(Self::with_grid(Grid::new(options)?))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            next_slot: grid.from(),
            matched: 0,
            dropped: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rewinds to the first slot so the stage can be fed another series.
    pub fn reset(&mut self) {
        self.next_slot = self.grid.from();
        self.matched = 0;
        self.dropped = 0;
    }

    #[inline(always)]
    fn fill_until<C>(&mut self, end: u32, collector: &mut C)
    where
        C: OutputCollector<Point>,
    {
        while self.next_slot < end {
            collector.push(&Point::missing(self.next_slot));
            self.next_slot += self.grid.interval();
        }
    }
}

impl Stage<Point, Point> for Regrid {
    #[inline(always)]
    fn process<C>(&mut self, data: &Point, collector: &mut C)
    where
        C: OutputCollector<Point>,
    {
        let slot = match self.grid.align(data.timestamp) {
            Some(slot) if slot >= self.next_slot && slot < self.grid.to() => slot,
            // Already filled, before the window, or past it
            _ => {
                self.dropped += 1;
                return;
            }
        };
        self.fill_until(slot, collector);
        collector.push(&Point::new(data.value, slot));
        self.next_slot = slot + self.grid.interval();
        self.matched += 1;
    }

    fn finish<C>(&mut self, collector: &mut C)
    where
        C: OutputCollector<Point>,
    {
        self.fill_until(self.grid.to(), collector);
        debug!(
            "[Regrid] {} slots: {} matched, {} missing, {} points dropped",
            self.grid.slot_count(),
            self.matched,
            self.grid.slot_count() - self.matched,
            self.dropped
        );
    }
}

pub fn regrid(from: u32, to: u32, interval: u32) -> Result<Regrid, ResampleError> {
    Regrid::new(GridOptions { from, to, interval })
}
