use crate::error::ResampleError;
use crate::grid::{Grid, GridOptions};
use crate::point::Point;
use spdlog::{debug, trace};

/// Places irregular points onto a fixed grid in a single batch pass.
///
/// Every slot of the grid produces exactly one output point. A slot takes the
/// value of the first input point (in input order, from the cursor onwards) that
/// aligns to it, or a missing marker when there is none. Input is expected to be
/// sorted by timestamp but this is not enforced.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    grid: Grid,
}

impl Resampler {
    pub fn new(options: GridOptions) -> Result<Self, ResampleError> {
        Ok(Self {
            grid: Grid::new(options)?,
        })
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn resample(&self, input: &[Point]) -> Vec<Point> {
        let grid = &self.grid;
        let (aligned, out_of_order) = align_input(grid, input);

        let mut out = Vec::with_capacity(grid.slot_count());
        let mut cursor = 0;
        let mut matched = 0;

        for slot in grid.slots() {
            // The cursor only moves forward, and only on a match.
            match aligned[cursor..].iter().position(|ts| *ts == Some(slot)) {
                Some(offset) => {
                    cursor += offset;
                    out.push(Point::new(input[cursor].value, slot));
                    matched += 1;
                }
                None => {
                    trace!("[Resampler] no point for slot {}", slot);
                    out.push(Point::missing(slot));
                }
            }
        }

        if out_of_order > 0 {
            debug!(
                "[Resampler] {} points out of timestamp order, duplicates may be lost",
                out_of_order
            );
        }
        debug!(
            "[Resampler] {} points onto {} slots: {} matched, {} missing, {} discarded",
            input.len(),
            out.len(),
            matched,
            out.len() - matched,
            input.len() - matched
        );
        out
    }
}

/// Aligned copies of the input timestamps, plus how many points have a smaller
/// timestamp than their predecessor. The caller's points stay untouched.
fn align_input(grid: &Grid, input: &[Point]) -> (Vec<Option<u32>>, usize) {
    let mut aligned = Vec::with_capacity(input.len());
    let mut out_of_order = 0;
    let mut prev = 0;
    for point in input {
        if point.timestamp < prev {
            out_of_order += 1;
        }
        prev = point.timestamp;
        aligned.push(grid.align(point.timestamp));
    }
    (aligned, out_of_order)
}

/// Resamples `input` onto the `[from, to)` grid with the given interval.
pub fn resample(
    input: &[Point],
    from: u32,
    to: u32,
    interval: u32,
) -> Result<Vec<Point>, ResampleError> {
    let resampler = Resampler::new(GridOptions { from, to, interval })?;
    Ok(resampler.resample(input))
}

#[cfg(test)]
mod resampler_tests {
    use super::*;

    fn points(raw: &[(f64, u32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_matched_point_takes_slot_timestamp() {
        let out = resample(&points(&[(3.0, 101)]), 100, 120, 10).unwrap();
        assert_eq!(out, points(&[(f64::NAN, 100), (3.0, 110)]));
    }

    #[test]
    fn test_unmatched_slot_keeps_cursor() {
        // 130 is not found while filling 110 and 120, but is still used for 130
        let out = resample(&points(&[(1.0, 100), (2.0, 130)]), 100, 140, 10).unwrap();
        assert_eq!(
            out,
            points(&[(1.0, 100), (f64::NAN, 110), (f64::NAN, 120), (2.0, 130)])
        );
    }

    #[test]
    fn test_unsorted_input_follows_cursor() {
        // The 130 point sits before the 110 match, so the cursor has passed it.
        let input = points(&[(1.0, 130), (2.0, 110), (3.0, 140)]);
        let out = resample(&input, 110, 150, 10).unwrap();
        assert_eq!(
            out,
            points(&[(2.0, 110), (f64::NAN, 120), (f64::NAN, 130), (3.0, 140)])
        );

        // Matching 120 moves the cursor past the 130 point.
        let input = points(&[(2.0, 110), (1.0, 130), (9.0, 120), (3.0, 140)]);
        let out = resample(&input, 110, 150, 10).unwrap();
        assert_eq!(
            out,
            points(&[(2.0, 110), (9.0, 120), (f64::NAN, 130), (3.0, 140)])
        );
    }

    #[test]
    fn test_align_input_counts_out_of_order_points() {
        let grid = Grid::new(GridOptions {
            from: 100,
            to: 150,
            interval: 10,
        })
        .unwrap();

        let (aligned, out_of_order) =
            align_input(&grid, &points(&[(1.0, 101), (2.0, 110), (3.0, 110), (4.0, 139)]));
        assert_eq!(aligned, vec![Some(110), Some(110), Some(110), Some(140)]);
        assert_eq!(out_of_order, 0);

        let (aligned, out_of_order) =
            align_input(&grid, &points(&[(1.0, 130), (2.0, 110), (3.0, 140), (4.0, 120)]));
        assert_eq!(aligned, vec![Some(130), Some(110), Some(140), Some(120)]);
        assert_eq!(out_of_order, 2);

        let (aligned, out_of_order) = align_input(&grid, &[]);
        assert!(aligned.is_empty());
        assert_eq!(out_of_order, 0);
    }

    #[test]
    fn test_overflowing_point_is_dropped() {
        let input = points(&[(1.0, u32::MAX), (2.0, 10)]);
        let out = resample(&input, 0, 20, 10).unwrap();
        assert_eq!(out, points(&[(f64::NAN, 0), (2.0, 10)]));
    }

    #[test]
    fn test_resampler_is_reusable() {
        let resampler = Resampler::new(GridOptions {
            from: 0,
            to: 30,
            interval: 10,
        })
        .unwrap();
        let first = resampler.resample(&points(&[(1.0, 0)]));
        let second = resampler.resample(&points(&[(2.0, 20)]));
        assert_eq!(first, points(&[(1.0, 0), (f64::NAN, 10), (f64::NAN, 20)]));
        assert_eq!(second, points(&[(f64::NAN, 0), (f64::NAN, 10), (2.0, 20)]));
    }
}
