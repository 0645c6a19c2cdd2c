use std::ops::Range;

use super::frame::{DepthBuffer, PixelBuffer};
use super::raycast::WallPass;
use super::strip::ColumnStrip;

/// Split `width` columns into `workers` contiguous ranges. The first
/// `width % workers` ranges take one extra column, so 641 over 4 gives
/// 161, 160, 160, 160. Ranges cover `0..width` exactly once.
pub fn partition_columns(width: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = width / workers;
    let extra = width % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let len = base + usize::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Runs the wall pass over every column of the frame.
///
/// Implementations own their column partition; `run` returns only after
/// every column of `pixels` and `depth` has been written for this tick.
pub trait ColumnDispatch: Send {
    fn worker_count(&self) -> usize;

    /// Frame dimensions the partition was built for
    fn frame_size(&self) -> (usize, usize);

    fn run(&mut self, pass: &WallPass, pixels: &mut PixelBuffer, depth: &mut DepthBuffer);
}

/// Renders the same partition as a pool would, one strip after another on
/// the calling thread. Output is bit-identical to the threaded path.
#[derive(Debug)]
pub struct InlineDispatch {
    strips: Vec<ColumnStrip>,
    width: usize,
    height: usize,
}

impl InlineDispatch {
    pub fn new(width: usize, height: usize, strips: usize) -> Self {
        Self {
            strips: partition_columns(width, strips)
                .into_iter()
                .map(|columns| ColumnStrip::new(columns, height))
                .collect(),
            width,
            height,
        }
    }
}

impl ColumnDispatch for InlineDispatch {
    fn worker_count(&self) -> usize {
        self.strips.len()
    }

    fn frame_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn run(&mut self, pass: &WallPass, pixels: &mut PixelBuffer, depth: &mut DepthBuffer) {
        for strip in &mut self.strips {
            strip.render(pass, self.width);
            strip.blit(pixels, depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(ranges: &[Range<usize>]) -> Vec<usize> {
        ranges.iter().map(|r| r.len()).collect()
    }

    #[test]
    fn test_partition_spreads_remainder_first() {
        assert_eq!(lengths(&partition_columns(641, 4)), vec![161, 160, 160, 160]);
        assert_eq!(lengths(&partition_columns(640, 4)), vec![160; 4]);
        assert_eq!(lengths(&partition_columns(10, 3)), vec![4, 3, 3]);
    }

    #[test]
    fn test_partition_covers_width_once() {
        for width in [0, 1, 7, 320, 641] {
            for workers in 1..=9 {
                let ranges = partition_columns(width, workers);
                assert_eq!(ranges.len(), workers);
                let mut next = 0;
                for r in &ranges {
                    assert_eq!(r.start, next);
                    next = r.end;
                }
                assert_eq!(next, width);
            }
        }
    }

    #[test]
    fn test_more_workers_than_columns() {
        let ranges = partition_columns(2, 4);
        assert_eq!(lengths(&ranges), vec![1, 1, 0, 0]);
    }
}
