use std::ops::Range;

/// Split `len` items into `workers` contiguous ranges.
///
/// Ranges cover `0..len` exactly once, in order. The remainder of an uneven
/// split goes to the first range; with more workers than items the trailing
/// ranges are empty. `workers` must be at least 1.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = len / workers;
    let first = base + len % workers;

    let mut ranges = Vec::with_capacity(workers);
    ranges.push(0..first);
    let mut start = first;
    for _ in 1..workers {
        ranges.push(start..start + base);
        start += base;
    }
    ranges
}
