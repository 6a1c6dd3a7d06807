//! Sampling analysis of time series indexes
use itertools::Itertools;

use crate::prelude::{Duration, Epoch};

/// Finds the `n` largest gaps of a time ordered series of [Epoch]s,
/// in the form (gap duration, ending [Epoch]), sorted by decreasing duration.
/// The first [Epoch] has no predecessor and never ends a gap. Gaps of equal
/// duration are returned in order of appearance.
/// ```
/// use gnss_analysis::prelude::*;
/// use gnss_analysis::sampling::find_largest_gaps;
///
/// let t0 = Epoch::from_gpst_seconds(0.0);
/// let epochs = [0.0, 1.0, 101.0, 102.0, 152.0]
///     .iter()
///     .map(|s| t0 + Duration::from_seconds(*s))
///     .collect::<Vec<_>>();
///
/// let gaps = find_largest_gaps(&epochs, 2);
/// assert_eq!(gaps, vec![
///     (Duration::from_seconds(100.0), epochs[2]),
///     (Duration::from_seconds(50.0), epochs[4]),
/// ]);
/// ```
pub fn find_largest_gaps(epochs: &[Epoch], n: usize) -> Vec<(Duration, Epoch)> {
    let t0 = match epochs.first() {
        Some(t0) => *t0,
        None => return Vec::new(),
    };

    // elapsed time since first epoch
    let elapsed = epochs.iter().map(|t| *t - t0).collect::<Vec<_>>();

    elapsed
        .iter()
        .zip(elapsed.iter().skip(1))
        .zip(epochs.iter().skip(1))
        .map(|((dt_k, dt_kp1), t)| (*dt_kp1 - *dt_k, *t))
        .sorted_by(|(gap_i, _), (gap_j, _)| gap_j.cmp(gap_i))
        .take(n)
        .collect()
}

/// Histogram of the intervals between successive [Epoch]s,
/// in order of first appearance.
pub fn sampling_histogram(epochs: &[Epoch]) -> Vec<(Duration, usize)> {
    // compute dt = |e_k+1 - e_k| : instantaneous epoch delta
    //              then compute an histogram on these intervals
    epochs
        .iter()
        .zip(epochs.iter().skip(1))
        .map(|(ek, ekp1)| *ekp1 - *ek)
        .fold(vec![], |mut list, dt| {
            match list.iter_mut().find(|(delta, _)| *delta == dt) {
                Some((_, pop)) => *pop += 1,
                None => list.push((dt, 1)),
            }
            list
        })
}

/// Returns the most frequent interval between successive [Epoch]s.
/// When several intervals are equally frequent, the first one encountered wins.
pub fn dominant_sampling_interval(epochs: &[Epoch]) -> Option<Duration> {
    sampling_histogram(epochs)
        .into_iter()
        .rev()
        .max_by(|(_, pop_i), (_, pop_j)| pop_i.cmp(pop_j))
        .map(|dominant| dominant.0)
}

/// Returns every interval between successive [Epoch]s that is larger than
/// `tolerance`, in the form (starting [Epoch], gap duration).
/// When `tolerance` is undefined, the reference is the dominant sampling
/// interval.
pub fn data_gaps(epochs: &[Epoch], tolerance: Option<Duration>) -> Vec<(Epoch, Duration)> {
    let sample_rate = match tolerance.or_else(|| dominant_sampling_interval(epochs)) {
        Some(dt) => dt,
        None => return Vec::new(),
    };
    epochs
        .iter()
        .zip(epochs.iter().skip(1))
        .filter_map(|(ek, ekp1)| {
            let dt = *ekp1 - *ek;
            if dt > sample_rate {
                Some((*ek, dt))
            } else {
                None
            }
        })
        .collect()
}
