//! Simple statistics over interleaved 16-bit buffers.
//!
//! Every function reads a single channel of the interleaved data, which is
//! enough for the mono-sourced output this crate produces.

/// Iterates over the samples of `channel` in interleaved `samples`.
pub fn channel(
    samples: &[i16],
    channels: usize,
    channel: usize,
) -> impl Iterator<Item = i16> + '_ {
    debug_assert!(channel < channels);
    samples.iter().skip(channel).step_by(channels.max(1)).copied()
}

/// Mean and standard deviation of the first channel. Returns zeros for an
/// empty buffer.
pub fn mean_and_std_dev(samples: &[i16], channels: usize) -> (f64, f64) {
    let mut sum = 0.0;
    let mut sq_sum = 0.0;
    let mut count = 0usize;

    for s in channel(samples, channels, 0).map(f64::from) {
        sum += s;
        sq_sum += s * s;
        count += 1;
    }

    if count == 0 {
        return (0.0, 0.0);
    }

    let n = count as f64;
    let mean = sum / n;
    let variance = (sq_sum / n - mean * mean).max(0.0);

    (mean, variance.sqrt())
}

/// Smallest and largest sample of the first channel.
pub fn min_max(samples: &[i16], channels: usize) -> Option<(i16, i16)> {
    channel(samples, channels, 0).fold(None, |acc, s| match acc {
        None => Some((s, s)),
        Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
    })
}

/// Fraction of frames whose sign differs from the following frame.
pub fn zero_crossing_rate(samples: &[i16], channels: usize) -> f64 {
    let frames: Vec<i16> = channel(samples, channels, 0).collect();

    if frames.is_empty() {
        return 0.0;
    }

    let crossings = frames
        .windows(2)
        .filter(|w| (w[0] >= 0) != (w[1] >= 0))
        .count();

    crossings as f64 / frames.len() as f64
}

/// Peak absolute level of the first channel, normalised to `0.0..=1.0`.
pub fn peak_level(samples: &[i16], channels: usize) -> f64 {
    channel(samples, channels, 0)
        .map(|s| f64::from(s.unsigned_abs()) / 32768.0)
        .fold(0.0, f64::max)
}
