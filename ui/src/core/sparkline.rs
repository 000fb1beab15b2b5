//! Decorative sparkline series.
//!
//! The series approximates a trend line around a headline value; it is NOT
//! derived from historical data. Noise comes from a caller-supplied RNG so
//! the same seed always yields the same series.

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::format::{ensure_finite, ensure_magnitude, FormatError};

pub const SPARKLINE_POINTS: usize = 8;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Minimum rendered bar height so flat series stay visible.
const MIN_BAR_HEIGHT: f64 = 2.0;

pub fn generate_sparkline<R: Rng + ?Sized>(
    value: f64,
    trend_pct: f64,
    rng: &mut R,
) -> Result<[f64; SPARKLINE_POINTS], FormatError> {
    let value = ensure_magnitude(value)?;
    let trend_pct = ensure_finite(trend_pct)?;

    let base = value * 0.8;
    let variance = value * 0.4;
    let mut points = [0.0; SPARKLINE_POINTS];

    for (i, point) in points.iter_mut().enumerate() {
        let progress = i as f64 / SPARKLINE_POINTS as f64;
        let trend_effect = (trend_pct / 100.0) * progress * value;
        let noise = (rng.gen::<f64>() - 0.5) * variance * 0.3;
        *point = base + trend_effect + noise;
    }

    Ok(points)
}

pub fn sparkline_for_seed(
    value: f64,
    trend_pct: f64,
    seed: u64,
) -> Result<[f64; SPARKLINE_POINTS], FormatError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_sparkline(value, trend_pct, &mut rng)
}

/// Stable seed for a row label so re-renders reuse the same series.
///
/// FNV-1a over the label bytes followed by the little-endian salt, so a
/// label keeps its series across builds and toolchains.
pub fn seed_for_label(label: &str, salt: u64) -> u64 {
    let hash = fnv1a(FNV_OFFSET_BASIS, label.as_bytes());
    fnv1a(hash, &salt.to_le_bytes())
}

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Map series values into bar heights within `height` pixels.
pub fn normalize_heights(points: &[f64], height: f64) -> Vec<f64> {
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    points
        .iter()
        .map(|value| (((value - min) / range) * height).max(MIN_BAR_HEIGHT))
        .collect()
}
