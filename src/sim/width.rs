//! Platform width sampling
//!
//! Widths are a fraction of the viewport width, drawn from a fixed discrete
//! distribution by walking the cumulative probabilities (inverse CDF).

use rand::Rng;

/// `(width factor, probability)` buckets; probabilities sum to 1.0
pub const WIDTH_BUCKETS: [(f32, f32); 5] = [
    (0.10, 0.05), // very small
    (0.15, 0.20), // small
    (0.20, 0.50), // medium
    (0.30, 0.20), // large
    (0.40, 0.05), // very large
];

/// Used when rounding leaves the sample past the last cumulative sum
pub const FALLBACK_WIDTH_FACTOR: f32 = 0.20;

/// Map a uniform sample in `[0, 1)` to a width factor
pub fn width_factor_for(r: f32) -> f32 {
    let mut cumulative = 0.0;
    for &(factor, probability) in &WIDTH_BUCKETS {
        cumulative += probability;
        if cumulative >= r {
            return factor;
        }
    }
    FALLBACK_WIDTH_FACTOR
}

/// Sample a platform width for a viewport of the given width
pub fn choose_platform_width<R: Rng + ?Sized>(rng: &mut R, viewport_width: f32) -> f32 {
    viewport_width * width_factor_for(rng.random::<f32>())
}
