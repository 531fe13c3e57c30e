/// Class color palettes: the fixed default, random fallback generation and
/// an explicit cache for generated palettes.

use crate::plot::types::{Palette, Rgb, DEFAULT_PALETTE};
use lru::LruCache;
use plotters::style::{Color, HSLColor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;
use tracing::debug;

/// Lightness band for generated colors.
const LIGHTNESS: (f64, f64) = (0.50, 0.60);
/// Saturation band for generated colors.
const SATURATION: (f64, f64) = (0.90, 1.00);

/// Generate `count` colors spread evenly around the hue circle.
///
/// Each entry gets its own random lightness and saturation within a narrow
/// band so neighbouring hues stay distinguishable. Output is not stable
/// across calls unless the rng is.
pub fn generate_palette<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Palette {
    (0..count)
        .map(|i| {
            let hue = i as f64 / count as f64;
            let lightness = rng.gen_range(LIGHTNESS.0..=LIGHTNESS.1);
            let saturation = rng.gen_range(SATURATION.0..=SATURATION.1);
            let (r, g, b) = HSLColor(hue, saturation, lightness).to_backend_color().rgb;
            Rgb(r, g, b)
        })
        .collect()
}

/// Reproducible variant of [`generate_palette`].
pub fn generate_palette_seeded(count: usize, seed: u64) -> Palette {
    generate_palette(count, &mut StdRng::seed_from_u64(seed))
}

/// Where palettes come from once the default palette is too small.
pub trait PaletteSource {
    /// Produce exactly `count` colors.
    fn generate(&mut self, count: usize) -> Palette;
}

/// Generates a fresh palette on every request.
pub struct RandomPalettes<R> {
    rng: R,
}

impl<R: Rng> RandomPalettes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PaletteSource for RandomPalettes<R> {
    fn generate(&mut self, count: usize) -> Palette {
        debug!(count, "generating palette");
        generate_palette(count, &mut self.rng)
    }
}

/// LRU cache of generated palettes keyed by class count.
///
/// Plots with the same number of classes drawn through one cache share
/// their colors.
pub struct PaletteCache<R = StdRng> {
    cache: LruCache<usize, Palette>,
    rng: R,
}

impl PaletteCache<StdRng> {
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    pub fn seeded(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PaletteCache<R> {
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            rng,
        }
    }

    /// Cached palette for `count` classes, if one was generated.
    pub fn peek(&self, count: usize) -> Option<&Palette> {
        self.cache.peek(&count)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear all cached palettes.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<R: Rng> PaletteSource for PaletteCache<R> {
    fn generate(&mut self, count: usize) -> Palette {
        if let Some(palette) = self.cache.get(&count) {
            return palette.clone();
        }
        debug!(count, "palette cache miss");
        let palette = generate_palette(count, &mut self.rng);
        self.cache.put(count, palette.clone());
        palette
    }
}

/// Palette for `count` classes: a prefix of the default palette when it is
/// large enough, otherwise whatever `source` generates.
pub fn palette_for<S: PaletteSource + ?Sized>(count: usize, source: &mut S) -> Palette {
    if count <= DEFAULT_PALETTE.len() {
        DEFAULT_PALETTE[..count].to_vec()
    } else {
        source.generate(count)
    }
}
