//! Grain texture overlaid on top of the composite

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const NOISE_TEXTURE_SIZE: u32 = 64;

/// Per-texel alpha of the generated grain, before the layer opacity
pub const NOISE_TEXEL_ALPHA: u8 = 25;

/// A tileable square of grey grain
#[derive(Clone, Debug)]
pub struct NoiseTexture {
    image: RgbaImage,
}

impl NoiseTexture {
    /// Deterministic texture for `seed`
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let image = RgbaImage::from_fn(NOISE_TEXTURE_SIZE, NOISE_TEXTURE_SIZE, |_, _| {
            let gray: u8 = rng.gen_range(20..235);
            Rgba([gray, gray, gray, NOISE_TEXEL_ALPHA])
        });
        Self { image }
    }

    /// Texture seeded from the thread RNG
    pub fn random() -> Self {
        Self::generate(rand::thread_rng().gen())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Texel covering `(x, y)` when the texture is tiled
    pub fn sample(&self, x: u32, y: u32) -> Rgba<u8> {
        *self
            .image
            .get_pixel(x % NOISE_TEXTURE_SIZE, y % NOISE_TEXTURE_SIZE)
    }
}

impl Default for NoiseTexture {
    fn default() -> Self {
        Self::generate(0)
    }
}
