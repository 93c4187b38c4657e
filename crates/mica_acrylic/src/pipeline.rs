//! Software acrylic compositing
//!
//! Fixed stage order over a straight-alpha RGBA buffer:
//!
//! 1. Gaussian blur of the backdrop (skipped at radius 0)
//! 2. Luminosity layer at `luminosity_opacity`
//! 3. Tint at `tint_opacity`
//! 4. Noise grain at `noise_opacity`, on top
//!
//! Every layer is composited source-over.

use image::{imageops, Rgba, RgbaImage};
use mica_core::Color;

use crate::config::AcrylicConfig;
use crate::luminosity::luminosity_color;
use crate::noise::NoiseTexture;

/// Gaussian sigma for a blur radius
pub fn blur_sigma(radius: f32) -> f32 {
    radius / 3.0
}

fn to_color(px: &Rgba<u8>) -> Color {
    Color::from_rgba8(px[0], px[1], px[2], px[3])
}

/// Run the full pipeline over `backdrop`
pub fn compose(backdrop: &RgbaImage, config: &AcrylicConfig, noise: Option<&NoiseTexture>) -> RgbaImage {
    let mut image = if config.blur_radius() > 0.0 {
        imageops::blur(backdrop, blur_sigma(config.blur_radius()))
    } else {
        backdrop.clone()
    };

    let luminosity = luminosity_color(config.tint_color()).with_alpha(config.luminosity_opacity());
    let tint = config.tint_color().with_alpha(config.tint_opacity());
    let noise = noise.filter(|_| config.noise_opacity() > 0.0);

    for (x, y, px) in image.enumerate_pixels_mut() {
        let mut color = luminosity.over(&to_color(px));
        color = tint.over(&color);
        if let Some(noise) = noise {
            let grain = to_color(&noise.sample(x, y));
            let grain = grain.with_alpha(grain.a * config.noise_opacity());
            color = grain.over(&color);
        }
        *px = Rgba(color.to_rgba8());
    }

    tracing::trace!(
        width = image.width(),
        height = image.height(),
        blur = config.blur_radius(),
        "composed acrylic layer"
    );
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(8, 8, Rgba(color))
    }

    #[test]
    fn transparent_layers_leave_backdrop() {
        let config = AcrylicConfig::default()
            .with_blur_radius(0.0)
            .with_luminosity_opacity(0.0)
            .with_tint(Color::WHITE, 0.0)
            .with_noise_opacity(0.0);
        let backdrop = flat([10, 20, 30, 255]);
        assert_eq!(compose(&backdrop, &config, None), backdrop);
    }

    #[test]
    fn opaque_tint_covers_blur_and_luminosity() {
        let tint = Color::from_rgb8(45, 45, 45);
        let config = AcrylicConfig::default()
            .with_tint(tint, 1.0)
            .with_noise_opacity(0.0);
        let out = compose(&flat([200, 0, 0, 255]), &config, None);
        for px in out.pixels() {
            assert_eq!(px.0, [45, 45, 45, 255]);
        }
    }

    #[test]
    fn luminosity_sits_between_backdrop_and_tint() {
        let tint = Color::from_rgb8(243, 243, 243);
        let config = AcrylicConfig::default()
            .with_blur_radius(0.0)
            .with_tint(tint, 0.0)
            .with_luminosity_opacity(1.0)
            .with_noise_opacity(0.0);
        let out = compose(&flat([0, 0, 0, 255]), &config, None);
        let expected = luminosity_color(tint).to_rgba8();
        assert_eq!(out.get_pixel(0, 0).0, expected);
    }

    #[test]
    fn noise_is_applied_after_tint() {
        let config = AcrylicConfig::default()
            .with_blur_radius(0.0)
            .with_tint(Color::from_rgb8(128, 128, 128), 1.0)
            .with_noise_opacity(1.0);
        let noise = NoiseTexture::generate(3);
        let out = compose(&flat([0, 0, 0, 255]), &config, Some(&noise));
        // An opaque tint would hide grain composited beneath it
        let first = out.get_pixel(0, 0)[0];
        assert!(out.pixels().any(|px| px[0] != first));
    }

    #[test]
    fn zero_noise_opacity_skips_grain() {
        let config = AcrylicConfig::default()
            .with_tint(Color::from_rgb8(128, 128, 128), 1.0)
            .with_noise_opacity(0.0);
        let noise = NoiseTexture::generate(3);
        let out = compose(&flat([0, 0, 0, 255]), &config, Some(&noise));
        assert!(out.pixels().all(|px| px.0 == [128, 128, 128, 255]));
    }

    #[test]
    fn blur_smooths_edges() {
        let mut backdrop = flat([0, 0, 0, 255]);
        for y in 0..8 {
            for x in 4..8 {
                backdrop.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let config = AcrylicConfig::default()
            .with_blur_radius(6.0)
            .with_luminosity_opacity(0.0)
            .with_tint(Color::WHITE, 0.0)
            .with_noise_opacity(0.0);
        let out = compose(&backdrop, &config, None);
        let edge = out.get_pixel(3, 4)[0];
        assert!(edge > 0 && edge < 255);
    }
}
