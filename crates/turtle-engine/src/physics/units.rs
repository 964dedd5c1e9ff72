//! Pixel ↔ meter conversion.

use crate::coords::Vec2;

/// Pixels per simulation meter.
pub const PIXELS_PER_METER: f32 = 64.0;

#[inline]
pub fn to_sim_units(pixels: f32) -> f32 {
    pixels / PIXELS_PER_METER
}

#[inline]
pub fn to_pixel_units(meters: f32) -> f32 {
    meters * PIXELS_PER_METER
}

#[inline]
pub fn vec_to_sim_units(pixels: Vec2) -> Vec2 {
    pixels / PIXELS_PER_METER
}

#[inline]
pub fn vec_to_pixel_units(meters: Vec2) -> Vec2 {
    meters * PIXELS_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_meter_is_sixty_four_pixels() {
        assert_eq!(to_pixel_units(1.0), 64.0);
        assert_eq!(to_sim_units(64.0), 1.0);
    }

    #[test]
    fn conversions_are_inverse() {
        for px in [0.0, 1.0, 33.5, -128.0, 700.0] {
            assert!((to_pixel_units(to_sim_units(px)) - px).abs() < 1e-4);
        }
    }

    #[test]
    fn vector_conversion_is_per_component() {
        let m = vec_to_sim_units(Vec2::new(128.0, -32.0));
        assert_eq!(m, Vec2::new(2.0, -0.5));
        assert_eq!(vec_to_pixel_units(m), Vec2::new(128.0, -32.0));
    }
}
