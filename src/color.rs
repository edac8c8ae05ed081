use image::Rgba;
use rand::Rng;

use crate::errors::{CamPaintError, Result};

/// Constants
pub const MAX_COLOR_DIFF: i32 = 20; // How similar a pixel color must be to the target color, to belong to a region

/// Test whether two colors are similar enough to belong to the same region.
/// Compares the red, green and blue channels independently (alpha is ignored);
/// every per-channel difference must lie strictly within the tolerance.
#[inline]
pub fn colors_match(target: Rgba<u8>, candidate: Rgba<u8>, max_diff: i32) -> bool {
    let red_diff = target[0] as i32 - candidate[0] as i32;
    let green_diff = target[1] as i32 - candidate[1] as i32;
    let blue_diff = target[2] as i32 - candidate[2] as i32;

    red_diff > -max_diff && red_diff < max_diff
        && green_diff > -max_diff && green_diff < max_diff
        && blue_diff > -max_diff && blue_diff < max_diff
}

/// Parse a "#rrggbb" or "rrggbb" hex string into an opaque RGBA color
pub fn parse_hex_color(input: &str) -> Result<Rgba<u8>> {
    let hex = input.trim().trim_start_matches('#');

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CamPaintError::InvalidTargetColor(format!(
            "expected 6 hex digits (e.g. \"#1e90ff\"), got '{}'", input
        )));
    }

    let red = u8::from_str_radix(&hex[0..2], 16)
        .map_err(|e| CamPaintError::InvalidTargetColor(e.to_string()))?;
    let green = u8::from_str_radix(&hex[2..4], 16)
        .map_err(|e| CamPaintError::InvalidTargetColor(e.to_string()))?;
    let blue = u8::from_str_radix(&hex[4..6], 16)
        .map_err(|e| CamPaintError::InvalidTargetColor(e.to_string()))?;

    Ok(Rgba([red, green, blue, 255]))
}

/// Draw one uniform random color from the 24-bit RGB cube.
/// The random source is injected so visualization output can be
/// reproduced with a seeded generator. Collisions with the background
/// or between regions are possible and acceptable.
pub fn random_region_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    let value: u32 = rng.gen_range(0..0x0100_0000);
    let red = ((value >> 16) & 0xFF) as u8;
    let green = ((value >> 8) & 0xFF) as u8;
    let blue = (value & 0xFF) as u8;
    Rgba([red, green, blue, 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn identical_colors_match() {
        let c = Rgba([120, 80, 200, 255]);
        assert!(colors_match(c, c, MAX_COLOR_DIFF));
    }

    #[test]
    fn difference_of_threshold_does_not_match() {
        // Strict inequality: a per-channel difference of exactly the
        // tolerance is already too far apart.
        let target = Rgba([100, 100, 100, 255]);
        let candidate = Rgba([120, 100, 100, 255]);
        assert!(!colors_match(target, candidate, MAX_COLOR_DIFF));
        assert!(!colors_match(candidate, target, MAX_COLOR_DIFF));
    }

    #[test]
    fn difference_below_threshold_matches() {
        let target = Rgba([100, 100, 100, 255]);
        let candidate = Rgba([119, 81, 110, 255]);
        assert!(colors_match(target, candidate, MAX_COLOR_DIFF));
        assert!(colors_match(candidate, target, MAX_COLOR_DIFF));
    }

    #[test]
    fn one_channel_too_far_rejects_the_pair() {
        let target = Rgba([100, 100, 100, 255]);
        let candidate = Rgba([101, 99, 160, 255]);
        assert!(!colors_match(target, candidate, MAX_COLOR_DIFF));
    }

    #[test]
    fn alpha_is_ignored() {
        let target = Rgba([10, 20, 30, 255]);
        let candidate = Rgba([10, 20, 30, 0]);
        assert!(colors_match(target, candidate, MAX_COLOR_DIFF));
    }

    #[test]
    fn parse_hex_color_accepts_leading_hash() {
        assert_eq!(parse_hex_color("#1e90ff").unwrap(), Rgba([30, 144, 255, 255]));
        assert_eq!(parse_hex_color("1e90ff").unwrap(), Rgba([30, 144, 255, 255]));
    }

    #[test]
    fn parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn random_region_color_is_reproducible_with_a_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(random_region_color(&mut a), random_region_color(&mut b));
        }
    }

    #[test]
    fn random_region_color_is_opaque() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            assert_eq!(random_region_color(&mut rng)[3], 255);
        }
    }
}
