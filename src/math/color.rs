/// HSL (all components in [0, 1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = l - c * 0.5;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Packed 0xRRGGBB to RGB in [0, 1]
pub fn rgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 0.01)
    }

    #[test]
    fn test_hsl_to_rgb_red() {
        assert!(approx(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_hsl_full_lightness_is_white() {
        assert!(approx(hsl_to_rgb(0.6, 1.0, 1.0), [1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_hsl_zero_lightness_is_black() {
        assert!(approx(hsl_to_rgb(0.6, 1.0, 0.0), [0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_hsl_node_blue() {
        // hue 0.6 at half lightness: blue with a little green
        assert!(approx(hsl_to_rgb(0.6, 1.0, 0.5), [0.0, 0.4, 1.0]));
    }

    #[test]
    fn test_rgb_hex() {
        assert!(approx(rgb_hex(0x20252f), [0.125, 0.145, 0.184]));
        assert_eq!(rgb_hex(0xffffff), [1.0, 1.0, 1.0]);
    }
}
