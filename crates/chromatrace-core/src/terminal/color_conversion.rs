//! Color conversion utilities.
//!
//! Converts RGB colors to lower color spaces (256-color, 16-color)
//! for terminals with limited color support.

use crate::terminal::ColorSupport;

/// Channel values of the 6x6x6 cube in the xterm 256-color palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Standard 16-color ANSI palette (approximate RGB values).
const ANSI_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // 0: Black
    (128, 0, 0),     // 1: Red
    (0, 128, 0),     // 2: Green
    (128, 128, 0),   // 3: Yellow
    (0, 0, 128),     // 4: Blue
    (128, 0, 128),   // 5: Magenta
    (0, 128, 128),   // 6: Cyan
    (192, 192, 192), // 7: White (light gray)
    (128, 128, 128), // 8: Bright Black (dark gray)
    (255, 0, 0),     // 9: Bright Red
    (0, 255, 0),     // 10: Bright Green
    (255, 255, 0),   // 11: Bright Yellow
    (0, 0, 255),     // 12: Bright Blue
    (255, 0, 255),   // 13: Bright Magenta
    (0, 255, 255),   // 14: Bright Cyan
    (255, 255, 255), // 15: Bright White
];

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = i32::from(a.0) - i32::from(b.0);
    let dg = i32::from(a.1) - i32::from(b.1);
    let db = i32::from(a.2) - i32::from(b.2);
    (dr * dr + dg * dg + db * db) as u32
}

fn nearest_cube_level(value: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (i32::from(**level) - i32::from(value)).abs())
        .map_or(0, |(i, _)| i)
}

/// Convert RGB color to nearest 256-color palette index.
///
/// Picks the closer of the 6x6x6 color cube (16-231) and the grayscale
/// ramp (232-255). The 16 system colors are never returned because
/// terminals theme them freely.
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (nearest_cube_level(r), nearest_cube_level(g), nearest_cube_level(b));
    let cube_index = 16 + 36 * ri + 6 * gi + bi;
    let cube_rgb = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);

    // Ramp values are 8, 18, ..., 238
    let average = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
    let gray_step = average.saturating_sub(3) / 10;
    let gray_step = gray_step.min(23);
    let gray_value = (8 + gray_step * 10) as u8;
    let gray_rgb = (gray_value, gray_value, gray_value);

    if distance((r, g, b), gray_rgb) < distance((r, g, b), cube_rgb) {
        232 + gray_step as u8
    } else {
        cube_index as u8
    }
}

/// Convert RGB color to nearest 16-color ANSI code.
///
/// Maps RGB to the standard 16 ANSI colors using Euclidean distance.
pub fn rgb_to_16(r: u8, g: u8, b: u8) -> u8 {
    ANSI_COLORS
        .iter()
        .enumerate()
        .min_by_key(|(_, ansi)| distance((r, g, b), **ansi))
        .map_or(0, |(i, _)| i as u8)
}

/// SGR parameters selecting `rgb` as foreground for the given support level.
///
/// The result goes between `ESC [` and `m`.
pub fn foreground_sgr(rgb: (u8, u8, u8), support: ColorSupport) -> String {
    let (r, g, b) = rgb;
    match support {
        ColorSupport::Truecolor => format!("38;2;{};{};{}", r, g, b),
        ColorSupport::Color256 => format!("38;5;{}", rgb_to_256(r, g, b)),
        ColorSupport::Color16 => {
            let index = rgb_to_16(r, g, b);
            let code = if index < 8 { 30 + index } else { 90 + (index - 8) };
            code.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_256_cube() {
        assert_eq!(rgb_to_256(255, 0, 0), 196);
        assert_eq!(rgb_to_256(0, 0, 0), 16);
        assert_eq!(rgb_to_256(255, 255, 255), 231);
    }

    #[test]
    fn test_rgb_to_256_prefers_gray_ramp() {
        assert_eq!(rgb_to_256(128, 128, 128), 244);
    }

    #[test]
    fn test_rgb_to_256_range() {
        for (r, g, b) in [(12, 200, 90), (250, 250, 240), (1, 2, 3), (100, 50, 200)] {
            let index = rgb_to_256(r, g, b);
            assert!(index >= 16, "system colors should not be produced");
        }
    }

    #[test]
    fn test_rgb_to_16() {
        let index = rgb_to_16(255, 0, 0);
        assert_eq!(index, 9);
    }

    #[test]
    fn test_black_conversion() {
        // Black should map to black (0) in 16-color
        assert_eq!(rgb_to_16(0, 0, 0), 0);
    }

    #[test]
    fn test_white_conversion() {
        // White should map to bright white (15) in 16-color
        assert_eq!(rgb_to_16(255, 255, 255), 15);
    }

    #[test]
    fn test_foreground_sgr_per_support() {
        assert_eq!(foreground_sgr((1, 2, 3), ColorSupport::Truecolor), "38;2;1;2;3");
        assert_eq!(foreground_sgr((255, 0, 0), ColorSupport::Color256), "38;5;196");
        assert_eq!(foreground_sgr((128, 0, 0), ColorSupport::Color16), "31");
        assert_eq!(foreground_sgr((255, 0, 0), ColorSupport::Color16), "91");
    }
}
