//! RGB565 color packing.
//!
//! The display takes colors as 16-bit values: 5 bits red, 6 bits green and
//! 5 bits blue, most significant first.

use crate::{Error, Result};

/// Packs 8-bit RGB channels into an RGB565 value.
#[inline]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Expands an RGB565 value back to 8-bit channels.
#[inline]
pub fn rgb565_to_rgb888(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    // Replicate the high bits into the low bits so white stays white
    let r8 = (r << 3) | (r >> 2);
    let g8 = (g << 2) | (g >> 4);
    let b8 = (b << 3) | (b >> 2);
    (r8, g8, b8)
}

/// Parses a `#RRGGBB` (or `RRGGBB`) hex string to RGB565.
pub fn parse_hex_color(hex: &str) -> Result<u16> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
    };
    Ok(rgb565(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_primaries() {
        assert_eq!(rgb565(255, 0, 0), 0xF800);
        assert_eq!(rgb565(0, 255, 0), 0x07E0);
        assert_eq!(rgb565(0, 0, 255), 0x001F);
        assert_eq!(rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(rgb565(0, 0, 0), 0x0000);
    }

    #[test]
    fn test_rgb565_exhaustive() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let expected =
                        ((r as u32 >> 3) << 11) | ((g as u32 >> 2) << 5) | (b as u32 >> 3);
                    assert!(expected <= u16::MAX as u32);
                    assert_eq!(rgb565(r, g, b) as u32, expected);
                }
            }
        }
    }

    #[test]
    fn test_rgb565_drops_low_bits() {
        // Values that differ only below the channel precision pack the same
        assert_eq!(rgb565(0xF8, 0xFC, 0xF8), rgb565(0xFF, 0xFF, 0xFF));
        assert_eq!(rgb565(7, 3, 7), 0);
    }

    #[test]
    fn test_rgb565_to_rgb888() {
        assert_eq!(rgb565_to_rgb888(0xFFFF), (255, 255, 255));
        assert_eq!(rgb565_to_rgb888(0x0000), (0, 0, 0));
        assert_eq!(rgb565_to_rgb888(0xF800), (255, 0, 0));
        assert_eq!(rgb565_to_rgb888(0x07E0), (0, 255, 0));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000").unwrap(), 0xF800);
        assert_eq!(parse_hex_color("00FF00").unwrap(), 0x07E0);
        assert_eq!(
            parse_hex_color("#1A2A3A").unwrap(),
            rgb565(0x1A, 0x2A, 0x3A)
        );
        assert!(parse_hex_color("invalid").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
    }
}
