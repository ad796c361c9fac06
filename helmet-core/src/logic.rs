//! Pure Business Logic Functions
//!
//! Farb-Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::config::WORD_HUE_STEP;

/// Wandelt einen 16-Bit Farbton in eine voll gesättigte RGB-Farbe um
///
/// Gleiche Aufteilung wie Adafruit NeoPixel `ColorHSV(hue)`: der Farbkreis
/// hat 1530 Stufen (6 Sektoren à 255).
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use helmet_core::hue_to_rgb;
/// assert_eq!(hue_to_rgb(0), RGB8 { r: 255, g: 0, b: 0 });
/// ```
pub fn hue_to_rgb(hue: u16) -> RGB8 {
    let hue = ((hue as u32 * 1530 + 32768) / 65536) as u16;

    let (r, g, b) = if hue < 510 {
        if hue < 255 {
            (255, hue, 0)
        } else {
            (510 - hue, 255, 0)
        }
    } else if hue < 1020 {
        if hue < 765 {
            (0, 255, hue - 510)
        } else {
            (0, 1020 - hue, 255)
        }
    } else if hue < 1530 {
        if hue < 1275 {
            (hue - 1020, 0, 255)
        } else {
            (255, 0, 1530 - hue)
        }
    } else {
        (255, 0, 0)
    };

    RGB8 {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}

/// Farbe für das Wort an Position `index`: Hue = index * 40 mod 255
pub fn word_hue(index: usize) -> RGB8 {
    let hue8 = ((index as u32).wrapping_mul(WORD_HUE_STEP) % 255) as u16;
    hue_to_rgb(hue8 * 256)
}

/// Skaliert eine Farbe mit globaler Helligkeit (0-255)
///
/// 255 lässt die Farbe unverändert, 0 schaltet sie aus.
pub fn scale_brightness(color: RGB8, brightness: u8) -> RGB8 {
    let scale = brightness as u16 + 1;
    let channel = |c: u8| ((c as u16 * scale) >> 8) as u8;
    RGB8 {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Parst `#RRGGBB` aus dem Dashboard
///
/// Ungültige Eingaben ergeben Schwarz.
pub fn parse_hex_color(hex: &str) -> RGB8 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return RGB8::default();
    }

    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => RGB8 {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        },
        Err(_) => RGB8::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_primary_colors() {
        assert_eq!(hue_to_rgb(0), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(hue_to_rgb(21845), RGB8 { r: 0, g: 255, b: 0 });
        assert_eq!(hue_to_rgb(43690), RGB8 { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn test_hue_wraps_to_red() {
        assert_eq!(hue_to_rgb(u16::MAX), RGB8 { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_word_hue_first_word_is_red() {
        assert_eq!(word_hue(0), RGB8 { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_word_hue_differs_per_word() {
        assert_ne!(word_hue(0), word_hue(1));
        assert_ne!(word_hue(1), word_hue(2));
    }

    #[test]
    fn test_scale_brightness_bounds() {
        let white = RGB8 {
            r: 255,
            g: 255,
            b: 255,
        };
        assert_eq!(scale_brightness(white, 255), white);
        assert_eq!(scale_brightness(white, 0), RGB8 { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_scale_brightness_half() {
        let color = RGB8 { r: 200, g: 100, b: 0 };
        assert_eq!(scale_brightness(color, 127), RGB8 { r: 100, g: 50, b: 0 });
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(parse_hex_color("#00ff7f"), RGB8 { r: 0, g: 255, b: 127 });
    }

    #[test]
    fn test_parse_hex_color_invalid_is_black() {
        assert_eq!(parse_hex_color("#GG0000"), RGB8::default());
        assert_eq!(parse_hex_color("red"), RGB8::default());
        assert_eq!(parse_hex_color(""), RGB8::default());
    }
}
