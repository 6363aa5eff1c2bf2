//! Minimal 5x7 bitmap font for overlay labels.
//!
//! Covers the digits plus the few letters the overlay needs; any other
//! character advances the pen without drawing.

use image::Rgb;

use super::Frame;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Rows top to bottom; bit 4 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'p' => [0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        _ => return None,
    };
    Some(rows)
}

/// Horizontal distance between consecutive glyph origins.
pub fn advance(scale: u32) -> i32 {
    ((GLYPH_WIDTH + 1) * scale.max(1)) as i32
}

/// Draw `text` with its top-left corner at `(x, y)`, clipped to the frame.
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1);
    let mut pen_x = x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = pen_x + (col * scale) as i32;
                    let py = y + (row as u32 * scale) as i32;
                    fill_block(frame, px, py, scale, color);
                }
            }
        }
        pen_x += advance(scale);
    }
}

fn fill_block(frame: &mut Frame, x: i32, y: i32, size: u32, color: Rgb<u8>) {
    for dy in 0..size as i32 {
        for dx in 0..size as i32 {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < frame.width() && (py as u32) < frame.height() {
                frame.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgb<u8> = Rgb([255, 255, 0]);
    const BLANK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn test_one_draws_its_stem() {
        let mut frame = Frame::new(8, 8);
        draw_text(&mut frame, 0, 0, "1", INK, 1);

        for y in 0..7 {
            assert_eq!(*frame.get_pixel(2, y), INK, "stem row {y}");
        }
        assert_eq!(*frame.get_pixel(0, 0), BLANK);
    }

    #[test]
    fn test_scale_and_advance() {
        let mut frame = Frame::new(40, 20);
        draw_text(&mut frame, 0, 0, "11", INK, 2);

        // Stem column 2 becomes pixels 4..6 in the first glyph, 16..18 in the second
        assert_eq!(*frame.get_pixel(4, 0), INK);
        assert_eq!(*frame.get_pixel(5, 13), INK);
        assert_eq!(*frame.get_pixel(16, 0), INK);
        assert_eq!(*frame.get_pixel(10, 0), BLANK);
    }

    #[test]
    fn test_unknown_characters_and_clipping() {
        let mut frame = Frame::new(6, 6);
        draw_text(&mut frame, 0, 0, "?", INK, 1);
        assert!(frame.pixels().all(|p| *p == BLANK));

        // Middle row of '8' lands on the top edge; the rest is clipped
        draw_text(&mut frame, -3, -3, "8", INK, 1);
        assert_eq!(*frame.get_pixel(0, 0), INK);
        assert_eq!(*frame.get_pixel(0, 1), BLANK);
    }
}
