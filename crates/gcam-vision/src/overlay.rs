//! Label overlay drawn into the frame buffer.
//!
//! Gesture labels are short uppercase strings, so a small built-in 5x7
//! glyph set is enough; glyphs are scaled up and stamped pixel by pixel.
//! Out-of-bounds pixels are clipped by `Frame::put_pixel`.

use gcam_models::Frame;

/// Top-left corner of the label, matching where the deployed overlay sits.
const LABEL_X: u32 = 20;
const LABEL_Y: u32 = 20;
/// Integer upscale of the 5x7 glyphs.
const SCALE: u32 = 3;
/// Green in both RGB and BGR channel order.
const LABEL_COLOR: [u8; 3] = [0, 255, 0];

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// Draw the display label at the fixed overlay position.
pub fn draw_label(frame: &mut Frame, text: &str) {
    draw_text(frame, text, LABEL_X, LABEL_Y, LABEL_COLOR, SCALE);
}

/// Stamp `text` with its top-left corner at `(x, y)`.
pub fn draw_text(frame: &mut Frame, text: &str, x: u32, y: u32, color: [u8; 3], scale: u32) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let gx = x + i as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        frame.put_pixel(
                            gx + col * scale + dx,
                            y + row as u32 * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// 5x7 row bitmaps for the characters gesture labels use.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcam_models::PixelFormat;

    #[test]
    fn test_draw_label_touches_pixels() {
        let mut frame = Frame::filled(320, 240, PixelFormat::Rgb, [0, 0, 0]);
        draw_label(&mut frame, "ROCK (FIST)");

        let painted = (0..240)
            .flat_map(|y| (0..320).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == LABEL_COLOR)
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn test_draw_clips_at_frame_edge() {
        // Label longer than the frame is wide; must not panic
        let mut frame = Frame::filled(40, 30, PixelFormat::Rgb, [0, 0, 0]);
        draw_label(&mut frame, "PAPER (OPEN HAND)");
    }

    #[test]
    fn test_all_label_characters_have_glyphs() {
        for label in ["ROCK (FIST)", "PAPER (OPEN HAND)", "SCISSORS (PEACE)", "MIDDLE FINGER"] {
            for ch in label.chars() {
                assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
            }
        }
    }
}
