use crate::{FrameBuffer, Params, Rgb565};

/// Fill the half-open box `[x0, x1) x [y0, y1)`.
pub fn fill_rect(buf: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb565) {
    for y in y0..y1 {
        for x in x0..x1 {
            buf.set(x, y, c);
        }
    }
}

/// Every integer point within `r` of the centre, edge included.
pub fn fill_circle(buf: &mut FrameBuffer, cx: i32, cy: i32, r: i32, c: Rgb565) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                buf.set(cx + dx, cy + dy, c);
            }
        }
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Width of one scaled glyph in pixels.
pub const GLYPH_WIDTH: i32 = Params::FONT_WIDTH * Params::FONT_SCALE;

/// Draw digit `d` with its top-left corner at `(x, y)`. Anything outside
/// `0..=9` draws nothing.
pub fn draw_digit(buf: &mut FrameBuffer, d: i32, x: i32, y: i32, c: Rgb565) {
    if !(0..=9).contains(&d) {
        return;
    }
    let s = Params::FONT_SCALE;
    let glyph = &DIGITS[d as usize];
    for row in 0..Params::FONT_HEIGHT {
        for col in 0..Params::FONT_WIDTH {
            if glyph[(row * Params::FONT_WIDTH + col) as usize] == 1 {
                let px = x + col * s;
                let py = y + row * s;
                fill_rect(buf, px, py, px + s, py + s, c);
            }
        }
    }
}

/// Right-aligned decimal: the last digit's right edge sits on `right_x`.
pub fn draw_number(buf: &mut FrameBuffer, n: u32, right_x: i32, y: i32, c: Rgb565) {
    let s = n.to_string();
    let mut cursor = right_x;
    for ch in s.bytes().rev() {
        cursor -= GLYPH_WIDTH;
        draw_digit(buf, (ch - b'0') as i32, cursor, y, c);
        cursor -= Params::FONT_CHAR_SPACING;
    }
}
