use crate::{definitions::display, devices::Pixels};

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Pixels are only ever changed by clearing the whole screen or by drawing a
/// sprite onto it with XOR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Pixels,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [[false; display::WIDTH]; display::HEIGHT],
        }
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            for pixel in row.iter_mut() {
                *pixel = false;
            }
        }
    }

    /// Draws the sprite with its top left corner at `(x, y)`, returns `true`
    /// if any pixel was turned off on the way.
    ///
    /// Each byte of the sprite is a row of eight pixels, most significant bit
    /// first. The origin always wraps around the display. The rest of the
    /// sprite is either cut off at the edges (`clip`) or wraps around as well.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8], clip: bool) -> bool {
        let origin_x = x as usize % display::WIDTH;
        let origin_y = y as usize % display::HEIGHT;
        let mut collision = false;

        for (i, row) in sprite.iter().enumerate() {
            let mut y = origin_y + i;
            if y >= display::HEIGHT {
                if clip {
                    break;
                }
                y %= display::HEIGHT;
            }

            for j in 0..display::SPRITE_WIDTH {
                let mask = 0x80u8 >> j;
                if *row & mask == 0 {
                    continue;
                }

                let mut x = origin_x + j;
                if x >= display::WIDTH {
                    if clip {
                        break;
                    }
                    x %= display::WIDTH;
                }

                let pixel = &mut self.pixels[y][x];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }

    pub fn get_pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Will return the pixel in column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// Checks if no pixel is set.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().flatten().all(|pixel| !pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// the glyph `0` of the font
    const ZERO: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    #[test]
    fn test_draw_and_clear() {
        let mut fb = Framebuffer::new();
        assert!(fb.is_clear());

        assert!(!fb.draw(0, 0, &ZERO, true));

        // top row is fully set for the first four pixels
        for x in 0..4 {
            assert!(fb.get(x, 0));
        }
        assert!(!fb.get(4, 0));
        // the sides of the second row
        assert!(fb.get(0, 1));
        assert!(!fb.get(1, 1));
        assert!(fb.get(3, 1));

        fb.clear();
        assert!(fb.is_clear());
    }

    #[test]
    fn test_double_draw_collides() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw(10, 5, &ZERO, true));
        assert!(fb.draw(10, 5, &ZERO, true));
        assert!(fb.is_clear());
    }

    #[test]
    fn test_partial_overlap_collides() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw(0, 0, &[0x80], true));
        assert!(fb.draw(0, 0, &[0xC0], true));
        assert!(!fb.get(0, 0));
        assert!(fb.get(1, 0));
    }

    #[test]
    fn test_origin_wraps() {
        let mut fb = Framebuffer::new();
        fb.draw((display::WIDTH + 2) as u8, (display::HEIGHT + 1) as u8, &[0x80], true);
        assert!(fb.get(2, 1));
    }

    #[test]
    fn test_clip_at_edges() {
        let mut fb = Framebuffer::new();
        let x = (display::WIDTH - 4) as u8;
        let y = (display::HEIGHT - 1) as u8;
        fb.draw(x, y, &[0xFF, 0xFF], true);

        for column in (display::WIDTH - 4)..display::WIDTH {
            assert!(fb.get(column, display::HEIGHT - 1));
        }
        // nothing wrapped around
        for column in 0..4 {
            assert!(!fb.get(column, display::HEIGHT - 1));
            assert!(!fb.get(column, 0));
        }
        assert_eq!(fb.get_pixels().iter().flatten().filter(|p| **p).count(), 4);
    }

    #[test]
    fn test_wrap_at_edges() {
        let mut fb = Framebuffer::new();
        let x = (display::WIDTH - 4) as u8;
        let y = (display::HEIGHT - 1) as u8;
        fb.draw(x, y, &[0xFF, 0xFF], false);

        assert_eq!(fb.get_pixels().iter().flatten().filter(|p| **p).count(), 16);
        assert!(fb.get(0, display::HEIGHT - 1));
        assert!(fb.get(3, 0));
        assert!(fb.get(display::WIDTH - 1, 0));
    }
}
