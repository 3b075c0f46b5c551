use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The Chip-8 display is 64x32 black/white pixels, stored as 1/0 and
/// indexed as [row][col] (i.e. [y][x]).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Returns 1 if the pixel is lit, 0 otherwise
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.pixels[row][col]
    }

    /// Any nonzero `value` lights the pixel
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.pixels[row][col] = (value != 0) as u8;
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs a lit pixel onto the display.
    /// Returns true if this turned a lit pixel off.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let collided = self.pixels[row][col] == 1;
        self.pixels[row][col] ^= 1;
        collided
    }

    pub fn rows(&self) -> &[[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
