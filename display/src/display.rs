use sdl2::pixels::PixelFormatEnum;

use schip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use schip8_core::FrameBuffer;

/// # Display
/// An SDL2 window showing the 64x32 monochrome FrameBuffer, each cell
/// scaled up to a `scale` x `scale` square.
/// The run loop only calls `render` when the draw flag was set.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "SCHIP-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Packs the FrameBuffer into RGB24 bytes, row after row.
    /// A lit cell becomes three 255s and an unlit one three 0s.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|a| a.iter())
            .flat_map(|a| std::iter::repeat(a).take(3))
            .map(|a| a * 255)
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded out past width * 3 bytes
            for (row, line) in pixels.chunks(self.width * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_cells_are_white() {
        let mut frame = FrameBuffer::new();
        frame.set(0, 1, 1);
        frame.set(31, 63, 1);
        let bytes = Display::frame_to_sdl_texture(&frame);

        assert_eq!(bytes.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert_eq!(bytes[..6], [0, 0, 0, 255, 255, 255]);
        assert_eq!(bytes[bytes.len() - 3..], [255, 255, 255]);
        assert_eq!(bytes.iter().filter(|&&b| b == 255).count(), 6);
    }
}
