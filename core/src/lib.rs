pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use error::Chip8Error;
pub use frame_buffer::FrameBuffer;
pub use keypad::Keypad;
pub use opcode::Opcode;

mod chip8;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod sprites;
pub mod state;
